pub mod model;
pub mod view;

pub use model::{Animation, DragTracker, WheelState};
pub use view::draw;

/// Wheel radius as a fraction of the shorter surface edge.
pub const WHEEL_RADIUS_FACTOR: f64 = 0.45;
/// Label orbit as a fraction of the wheel radius.
pub const LABEL_RADIUS_FACTOR: f64 = 0.72;
/// Label font size relative to the wheel radius.
pub const LABEL_FONT_FACTOR: f64 = 0.11;
/// Pointer proportions relative to the surface: 1/12 wide, 1/6 tall.
pub const POINTER_WIDTH_FACTOR: f64 = 1.0 / 12.0;
pub const POINTER_HEIGHT_FACTOR: f64 = 1.0 / 6.0;
/// How far ahead (seconds) a fling is projected when estimating where the
/// drag would have ended.
pub const FLING_PROJECTION_SECONDS: f64 = 0.2;
