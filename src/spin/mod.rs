use thiserror::Error;

pub mod resolver;
pub mod sector;

pub use resolver::{DragSample, Easing, Phase, SpinPlan, SpinResolver, SpinToken};
pub use sector::{SectorLayout, sector_color};

pub const FULL_TURN: f64 = 360.0;
pub const HALF_TURN: f64 = 180.0;
/// Divisor turning a fling distance (px) into the unitless velocity factor.
pub const FLING_DIVISOR: f64 = 400.0;
/// Shortest allowed spin, so slow drags still animate instead of snapping.
pub const MIN_SPIN_SECONDS: f64 = 0.2;
/// Fling magnitude range (px) used when a spin is started by command
/// rather than by a gesture.
pub const COMMAND_FLING_MIN: f64 = 1500.0;
pub const COMMAND_FLING_MAX: f64 = 2500.0;
/// Fraction of a sector width added to rendered arcs to hide the seam
/// between neighbors. Rendering-only; never enters the angle math.
pub const SEAM_OVERLAP: f64 = 0.25;
pub const DEFAULT_SECTOR_COUNT: usize = 6;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelError {
    #[error("wheel has no sectors")]
    Empty,
    #[error("a spin is already in progress")]
    Busy,
    #[error("sector index {index} out of range for {count} sectors")]
    OutOfRange { index: usize, count: usize },
}
