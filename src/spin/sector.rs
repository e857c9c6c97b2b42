use super::{FULL_TURN, SEAM_OVERLAP, WheelError};
use palette::Srgba;

/// Maps an ordered item collection onto equal angular sectors. Derived
/// geometry only; the items themselves live with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorLayout {
    count: usize,
}

impl SectorLayout {
    pub fn new(count: usize) -> Result<Self, WheelError> {
        if count == 0 {
            return Err(WheelError::Empty);
        }
        Ok(Self { count })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn sector_width(&self) -> f64 {
        FULL_TURN / self.count as f64
    }

    pub fn start_angle(&self, index: usize) -> f64 {
        index as f64 * self.sector_width()
    }

    /// Rendered arc sweep relative to the sector's start angle. Every
    /// sector but the last extends a quarter width past its end so that
    /// adjacent fills leave no visible seam.
    pub fn arc_bounds(&self, index: usize) -> (f64, f64) {
        let width = self.sector_width();
        let overlap = if index + 1 == self.count {
            0.0
        } else {
            width * SEAM_OVERLAP
        };
        (-width / 2.0, width / 2.0 + overlap)
    }

    /// Nearest sector-boundary multiple, so the pointer always lands
    /// centered on a sector.
    pub fn nearest_stop(&self, rotation: f64) -> f64 {
        let width = self.sector_width();
        (rotation / width).round() * width
    }

    /// Index of the sector under the fixed top pointer when the wheel is
    /// rotated by `rotation` degrees. The sectors rotate beneath the
    /// pointer, hence the subtraction from the count.
    pub fn landed_index(&self, rotation: f64) -> usize {
        let width = self.sector_width();
        let steps = ((rotation % FULL_TURN) / width).round() as i64;
        (self.count as i64 - steps).rem_euclid(self.count as i64) as usize
    }
}

/// Color for a sector, cycling through the palette. The palette must be
/// non-empty; the config layer guarantees that.
pub fn sector_color(palette: &[Srgba<f64>], index: usize) -> Srgba<f64> {
    palette[index % palette.len()]
}
