use crate::input::Direction;
use crate::sensor::TiltSample;

/// Tilt magnitude (raw sensor units) an axis must cross to register a turn.
pub const DEFAULT_TILT_THRESHOLD: i16 = 8500;

/// Per-axis offsets added to raw samples before thresholding.
///
/// Compensates for a sensor that does not read zero when the device rests
/// flat. Offsets are determined empirically per device.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Calibration {
    pub offset_x: i16,
    pub offset_y: i16,
}

/// Maps tilt samples to candidate headings.
#[derive(Debug, Clone, Copy)]
pub struct TiltResolver {
    pub calibration: Calibration,
    pub threshold: i16,
}

impl Default for TiltResolver {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            threshold: DEFAULT_TILT_THRESHOLD,
        }
    }
}

impl TiltResolver {
    /// Resolves one tilt sample against the current heading.
    ///
    /// Returns `None` when no axis crosses the threshold, or when every
    /// crossing axis would reverse the current heading. When both axes
    /// cross at once the y axis wins because it is evaluated last;
    /// last-write-wins is kept for compatibility with the established
    /// control feel, it is not a priority scheme.
    #[must_use]
    pub fn resolve(&self, sample: TiltSample, current: Direction) -> Option<Direction> {
        let x = sample.x.saturating_add(self.calibration.offset_x);
        let y = sample.y.saturating_add(self.calibration.offset_y);

        let mut candidate = None;

        if x > self.threshold && current != Direction::Down {
            candidate = Some(Direction::Up);
        }
        if x < -self.threshold && current != Direction::Up {
            candidate = Some(Direction::Down);
        }

        if y > self.threshold && current != Direction::Right {
            candidate = Some(Direction::Left);
        }
        if y < -self.threshold && current != Direction::Left {
            candidate = Some(Direction::Right);
        }

        candidate
    }
}
