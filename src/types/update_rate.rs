//! Subscriber-side rate control for the preview stream

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often a subscription should yield new preview frames.
///
/// The camera pushes previews at its own cadence; a subscriber that renders
/// to a small widget or forwards frames over a slow link can cap its rate
/// and let the newest-wins delivery drop the frames in between.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum UpdateRate {
    /// Every frame the engine completes.
    Native,

    /// At most this many frames per second.
    ///
    /// Ceilings at or above the camera's own rate fall back to [`Native`],
    /// as does a ceiling of 0, which would otherwise mean "never".
    ///
    /// [`Native`]: UpdateRate::Native
    Max(u32),
}

impl UpdateRate {
    /// Resolve the rate against the stream's actual frequency.
    pub fn normalize(self, source_hz: f64) -> Self {
        let UpdateRate::Max(ceiling_hz) = self else {
            return UpdateRate::Native;
        };
        if ceiling_hz == 0 || f64::from(ceiling_hz) >= source_hz {
            return UpdateRate::Native;
        }
        UpdateRate::Max(ceiling_hz)
    }

    /// Whether this rate actually limits a stream running at `source_hz`.
    pub fn needs_throttle(self, source_hz: f64) -> bool {
        self.throttle_interval(source_hz).is_some()
    }

    /// Minimum spacing between yielded frames, `None` when unthrottled.
    pub fn throttle_interval(self, source_hz: f64) -> Option<Duration> {
        match self.normalize(source_hz) {
            UpdateRate::Native => None,
            UpdateRate::Max(ceiling_hz) => {
                Some(Duration::from_secs_f64(1.0 / f64::from(ceiling_hz)))
            }
        }
    }
}
