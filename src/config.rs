use std::time::Duration;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Constants shared with whoever renders the markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    pub frame_id: String,
    pub topic: String,
    pub max_rate_hz: f64,
    /// Sensor units per output meter.
    pub mm_per_meter: f64,
    /// Basis vectors are divided by this before being added to the palm origin.
    pub axis_divisor: f64,
    /// Fingers drawn, counted from the thumb.
    pub finger_count: usize,
    pub finger_arrow_scale: [f64; 3],
    pub axis_arrow_scale: [f64; 3],
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            frame_id: "leap_frame".to_string(),
            topic: "/leap_markers".to_string(),
            max_rate_hz: 20.0,
            mm_per_meter: 1000.0,
            axis_divisor: 100.0,
            finger_count: 4,
            finger_arrow_scale: [0.005, 0.01, 0.02],
            axis_arrow_scale: [0.1, 0.1, 0.1],
        }
    }
}

impl MarkerConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_rate_hz > 0.0 && self.max_rate_hz.is_finite()) {
            bail!("max_rate_hz must be positive, got {}", self.max_rate_hz);
        }
        match Duration::try_from_secs_f64(1.0 / self.max_rate_hz) {
            Ok(interval) if i64::try_from(interval.as_nanos()).is_ok() => {}
            _ => bail!("max_rate_hz {} gives an unusable interval", self.max_rate_hz),
        }
        if !(self.mm_per_meter > 0.0) {
            bail!("mm_per_meter must be positive, got {}", self.mm_per_meter);
        }
        if !(self.axis_divisor > 0.0) {
            bail!("axis_divisor must be positive, got {}", self.axis_divisor);
        }
        if self.finger_count > 5 {
            bail!("a hand has five fingers, finger_count is {}", self.finger_count);
        }
        if self.topic.is_empty() {
            bail!("topic must not be empty");
        }
        Ok(())
    }
}
