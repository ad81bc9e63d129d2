use crate::{
    animation::ease::Ease,
    foundation::{
        core::Fps,
        error::{TimelineError, TimelineResult},
    },
    timing::aligner::DEFAULT_ALIGN_EPSILON,
};

/// Construction parameters handed to a [`Timeline`](crate::Timeline).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Snapping tolerance of the time aligner, in seconds.
    pub align_epsilon: f64,
    /// Frame rate used by frame iteration helpers.
    pub fps: Fps,
    /// Rate function given to leaf animations that do not set one.
    pub default_rate: Ease,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            align_epsilon: DEFAULT_ALIGN_EPSILON,
            fps: Fps::default(),
            default_rate: Ease::Smooth,
        }
    }
}

impl TimelineConfig {
    /// Parse and validate a JSON config; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| TimelineError::serde(format!("invalid timeline config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TimelineError::serde(format!("failed to serialize timeline config: {e}")))
    }

    /// Check value ranges.
    pub fn validate(&self) -> TimelineResult<()> {
        if !self.align_epsilon.is_finite() || self.align_epsilon <= 0.0 {
            return Err(TimelineError::validation(
                "align_epsilon must be finite and > 0",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
