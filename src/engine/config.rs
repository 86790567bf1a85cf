use crate::{
    foundation::core::DrawRect,
    foundation::error::{TesseraError, TesseraResult},
};

/// Engine configuration, passed by value at construction.
///
/// Every field has a default, so a partial JSON object is a valid configuration. The
/// camelCase spellings used by page embeds are accepted as aliases.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum delay between pattern spawns, in milliseconds.
    #[serde(alias = "timeBetweenPatterns")]
    pub time_between_patterns: f64,
    /// Delay between square placements, in milliseconds.
    #[serde(alias = "timeBetweenSquares")]
    pub time_between_squares: f64,
    /// Completed patterns kept on screen before the oldest is erased.
    #[serde(alias = "maxPatterns")]
    pub max_patterns: usize,
    /// Regions patterns may be spawned in. Empty means the whole surface.
    #[serde(alias = "drawRects", alias = "drawrects")]
    pub draw_rects: Vec<DrawRect>,
    /// Emit diagnostic logging.
    #[serde(alias = "debugMode")]
    pub debug_mode: bool,
    /// Stop requesting frames after this many ticks; 0 runs unbounded.
    #[serde(alias = "limitFrames")]
    pub limit_frames: u64,
    /// Seed for the random source; absent uses OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_between_patterns: 600.0,
            time_between_squares: 200.0,
            max_patterns: 10,
            draw_rects: Vec::new(),
            debug_mode: false,
            limit_frames: 0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(s: &str) -> TesseraResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check timings and regions.
    pub fn validate(&self) -> TesseraResult<()> {
        for (name, v) in [
            ("time_between_patterns", self.time_between_patterns),
            ("time_between_squares", self.time_between_squares),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(TesseraError::config(format!(
                    "{name} must be a finite, non-negative number of milliseconds (got {v})"
                )));
            }
        }
        for rect in &self.draw_rects {
            rect.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/config.rs"]
mod tests;
