//! Tunables for a session. Everything the game flow, the pinch detector and
//! the scatter policy need to agree on lives here.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid size at level 1.
    pub initial_grid_size: u32,
    /// Rows/columns added per cleared level.
    pub grid_growth: u32,
    /// Number shown first by the countdown.
    pub countdown_ticks: u8,
    pub countdown_tick_ms: u32,
    /// Delay between a tick firing and the number changing.
    pub countdown_fade_ms: u32,
    /// Pattern stays on screen this long after the countdown ends.
    pub pattern_hold_ms: u32,
    pub hint_peek_ms: u32,
    pub level_advance_ms: u32,
    /// Pinch is active below this fraction of the smaller canvas side.
    pub pinch_ratio: f64,
    pub fallback_width: u32,
    pub fallback_height: u32,
    pub detector: DetectorConfig,
    pub piece_color: String,
}

/// Options handed to the hand-landmark detector verbatim (camelCase on the
/// JS side).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorConfig {
    pub max_num_hands: u32,
    pub min_detection_confidence: f64,
    pub min_tracking_confidence: f64,
    pub model_complexity: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_num_hands: 1,
            min_detection_confidence: 0.6,
            min_tracking_confidence: 0.6,
            model_complexity: 0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_grid_size: 5,
            grid_growth: 1,
            countdown_ticks: 3,
            countdown_tick_ms: 400,
            countdown_fade_ms: 100,
            pattern_hold_ms: 400,
            hint_peek_ms: 100,
            level_advance_ms: 700,
            pinch_ratio: 0.05,
            fallback_width: 640,
            fallback_height: 480,
            detector: DetectorConfig::default(),
            piece_color: "rgba(217, 0, 255, 0.67)".to_string(),
        }
    }
}

impl GameConfig {
    /// Grid size for a 1-based level.
    pub fn grid_size_for_level(&self, level: u32) -> u32 {
        self.initial_grid_size + level.saturating_sub(1) * self.grid_growth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_grows_by_one_per_level() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.grid_size_for_level(1), 5);
        assert_eq!(cfg.grid_size_for_level(2), 6);
        assert_eq!(cfg.grid_size_for_level(10), 14);
    }

    #[test]
    fn detector_options_serialize_camel_case() {
        let json = serde_json::to_string(&DetectorConfig::default()).unwrap();
        assert!(json.contains("\"maxNumHands\":1"));
        assert!(json.contains("\"modelComplexity\":0"));
        assert!(json.contains("\"minDetectionConfidence\":0.6"));
    }
}
