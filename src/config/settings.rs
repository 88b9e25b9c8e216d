use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Write debug logs to a file (a TUI owns the terminal, so logs
    /// never go to stdout)
    #[serde(default)]
    pub debug: bool,

    /// Override the debug log location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log_path: Option<String>,

    /// Tunables for the simulated search
    #[serde(default)]
    pub search: SearchTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            debug_log_path: None,
            search: SearchTuning::default(),
        }
    }
}

/// Knobs controlling the simulated search provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTuning {
    /// Lower bound of the simulated lookup delay
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    /// Upper bound of the simulated lookup delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Probability in [0, 1] that a search fails with a simulated outage
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl SearchTuning {
    /// Clamp hand-edited values into a usable range.
    pub fn normalized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.failure_rate) {
            tracing::warn!(
                failure_rate = self.failure_rate,
                "failure_rate outside [0, 1], clamping"
            );
            self.failure_rate = self.failure_rate.clamp(0.0, 1.0);
        }
        if self.max_delay_ms < self.min_delay_ms {
            tracing::warn!(
                min = self.min_delay_ms,
                max = self.max_delay_ms,
                "delay window inverted, swapping bounds"
            );
            std::mem::swap(&mut self.min_delay_ms, &mut self.max_delay_ms);
        }
        self
    }
}

fn default_min_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    2000
}

fn default_failure_rate() -> f64 {
    0.1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(!config.debug);
        assert_eq!(config.search.min_delay_ms, 1000);
        assert_eq!(config.search.max_delay_ms, 2000);
        assert_eq!(config.search.failure_rate, 0.1);
    }

    #[test]
    fn partial_search_section_fills_missing_fields() {
        let config: Config = toml::from_str("[search]\nfailure_rate = 0.0\n").unwrap();
        assert_eq!(config.search.failure_rate, 0.0);
        assert_eq!(config.search.min_delay_ms, 1000);
    }

    #[test]
    fn normalized_swaps_inverted_window_and_clamps_rate() {
        let tuning = SearchTuning {
            min_delay_ms: 300,
            max_delay_ms: 100,
            failure_rate: -0.5,
        }
        .normalized();

        assert_eq!(tuning.min_delay_ms, 100);
        assert_eq!(tuning.max_delay_ms, 300);
        assert_eq!(tuning.failure_rate, 0.0);
    }
}
