//! Outstream Configuration

use serde::{Deserialize, Serialize};

use crate::color::{hex_to_rgb, Rgb};

/// Gradient settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// First color of the gradient, as `#rrggbb`.
    pub start: String,

    /// Last color of the gradient. Defaults to `start`.
    pub end: Option<String>,

    /// Number of characters to emit; `0` means one per input character.
    pub steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start: "#ff5f6d".to_string(),
            end: Some("#ffc371".to_string()),
            steps: 0,
        }
    }
}

impl Config {
    pub fn start_rgb(&self) -> Rgb {
        hex_to_rgb(&self.start)
    }

    pub fn end_rgb(&self) -> Option<Rgb> {
        self.end.as_deref().map(hex_to_rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = serde_json::from_str(r##"{ "steps": 12 }"##).unwrap();
        assert_eq!(config.steps, 12);
        assert_eq!(config.start, Config::default().start);
    }

    #[test]
    fn test_null_end_means_solid_color() {
        let config: Config =
            serde_json::from_str(r##"{ "start": "#010203", "end": null }"##).unwrap();
        assert_eq!(config.start_rgb(), Rgb::new(1, 2, 3));
        assert_eq!(config.end_rgb(), None);
    }
}
