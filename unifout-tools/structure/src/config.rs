//! Structure Configuration

use serde::{Deserialize, Serialize};

/// Rendering settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Character whose occurrences in a line give its depth.
    pub marker: char,

    /// Box-drawing style for connectors.
    pub style: TreeStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: '>',
            style: TreeStyle::Unicode,
        }
    }
}

/// Connector style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStyle {
    #[default]
    Unicode,
    Ascii,
}

impl TreeStyle {
    /// Connector before a child that has later siblings.
    pub fn branch(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "├── ",
            TreeStyle::Ascii => "|-- ",
        }
    }

    /// Connector before the last child.
    pub fn last_branch(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "└── ",
            TreeStyle::Ascii => "`-- ",
        }
    }

    /// Prefix continuing a parent that has later siblings.
    pub fn pipe(self) -> &'static str {
        match self {
            TreeStyle::Unicode => "│   ",
            TreeStyle::Ascii => "|   ",
        }
    }

    /// Prefix under the last child.
    pub fn blank(self) -> &'static str {
        "    "
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names() {
        let config: Config = serde_json::from_str(r#"{ "style": "ascii" }"#).unwrap();
        assert_eq!(config.style, TreeStyle::Ascii);
        assert_eq!(config.marker, '>');
        assert!(serde_json::from_str::<Config>(r#"{ "style": "fancy" }"#).is_err());
    }
}
