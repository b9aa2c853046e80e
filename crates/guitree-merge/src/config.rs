use serde::{Deserialize, Serialize};

/// Policy switches for a merge pass.
///
/// The default reproduces the plain merge rules: base separators only
/// collapse against an immediately preceding weak separator, and a trailing
/// weak separator is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Copy an overlay container's attributes onto its base counterpart.
    pub merge_attributes: bool,
    /// Drop a base separator that opens its container or follows a Text
    /// element.
    pub drop_leading_separators: bool,
    /// After a container is merged, drop its last child if that is a weak
    /// separator.
    pub drop_trailing_weak_separator: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            merge_attributes: true,
            drop_leading_separators: false,
            drop_trailing_weak_separator: false,
        }
    }
}

impl MergeConfig {
    /// The default rules.
    pub fn literal() -> Self {
        Self::default()
    }

    /// Default rules plus both separator clean-ups, so merged menus never
    /// open or close with a base divider.
    pub fn classic() -> Self {
        Self {
            drop_leading_separators: true,
            drop_trailing_weak_separator: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        assert_eq!(MergeConfig::literal(), MergeConfig::default());
        let classic = MergeConfig::classic();
        assert!(classic.drop_leading_separators);
        assert!(classic.drop_trailing_weak_separator);
        assert!(classic.merge_attributes);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: MergeConfig = toml::from_str("drop_trailing_weak_separator = true").unwrap();
        assert!(config.drop_trailing_weak_separator);
        assert!(!config.drop_leading_separators);
        assert!(config.merge_attributes);
    }
}
