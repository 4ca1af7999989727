// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Analyzer settings.

/// How a list literal gets its element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ListLiteralPolicy {
    /// The type of the last element wins. Elements are not compared.
    #[default]
    LastElement,
    /// Element types must unify; a mismatch is reported.
    Unify,
}

/// What happens to the variables of a quantified function once it is
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QuantifierPolicy {
    /// The result stays quantified over every original variable.
    #[default]
    KeepAll,
    /// Variables no longer free in the result are dropped.
    Prune,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalyzerConfig {
    pub list_literals: ListLiteralPolicy,
    pub quantifiers: QuantifierPolicy,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: AnalyzerConfig = serde_json::from_str(r#"{"list_literals": "unify"}"#).unwrap();
        assert_eq!(config.list_literals, ListLiteralPolicy::Unify);
        assert_eq!(config.quantifiers, QuantifierPolicy::KeepAll);
    }
}
