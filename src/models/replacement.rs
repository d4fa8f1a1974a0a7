use serde::{Deserialize, Serialize};

/// A single find/replace rule applied to the raw content before rendering.
/// Rules are applied in order; a rule with an empty `from` or `to` is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReplacement {
    /// The literal text to look for.
    #[serde(default)]
    pub from: String,
    /// The text substituted for every occurrence of `from`.
    #[serde(default)]
    pub to: String,
}

impl WordReplacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether this rule takes part in replacement at all.
    pub fn is_active(&self) -> bool {
        !self.from.is_empty() && !self.to.is_empty()
    }
}
