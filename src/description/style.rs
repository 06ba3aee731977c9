//! Style hints attached to a description.

use serde::{Deserialize, Serialize};

/// Suggested style tokens, cycled by series index.
///
/// An absent list means "use the compiler default cycle and do not force
/// explicit attributes on series that do not ask for one".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleHint {
    /// Line styles (`-`, `--`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
    /// Colors in any form the plotting library accepts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// Marker symbols.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markers: Option<Vec<String>>,
}

impl StyleHint {
    /// True if no list is present.
    pub fn is_empty(&self) -> bool {
        self.lines.is_none() && self.colors.is_none() && self.markers.is_none()
    }
}
