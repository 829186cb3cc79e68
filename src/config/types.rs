use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Three-valued prefilter condition. `Unset` means "don't care".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bool3 {
    #[default]
    Unset,
    True,
    False,
}

impl Bool3 {
    #[must_use]
    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Returns `true` if `value` satisfies the condition. `Unset` accepts both.
    #[must_use]
    pub fn accepts(self, value: bool) -> bool {
        match self {
            Self::Unset => true,
            Self::True => value,
            Self::False => !value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterHints {
    /// Whether the file must (or must not) be a test file.
    #[serde(default, rename = "test")]
    pub test_cond: Bool3,
    /// Whether the file must (or must not) be autogenerated.
    #[serde(default, rename = "autogen")]
    pub autogen_cond: Bool3,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Count accepted hits without building match records.
    #[serde(default)]
    pub count_only: bool,
    #[serde(default)]
    pub need_capture: bool,
    /// Expand match text to the full enclosing source line(s).
    #[serde(default)]
    pub need_match_line: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
    #[serde(default)]
    pub filters: FilterHints,
}
