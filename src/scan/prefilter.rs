//! Cheap name-only decisions made before a file is opened.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::config::FilterHints;
use crate::lang::Lang;

/// External relevance index keyed by base file name.
pub trait EligibilityIndex: Send + Sync {
    fn contains(&self, base_name: &str) -> bool;
}

impl EligibilityIndex for HashSet<String> {
    fn contains(&self, base_name: &str) -> bool {
        HashSet::contains(self, base_name)
    }
}

impl EligibilityIndex for BTreeSet<String> {
    fn contains(&self, base_name: &str) -> bool {
        BTreeSet::contains(self, base_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotInIndex,
    TestCondition,
    AutogenCondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Proceed,
    Skip(SkipReason),
}

impl Eligibility {
    #[must_use]
    pub fn is_skip(self) -> bool {
        matches!(self, Self::Skip(_))
    }
}

/// Decides from the name alone whether `path` is worth reading.
/// A missing index means every name is eligible.
#[must_use]
pub fn check_name(
    path: &Path,
    lang: Lang,
    index: Option<&dyn EligibilityIndex>,
    hints: &FilterHints,
) -> Eligibility {
    if let Some(index) = index {
        let base = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if !index.contains(&base) {
            return Eligibility::Skip(SkipReason::NotInIndex);
        }
    }

    if hints.test_cond.is_set() {
        let is_test = lang.is_test_file(&path.to_string_lossy());
        if !hints.test_cond.accepts(is_test) {
            return Eligibility::Skip(SkipReason::TestCondition);
        }
    }

    Eligibility::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bool3;

    fn hints(test_cond: Bool3) -> FilterHints {
        FilterHints {
            test_cond,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_index_no_hints() {
        let e = check_name(Path::new("a/b.go"), Lang::Go, None, &FilterHints::default());
        assert_eq!(e, Eligibility::Proceed);
    }

    #[test]
    fn test_index_uses_base_name() {
        let index: HashSet<String> = ["b.go".to_string()].into_iter().collect();
        let hints = FilterHints::default();
        assert_eq!(
            check_name(Path::new("deep/dir/b.go"), Lang::Go, Some(&index), &hints),
            Eligibility::Proceed
        );
        assert_eq!(
            check_name(Path::new("deep/dir/c.go"), Lang::Go, Some(&index), &hints),
            Eligibility::Skip(SkipReason::NotInIndex)
        );
    }

    #[test]
    fn test_test_condition() {
        let test_file = Path::new("x_test.go");
        let plain = Path::new("x.go");
        for (cond, test_ok, plain_ok) in [
            (Bool3::Unset, true, true),
            (Bool3::True, true, false),
            (Bool3::False, false, true),
        ] {
            let h = hints(cond);
            assert_eq!(!check_name(test_file, Lang::Go, None, &h).is_skip(), test_ok);
            assert_eq!(!check_name(plain, Lang::Go, None, &h).is_skip(), plain_ok);
        }
    }

    #[test]
    fn test_index_checked_before_test_condition() {
        let index: BTreeSet<String> = BTreeSet::new();
        let e = check_name(Path::new("x_test.go"), Lang::Go, Some(&index), &hints(Bool3::False));
        assert_eq!(e, Eligibility::Skip(SkipReason::NotInIndex));
    }
}
