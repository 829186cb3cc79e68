use tree_sitter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Go,
}

impl Lang {
    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Go => tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// File name suffix marking a test file.
    #[must_use]
    pub fn test_suffix(self) -> &'static str {
        match self {
            Self::Go => "_test.go",
        }
    }

    #[must_use]
    pub fn comment_kind(self) -> &'static str {
        match self {
            Self::Go => "comment",
        }
    }

    #[must_use]
    pub fn is_test_file(self, filename: &str) -> bool {
        filename.ends_with(self.test_suffix())
    }
}
