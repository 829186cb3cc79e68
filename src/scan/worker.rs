//! Worker module for per-file structural search.

use std::ops::ControlFlow;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::WorkerConfig;
use crate::error::{Result, ScanError};
use crate::lang::Lang;
use crate::types::Match;

use super::accept::Acceptor;
use super::autogen;
use super::file::FileContext;
use super::matcher::{FilterExpr, Matcher};
use super::parse::{ParsedFile, SourceParser};
use super::prefilter::{self, Eligibility, EligibilityIndex, SkipReason};
use super::scope::ScopeTracker;
use super::walker::AstWalker;

/// A reusable single-threaded scanning context.
///
/// Files are scanned one after another; matches and error strings pile up
/// until the caller drains them. Run one worker per thread for parallelism,
/// sharing the pattern, filter and index through `Arc`.
pub struct Worker<M: Matcher> {
    id: usize,
    config: WorkerConfig,
    index: Option<Arc<dyn EligibilityIndex>>,
    pattern: Arc<M>,
    state: M::State,
    filter: Arc<dyn FilterExpr>,
    parser: SourceParser,
    matches: Vec<Match>,
    errors: Vec<String>,
}

impl<M: Matcher> Worker<M> {
    /// # Errors
    /// Returns error if the grammar cannot be loaded.
    pub fn new(pattern: Arc<M>, filter: Arc<dyn FilterExpr>, config: WorkerConfig) -> Result<Self> {
        Ok(Self {
            id: 0,
            config,
            index: None,
            pattern,
            state: M::State::default(),
            filter,
            parser: SourceParser::new(Lang::Go)?,
            matches: Vec::new(),
            errors: Vec::new(),
        })
    }

    /// Restricts scanning to files whose base name is in `index`.
    #[must_use]
    pub fn with_index(mut self, index: Arc<dyn EligibilityIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Tags log output from this worker.
    #[must_use]
    pub fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Hands accumulated matches to the caller.
    pub fn take_matches(&mut self) -> Vec<Match> {
        std::mem::take(&mut self.matches)
    }

    /// Per-file failures recorded by [`Worker::scan_files`].
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Scans one file and returns how many hits were accepted.
    ///
    /// Skipped files count zero. Name-based skips never touch the disk.
    ///
    /// # Errors
    /// Returns `ScanError::Io` if the file cannot be read and
    /// `ScanError::Parse` if it is not valid source. No matches are recorded
    /// for a failed file.
    pub fn scan_file(&mut self, path: &Path) -> Result<usize> {
        let lang = self.parser.lang();
        let eligibility =
            prefilter::check_name(path, lang, self.index.as_deref(), &self.config.filters);
        if let Eligibility::Skip(reason) = eligibility {
            debug!(worker = self.id, file = %path.display(), ?reason, "skipped before read");
            return Ok(0);
        }

        let source = std::fs::read(self.config.resolve(path)).map_err(|source| ScanError::Io {
            source,
            path: path.to_path_buf(),
        })?;

        let parsed = self
            .parser
            .parse(path, &source, self.config.needs_comments())?;

        let autogen_cond = self.config.filters.autogen_cond;
        if autogen_cond.is_set() && !autogen_cond.accepts(autogen::is_autogen_file(&parsed)) {
            debug!(
                worker = self.id,
                file = %path.display(),
                reason = ?SkipReason::AutogenCondition,
                "skipped after parse"
            );
            return Ok(0);
        }

        let file = FileContext::new(
            path.to_string_lossy().into_owned(),
            parsed.package.clone(),
            source,
        );
        let n = self.walk(&parsed, &file);
        debug!(worker = self.id, file = file.filename(), matches = n, "scanned");
        Ok(n)
    }

    /// Scans `paths` in order, recording failures instead of stopping.
    /// Returns the total number of accepted hits.
    pub fn scan_files<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut total = 0;
        for path in paths {
            let path = path.as_ref();
            match self.scan_file(path) {
                Ok(n) => total += n,
                Err(err) => {
                    warn!(worker = self.id, error = %err, "file not scanned");
                    self.errors.push(err.to_string());
                }
            }
        }
        total
    }

    fn walk(&mut self, parsed: &ParsedFile, file: &FileContext) -> usize {
        let Self {
            config,
            index,
            pattern,
            state,
            filter,
            parser,
            matches,
            ..
        } = self;

        let walker = AstWalker::new(parser.lang(), parsed.keeps_comments);
        let mut acceptor = Acceptor::new(config, file, &**filter, index.as_deref(), matches);
        let mut scopes = ScopeTracker::new();
        let source = file.source();

        let _ = walker.walk(parsed.root(), |node| {
            let scope = scopes.enter(node, source);
            pattern.match_node(&mut *state, node, source, &mut |data| {
                acceptor.accept(data, scope);
            });
            ControlFlow::Continue(())
        });
        acceptor.count()
    }
}
