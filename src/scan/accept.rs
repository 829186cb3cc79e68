//! Per-hit acceptance: filter, count, then materialize.

use tracing::{trace, warn};

use crate::config::WorkerConfig;
use crate::types::Match;

use super::file::FileContext;
use super::materialize;
use super::matcher::{self, FilterContext, FilterExpr, MatchData};
use super::prefilter::EligibilityIndex;
use super::scope::Scope;

/// Receives the matcher's hits for one file.
pub struct Acceptor<'a> {
    config: &'a WorkerConfig,
    file: &'a FileContext,
    filter: &'a dyn FilterExpr,
    index: Option<&'a dyn EligibilityIndex>,
    out: &'a mut Vec<Match>,
    count: usize,
}

impl<'a> Acceptor<'a> {
    #[must_use]
    pub fn new(
        config: &'a WorkerConfig,
        file: &'a FileContext,
        filter: &'a dyn FilterExpr,
        index: Option<&'a dyn EligibilityIndex>,
        out: &'a mut Vec<Match>,
    ) -> Self {
        Self {
            config,
            file,
            filter,
            index,
            out,
            count: 0,
        }
    }

    /// Hits accepted so far, including those not materialized in count mode.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn accept(&mut self, data: MatchData<'_>, scope: &Scope) {
        let ctx = FilterContext {
            config: self.config,
            file: self.file,
            data: &data,
            scope,
            index: self.index,
        };
        if !matcher::accepts(self.filter, &ctx) {
            trace!(
                file = self.file.filename(),
                offset = data.node.start_byte(),
                "hit rejected by filter"
            );
            return;
        }

        self.count += 1;
        if self.config.count_only {
            return;
        }

        match materialize::build_match(self.file, &data, self.config) {
            Some(m) => self.out.push(m),
            None => warn!(
                file = self.file.filename(),
                start = data.node.start_byte(),
                end = data.node.end_byte(),
                "matched node does not belong to the scanned file"
            ),
        }
    }
}
