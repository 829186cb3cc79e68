// src/scan/matcher.rs
//! Seams to the pattern engine and the secondary filter evaluator.
//!
//! Both collaborators are consumed as capabilities: the worker never
//! inspects a pattern or a filter beyond these traits, so test doubles and
//! real engines are interchangeable.

use tree_sitter::Node;

use crate::config::WorkerConfig;

use super::file::FileContext;
use super::parse::Comment;
use super::prefilter::EligibilityIndex;
use super::scope::Scope;

/// A syntax element bound by a pattern variable.
#[derive(Debug, Clone)]
pub enum SyntaxRef<'t> {
    Node(Node<'t>),
    /// A list binding. Empty for the "nothing matched here" placeholder.
    Nodes(Vec<Node<'t>>),
    /// A synthesized comment carrying its own text.
    Comment(Comment),
}

impl SyntaxRef<'_> {
    /// Byte span, `None` for an empty node list.
    #[must_use]
    pub fn span(&self) -> Option<(usize, usize)> {
        match self {
            Self::Node(n) => Some((n.start_byte(), n.end_byte())),
            Self::Nodes(list) => {
                let first = list.first()?;
                let last = list.last()?;
                Some((first.start_byte(), last.end_byte()))
            }
            Self::Comment(c) => Some((c.start, c.end)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Capture<'t> {
    pub name: String,
    pub target: SyntaxRef<'t>,
}

/// One successful structural match reported by a [`Matcher`].
#[derive(Debug, Clone)]
pub struct MatchData<'t> {
    pub node: Node<'t>,
    pub captures: Vec<Capture<'t>>,
}

impl<'t> MatchData<'t> {
    #[must_use]
    pub fn new(node: Node<'t>) -> Self {
        Self {
            node,
            captures: Vec::new(),
        }
    }

    #[must_use]
    pub fn capture(&self, name: &str) -> Option<&SyntaxRef<'t>> {
        self.captures
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.target)
    }
}

/// A compiled pattern. Shared read-only between workers; anything mutable
/// during matching lives in `State`, which each worker owns.
pub trait Matcher: Send + Sync {
    type State: Default + Send;

    /// Attempts a match rooted at `node`, calling `on_match` once per hit.
    fn match_node<'t>(
        &self,
        state: &mut Self::State,
        node: Node<'t>,
        source: &[u8],
        on_match: &mut dyn FnMut(MatchData<'t>),
    );
}

/// What a filter expression sees for one hit.
pub struct FilterContext<'a, 't> {
    pub config: &'a WorkerConfig,
    pub file: &'a FileContext,
    pub data: &'a MatchData<'t>,
    /// Declaration the hit sits in.
    pub scope: &'a Scope,
    /// The worker's eligibility index, if one was attached.
    pub index: Option<&'a dyn EligibilityIndex>,
}

impl FilterContext<'_, '_> {
    /// Source text of a capture, if the pattern bound `name`.
    #[must_use]
    pub fn capture_text(&self, name: &str) -> Option<String> {
        let target = self.data.capture(name)?;
        Some(String::from_utf8_lossy(&self.file.node_text(target)).into_owned())
    }
}

/// Secondary predicate over accepted hits. Must be side-effect free.
pub trait FilterExpr: Send + Sync {
    /// The distinguished always-accept expression. Never evaluated.
    fn is_nop(&self) -> bool {
        false
    }

    fn eval(&self, ctx: &FilterContext<'_, '_>, node: Node<'_>) -> bool;
}

/// Accepts every hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopFilter;

impl FilterExpr for NopFilter {
    fn is_nop(&self) -> bool {
        true
    }

    fn eval(&self, _ctx: &FilterContext<'_, '_>, _node: Node<'_>) -> bool {
        true
    }
}

/// Adapts a closure into a filter expression.
pub struct FnFilter<F>(F);

impl<F> FnFilter<F>
where
    F: Fn(&FilterContext<'_, '_>, Node<'_>) -> bool + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> FilterExpr for FnFilter<F>
where
    F: Fn(&FilterContext<'_, '_>, Node<'_>) -> bool + Send + Sync,
{
    fn eval(&self, ctx: &FilterContext<'_, '_>, node: Node<'_>) -> bool {
        (self.0)(ctx, node)
    }
}

/// Applies `filter` to a hit, short-circuiting the no-op expression.
#[must_use]
pub fn accepts(filter: &dyn FilterExpr, ctx: &FilterContext<'_, '_>) -> bool {
    filter.is_nop() || filter.eval(ctx, ctx.data.node)
}
