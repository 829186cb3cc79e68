// src/scan/mod.rs
//! Per-file scan pipeline: prefilter, parse, autogen check, walk, accept,
//! materialize.

pub mod accept;
pub mod autogen;
pub mod file;
pub mod materialize;
pub mod matcher;
pub mod parse;
pub mod position;
pub mod prefilter;
pub mod printer;
pub mod scope;
pub mod walker;
pub mod worker;

pub use file::FileContext;
pub use matcher::{
    Capture, FilterContext, FilterExpr, FnFilter, MatchData, Matcher, NopFilter, SyntaxRef,
};
pub use prefilter::EligibilityIndex;
pub use scope::Scope;
pub use worker::Worker;
