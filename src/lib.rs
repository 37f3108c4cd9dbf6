//! # wakabamark
//!
//! A parser for the wakabamark inline markup dialect used on imageboards:
//! bold, italic, monospace, spoilers, `>>` post links, and paragraphs.
//!
//! The crate has two layers. The combinator engine
//! ([`wakabamark::combinators`]) provides primitive character matchers and
//! the composition rules (`and`, `or`, `one_or_more`, ...) that build larger
//! matchers out of smaller ones, with no knowledge of markup. The grammar
//! ([`wakabamark::grammar`]) assembles those primitives into a set of
//! mutually recursive rules producing a typed AST ([`wakabamark::ast`]).
//!
//! The contract is a single input (the markup source) and a single output
//! (a sequence of paragraph nodes). Rendering the AST, loading sources and
//! validating post references are left to consumers.

pub mod wakabamark;

pub use wakabamark::ast::{Node, NodeKind, PostLink};
pub use wakabamark::error::ParseError;
pub use wakabamark::grammar::parse;
