//! Node factories for writing expected trees in tests.
//!
//! Assertions against parsed output read best when the expected AST is
//! spelled out declaratively; these constructors keep that spelling short.

use super::ast::{Node, PostLink};

/// A plain text leaf.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

/// An italic span over `children`.
pub fn italic(children: Vec<Node>) -> Node {
    Node::Italic(children)
}

/// A bold span over `children`.
pub fn bold(children: Vec<Node>) -> Node {
    Node::Bold(children)
}

/// A monospace span over `children`.
pub fn mono(children: Vec<Node>) -> Node {
    Node::Monospace(children)
}

/// A spoiler span over `children`.
pub fn spoiler(children: Vec<Node>) -> Node {
    Node::Spoiler(children)
}

/// A bare `>>number` post link.
pub fn post_link(number: u64) -> Node {
    Node::PostLink(PostLink::local(number))
}

/// A `>>board/number` post link.
pub fn board_link(board: impl Into<String>, number: u64) -> Node {
    Node::PostLink(PostLink::remote(board, number))
}

/// A paragraph over `children`.
pub fn paragraph(children: Vec<Node>) -> Node {
    Node::Paragraph(children)
}
