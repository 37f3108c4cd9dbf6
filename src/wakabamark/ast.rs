//! AST nodes produced by the wakabamark grammar.
//!
//! Nodes are plain owned data built bottom-up during a single parse pass and
//! immutable afterwards. Identity is purely structural: a node owns its
//! children outright, so the result is always a tree, never a graph.

use serde::{Deserialize, Serialize};

use super::combinators::Match;

/// The seven node tags of the wakabamark AST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Text,
    Italic,
    Bold,
    Monospace,
    Spoiler,
    PostLink,
    Paragraph,
}

/// A cross-reference to another post, `>>248` or `>>board/248`.
///
/// Only the syntactic shape is captured; whether the referenced post exists
/// is a question for the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    /// Board qualifier, present for the `>>board/number` form.
    pub board: Option<String>,
    /// Decimal post number.
    pub number: u64,
}

impl PostLink {
    /// A bare `>>number` reference on the current board.
    pub fn local(number: u64) -> Self {
        Self {
            board: None,
            number,
        }
    }

    /// A `>>board/number` reference into another board.
    pub fn remote(board: impl Into<String>, number: u64) -> Self {
        Self {
            board: Some(board.into()),
            number,
        }
    }
}

/// Inline node variants of the wakabamark dialect.
///
/// Container variants always hold at least one child; the grammar builds
/// them through `one_or_more`, which never succeeds on zero repetitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Plain text segment with no formatting.
    Text(String),
    /// Italic span delimited by a single `*` or `_`.
    Italic(Vec<Node>),
    /// Bold span delimited by a doubled `*` or `_`.
    Bold(Vec<Node>),
    /// Monospace span delimited by `` ` ``.
    Monospace(Vec<Node>),
    /// Spoiler span delimited by `%%`; spoilers nest inside themselves.
    Spoiler(Vec<Node>),
    /// Post reference, `>>248` or `>>board/248`.
    PostLink(PostLink),
    /// A run of inline content ended by an optional CRLF separator.
    Paragraph(Vec<Node>),
}

impl Node {
    /// Returns the tag of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text(_) => NodeKind::Text,
            Node::Italic(_) => NodeKind::Italic,
            Node::Bold(_) => NodeKind::Bold,
            Node::Monospace(_) => NodeKind::Monospace,
            Node::Spoiler(_) => NodeKind::Spoiler,
            Node::PostLink(_) => NodeKind::PostLink,
            Node::Paragraph(_) => NodeKind::Paragraph,
        }
    }

    /// Returns nested children for container nodes.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Italic(children)
            | Node::Bold(children)
            | Node::Monospace(children)
            | Node::Spoiler(children)
            | Node::Paragraph(children) => Some(children),
            _ => None,
        }
    }

    /// Returns the literal text of a leaf node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` when this node is plain text.
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Builds the node of `kind` from an engine result, checking shape.
    ///
    /// `Text` expects a string, `PostLink` a number or a (board, number)
    /// pair, and every container kind a non-empty sequence of nodes. Any
    /// other shape is a failed match.
    pub(crate) fn from_match(kind: NodeKind, value: Match) -> Option<Node> {
        match (kind, value) {
            (NodeKind::Text, Match::Text(text)) => Some(Node::Text(text)),
            (NodeKind::PostLink, Match::Number(number)) => {
                Some(Node::PostLink(PostLink::local(number)))
            }
            (NodeKind::PostLink, Match::Seq(items)) => {
                let mut items = items.into_iter();
                match (items.next(), items.next(), items.next()) {
                    (Some(Match::Text(board)), Some(Match::Number(number)), None) => {
                        Some(Node::PostLink(PostLink::remote(board, number)))
                    }
                    _ => None,
                }
            }
            (kind, Match::Seq(items)) => {
                let mut children = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Match::Node(node) => children.push(node),
                        _ => return None,
                    }
                }
                if children.is_empty() {
                    return None;
                }
                match kind {
                    NodeKind::Italic => Some(Node::Italic(children)),
                    NodeKind::Bold => Some(Node::Bold(children)),
                    NodeKind::Monospace => Some(Node::Monospace(children)),
                    NodeKind::Spoiler => Some(Node::Spoiler(children)),
                    NodeKind::Paragraph => Some(Node::Paragraph(children)),
                    NodeKind::Text | NodeKind::PostLink => None,
                }
            }
            _ => None,
        }
    }
}
