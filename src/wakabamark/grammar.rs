//! The wakabamark grammar, assembled from the combinator engine.
//!
//! Each rule is a static matcher value; rules that reference each other
//! (italic calls bold, bold calls italic, and so on) go through
//! [`defer`] so the declaration order of the statics never matters. The
//! host call stack carries the recursion; there is no explicit stack
//! structure and no state beyond the remaining input.
//!
//! Choice is ordered, PEG-style: inside every content rule the first listed
//! alternative wins, and `plain_text` stops before any delimiter character,
//! which is what forces backtracking into the next alternative when a
//! construct fails to close.

use once_cell::sync::Lazy;

use super::ast::{Node, NodeKind};
use super::combinators::{
    and, char_if, char_match, defer, join, maybe, not, number, one_or_more, or, strip, tag, Match,
    Matcher,
};
use super::error::ParseError;

fn asterisk() -> Matcher {
    char_match('*')
}

fn underscore() -> Matcher {
    char_match('_')
}

fn backtick() -> Matcher {
    char_match('`')
}

fn chevron() -> Matcher {
    char_match('>')
}

fn percent() -> Matcher {
    char_match('%')
}

fn digit() -> Matcher {
    char_if(|c| c.is_ascii_digit())
}

fn letter() -> Matcher {
    char_if(|c| c.is_ascii_alphabetic())
}

/// A single italic/bold delimiter character, `*` or `_`.
fn delimiter() -> Matcher {
    or(vec![asterisk(), underscore()])
}

/// Two delimiter characters joined into one token, e.g. `**`.
///
/// The two characters are matched independently, so mixed pairs like `*_`
/// are tolerated; see the delimiter symmetry note on [`italic`].
fn double_delimiter() -> Matcher {
    join(and(vec![delimiter(), delimiter()]))
}

/// The CRLF paragraph separator as one token.
fn separator() -> Matcher {
    join(and(vec![char_match('\r'), char_match('\n')]))
}

/// The `%%` spoiler fence as one token.
fn spoiler_fence() -> Matcher {
    join(and(vec![percent(), percent()]))
}

/// One or more characters that start no markup construct: none of `*`,
/// `_`, `` ` ``, `>`, `%`, nor the CRLF pair. The base case every recursive
/// rule bottoms out in.
static PLAIN_TEXT: Lazy<Matcher> = Lazy::new(|| {
    let markup = or(vec![
        asterisk(),
        underscore(),
        backtick(),
        chevron(),
        percent(),
        separator(),
    ]);
    tag(join(one_or_more(not(markup))), NodeKind::Text)
});

/// `>>248` or `>>board/248`: a chevron pair, then an optional board
/// qualifier (letters plus a slash), then a decimal post number.
static POST_LINK: Lazy<Matcher> = Lazy::new(|| {
    let post_number = number(join(one_or_more(digit())));
    let board = strip(and(vec![join(one_or_more(letter())), char_match('/')]), 0);
    let target = or(vec![
        and(vec![board, post_number.clone()]),
        post_number,
    ]);
    tag(
        strip(and(vec![chevron(), chevron(), target]), 2),
        NodeKind::PostLink,
    )
});

/// A single delimiter, one or more of {plain text, bold, mono, post link},
/// a single delimiter.
///
/// The closing delimiter is matched positionally, not against the opening
/// character, so `*hello_` is accepted; the grammar has never enforced
/// symmetry and the tests pin that down.
static ITALIC: Lazy<Matcher> = Lazy::new(|| {
    let content = one_or_more(or(vec![
        defer(&PLAIN_TEXT),
        defer(&BOLD),
        defer(&MONOSPACE),
        defer(&POST_LINK),
    ]));
    tag(
        strip(and(vec![delimiter(), content, delimiter()]), 1),
        NodeKind::Italic,
    )
});

/// A doubled delimiter, one or more of {plain text, italic, mono, post
/// link}, a doubled delimiter.
static BOLD: Lazy<Matcher> = Lazy::new(|| {
    let content = one_or_more(or(vec![
        defer(&PLAIN_TEXT),
        defer(&ITALIC),
        defer(&MONOSPACE),
        defer(&POST_LINK),
    ]));
    tag(
        strip(and(vec![double_delimiter(), content, double_delimiter()]), 1),
        NodeKind::Bold,
    )
});

/// A backtick, one or more of {plain text, bold, italic, post link}, a
/// backtick.
static MONOSPACE: Lazy<Matcher> = Lazy::new(|| {
    let content = one_or_more(or(vec![
        defer(&PLAIN_TEXT),
        defer(&BOLD),
        defer(&ITALIC),
        defer(&POST_LINK),
    ]));
    tag(
        strip(and(vec![backtick(), content, backtick()]), 1),
        NodeKind::Monospace,
    )
});

/// `%%`, one or more of any inline construct including spoilers themselves,
/// `%%`. The self-reference makes spoilers arbitrarily nestable.
static SPOILER: Lazy<Matcher> = Lazy::new(|| {
    let content = one_or_more(or(vec![
        defer(&PLAIN_TEXT),
        defer(&BOLD),
        defer(&ITALIC),
        defer(&MONOSPACE),
        defer(&POST_LINK),
        defer(&SPOILER),
    ]));
    tag(
        strip(and(vec![spoiler_fence(), content, spoiler_fence()]), 1),
        NodeKind::Spoiler,
    )
});

/// One or more inline constructs, then an optional CRLF separator. The
/// separator is consumed but not retained.
static PARAGRAPH: Lazy<Matcher> = Lazy::new(|| {
    let content = one_or_more(or(vec![
        defer(&PLAIN_TEXT),
        defer(&BOLD),
        defer(&ITALIC),
        defer(&MONOSPACE),
        defer(&POST_LINK),
        defer(&SPOILER),
    ]));
    tag(
        strip(and(vec![content, maybe(separator())]), 0),
        NodeKind::Paragraph,
    )
});

/// One or more paragraphs; the top-level rule.
static DOCUMENT: Lazy<Matcher> = Lazy::new(|| one_or_more(defer(&PARAGRAPH)));

/// The `plain_text` rule as a matcher value.
pub fn plain_text() -> Matcher {
    Lazy::force(&PLAIN_TEXT).clone()
}

/// The `post_link` rule as a matcher value.
pub fn post_link() -> Matcher {
    Lazy::force(&POST_LINK).clone()
}

/// The `italic` rule as a matcher value.
pub fn italic() -> Matcher {
    Lazy::force(&ITALIC).clone()
}

/// The `bold` rule as a matcher value.
pub fn bold() -> Matcher {
    Lazy::force(&BOLD).clone()
}

/// The `mono` rule as a matcher value.
pub fn mono() -> Matcher {
    Lazy::force(&MONOSPACE).clone()
}

/// The `spoiler` rule as a matcher value.
pub fn spoiler() -> Matcher {
    Lazy::force(&SPOILER).clone()
}

/// The `paragraph` rule as a matcher value.
pub fn paragraph() -> Matcher {
    Lazy::force(&PARAGRAPH).clone()
}

/// The top-level `document` rule as a matcher value.
pub fn document() -> Matcher {
    Lazy::force(&DOCUMENT).clone()
}

/// Parses a whole wakabamark source into its sequence of paragraph nodes.
///
/// Fails with [`ParseError::NoParagraph`] when the input cannot form even
/// one paragraph (an empty input, or one opening with a delimiter that
/// never closes), and with [`ParseError::TrailingInput`] when a suffix is
/// left over after the last paragraph; text is never dropped silently.
pub fn parse(input: &str) -> Result<Vec<Node>, ParseError> {
    let (value, rest) = document().apply(input).ok_or(ParseError::NoParagraph)?;
    if !rest.is_empty() {
        return Err(ParseError::TrailingInput {
            offset: input.len() - rest.len(),
        });
    }
    let items = match value {
        Match::Seq(items) => items,
        _ => return Err(ParseError::NoParagraph),
    };
    let mut paragraphs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Match::Node(node) => paragraphs.push(node),
            _ => return Err(ParseError::NoParagraph),
        }
    }
    Ok(paragraphs)
}
