//! Parser combinator primitives for building the wakabamark grammar.
//!
//! A [`Matcher`] is an immutable value: applied to the remaining input it
//! either fails (plain `None`, an expected and frequently taken branch) or
//! yields a [`Match`] plus the unconsumed suffix of the input. Nothing in
//! this module knows about markup; the grammar assembles these primitives
//! into rules.
//!
//! Matchers never mutate their input. They receive a `&str` and hand back a
//! subslice of it, so the caller's original text is untouched and the same
//! matcher applied to the same text always yields the same outcome.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::ast::{Node, NodeKind};

/// Result value produced by a successful matcher.
///
/// The shapes mirror what composition can produce: a single character from
/// the literal primitives, a string after [`join`], a number after
/// [`number`], an ordered sequence from [`and`] and [`one_or_more`], an AST
/// node after [`tag`], and the explicit absence marker from [`maybe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    Char(char),
    Text(String),
    Number(u64),
    Seq(Vec<Match>),
    Node(Node),
    Absent,
}

/// Outcome of applying a matcher: the result plus the remaining input, or
/// `None` for "no match here".
pub type MatchResult<'a> = Option<(Match, &'a str)>;

/// A composable matcher over remaining input text.
///
/// Matchers are cheap to clone (shared function under an `Arc`) and carry no
/// mutable state, so a single instance may be applied from multiple threads
/// without synchronization.
#[derive(Clone)]
pub struct Matcher {
    run: Arc<dyn for<'a> Fn(&'a str) -> MatchResult<'a> + Send + Sync>,
}

impl Matcher {
    /// Wraps a matching function into a composable value.
    pub fn new<F>(run: F) -> Self
    where
        F: for<'a> Fn(&'a str) -> MatchResult<'a> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    /// Applies this matcher to the remaining input.
    pub fn apply<'a>(&self, input: &'a str) -> MatchResult<'a> {
        (self.run)(input)
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Matcher")
    }
}

/// Matches exactly `expected` as the first character, consuming it.
pub fn char_match(expected: char) -> Matcher {
    Matcher::new(move |input| {
        let first = input.chars().next()?;
        if first == expected {
            Some((Match::Char(first), &input[first.len_utf8()..]))
        } else {
            None
        }
    })
}

/// Matches any first character satisfying `test`, consuming it.
///
/// The class variant of [`char_match`], used for "is ASCII digit" and
/// "is ASCII letter" terminals.
pub fn char_if(test: fn(char) -> bool) -> Matcher {
    Matcher::new(move |input| {
        let first = input.chars().next()?;
        if test(first) {
            Some((Match::Char(first), &input[first.len_utf8()..]))
        } else {
            None
        }
    })
}

/// Succeeds iff the input is non-empty and `inner` fails at this position.
///
/// Consumes exactly one character of its own; `inner` is only probed to
/// decide pass/fail, never for its consumption. Reads as "any character not
/// starting construct `inner`".
pub fn not(inner: Matcher) -> Matcher {
    Matcher::new(move |input| {
        let first = input.chars().next()?;
        if inner.apply(input).is_some() {
            return None;
        }
        Some((Match::Char(first), &input[first.len_utf8()..]))
    })
}

/// Ordered sequence: every part must match in turn, each consuming from the
/// remainder left by the previous one.
///
/// Yields the ordered [`Match::Seq`] of sub-results. Failure is atomic: the
/// caller's input slice is untouched, so the next alternative of a governing
/// [`or`] retries from the original position.
pub fn and(parts: Vec<Matcher>) -> Matcher {
    Matcher::new(move |input| {
        let mut results = Vec::with_capacity(parts.len());
        let mut rest = input;
        for part in &parts {
            let (value, next) = part.apply(rest)?;
            results.push(value);
            rest = next;
        }
        Some((Match::Seq(results), rest))
    })
}

/// Ordered choice: tries each alternative against the same starting input
/// and returns the first success.
///
/// Listing order is the sole disambiguation mechanism; there is no
/// longest-match rule.
pub fn or(alternatives: Vec<Matcher>) -> Matcher {
    Matcher::new(move |input| alternatives.iter().find_map(|alt| alt.apply(input)))
}

/// Greedy repetition requiring at least one success.
///
/// Applies `inner` until it fails and yields the [`Match::Seq`] of collected
/// results. Never gives characters back to let a later combinator succeed.
pub fn one_or_more(inner: Matcher) -> Matcher {
    Matcher::new(move |input| {
        let (first, mut rest) = inner.apply(input)?;
        let mut results = vec![first];
        while let Some((value, next)) = inner.apply(rest) {
            // Zero-width matches must not repeat forever.
            if next.len() == rest.len() {
                break;
            }
            results.push(value);
            rest = next;
        }
        Some((Match::Seq(results), rest))
    })
}

/// Optional match: yields the inner result or [`Match::Absent`], never
/// failing and never consuming on absence.
pub fn maybe(inner: Matcher) -> Matcher {
    Matcher::new(move |input| inner.apply(input).or(Some((Match::Absent, input))))
}

/// Concatenates a sequence of characters (or already-joined strings) into a
/// single [`Match::Text`]; any other result shape fails.
pub fn join(inner: Matcher) -> Matcher {
    Matcher::new(move |input| {
        let (value, rest) = inner.apply(input)?;
        let items = match value {
            Match::Seq(items) => items,
            _ => return None,
        };
        let mut text = String::new();
        for item in items {
            match item {
                Match::Char(ch) => text.push(ch),
                Match::Text(s) => text.push_str(&s),
                _ => return None,
            }
        }
        Some((Match::Text(text), rest))
    })
}

/// Splices one level of nested sequences into a single ordered sequence.
///
/// Non-sequence elements are kept as-is; a non-sequence overall result
/// fails.
pub fn flatten(inner: Matcher) -> Matcher {
    Matcher::new(move |input| {
        let (value, rest) = inner.apply(input)?;
        let items = match value {
            Match::Seq(items) => items,
            _ => return None,
        };
        let mut flat = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Match::Seq(nested) => flat.extend(nested),
                other => flat.push(other),
            }
        }
        Some((Match::Seq(flat), rest))
    })
}

/// Projects element `index` out of a sequence result, discarding the rest.
///
/// Fails unless the sequence has more than `index` elements. Used to drop
/// delimiter tokens and keep only the payload between them.
pub fn strip(inner: Matcher, index: usize) -> Matcher {
    Matcher::new(move |input| {
        let (value, rest) = inner.apply(input)?;
        match value {
            Match::Seq(items) if items.len() > index => {
                Some((items.into_iter().nth(index)?, rest))
            }
            _ => None,
        }
    })
}

/// Converts a digit string result into a [`Match::Number`].
///
/// Fails on an empty string, a non-digit character, or overflow. Upstream
/// matchers normally admit digits only, but the conversion stays total.
pub fn number(inner: Matcher) -> Matcher {
    Matcher::new(move |input| {
        let (value, rest) = inner.apply(input)?;
        let text = match value {
            Match::Text(text) => text,
            _ => return None,
        };
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let parsed = text.parse::<u64>().ok()?;
        Some((Match::Number(parsed), rest))
    })
}

/// Wraps a matcher's result into the AST node of the given kind.
///
/// The shape check lives in [`Node::from_match`]; a result that does not fit
/// the kind fails the match.
pub fn tag(inner: Matcher, kind: NodeKind) -> Matcher {
    Matcher::new(move |input| {
        let (value, rest) = inner.apply(input)?;
        let node = Node::from_match(kind, value)?;
        Some((Match::Node(node), rest))
    })
}

/// Deferred binding for mutually recursive rules.
///
/// Grammar rules reference siblings that are textually defined later; going
/// through the `Lazy` cell at match time breaks the declaration-order cycle
/// without constructing any rule more than once.
pub fn defer(rule: &'static Lazy<Matcher>) -> Matcher {
    Matcher::new(move |input| Lazy::force(rule).apply(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_match_fails_without_match() {
        let matcher = char_match('$');
        assert_eq!(matcher.apply("hello"), None);
    }

    #[test]
    fn char_match_fails_on_empty_input() {
        let matcher = char_match('$');
        assert_eq!(matcher.apply(""), None);
    }

    #[test]
    fn char_match_returns_char_and_rest() {
        let matcher = char_match('$');
        assert_eq!(matcher.apply("$hello"), Some((Match::Char('$'), "hello")));
    }

    #[test]
    fn char_match_leaves_the_source_untouched() {
        let source = String::from("$hello");
        let matcher = char_match('$');

        matcher.apply(&source);

        assert_eq!(source, "$hello");
    }

    #[test]
    fn char_if_matches_a_class() {
        let digit = char_if(|c| c.is_ascii_digit());
        assert_eq!(digit.apply("7b"), Some((Match::Char('7'), "b")));
        assert_eq!(digit.apply("b7"), None);
    }

    #[test]
    fn not_negates_a_matcher() {
        let matcher = not(char_match('*'));

        assert_eq!(matcher.apply(""), None);
        assert_eq!(matcher.apply("*hello"), None);
        assert_eq!(matcher.apply("hello"), Some((Match::Char('h'), "ello")));
    }

    #[test]
    fn and_checks_every_part_in_order() {
        let matcher = and(vec![char_match('*'), char_match('*')]);

        assert_eq!(matcher.apply("*hello"), None);
        assert_eq!(
            matcher.apply("**hello"),
            Some((
                Match::Seq(vec![Match::Char('*'), Match::Char('*')]),
                "hello"
            ))
        );
    }

    #[test]
    fn or_takes_the_first_success() {
        let matcher = or(vec![char_match('*'), char_match('_')]);

        assert_eq!(matcher.apply("hello"), None);
        assert_eq!(matcher.apply("_hello"), Some((Match::Char('_'), "hello")));
        assert_eq!(matcher.apply("*_hello"), Some((Match::Char('*'), "_hello")));
    }

    #[test]
    fn one_or_more_collects_greedily() {
        let matcher = one_or_more(char_match('*'));

        assert_eq!(matcher.apply("hello"), None);
        assert_eq!(
            matcher.apply("*hello"),
            Some((Match::Seq(vec![Match::Char('*')]), "hello"))
        );
        assert_eq!(
            matcher.apply("***hello"),
            Some((
                Match::Seq(vec![Match::Char('*'), Match::Char('*'), Match::Char('*')]),
                "hello"
            ))
        );
    }

    #[test]
    fn one_or_more_never_succeeds_on_zero_repetitions() {
        let matcher = one_or_more(char_match('*'));
        assert_eq!(matcher.apply("hello"), None);
        assert_eq!(matcher.apply(""), None);
    }

    #[test]
    fn maybe_returns_absent_instead_of_failing() {
        let matcher = maybe(char_match('*'));

        assert_eq!(matcher.apply("*a"), Some((Match::Char('*'), "a")));
        assert_eq!(matcher.apply("a"), Some((Match::Absent, "a")));
        assert_eq!(matcher.apply(""), Some((Match::Absent, "")));
    }

    #[test]
    fn join_concatenates_characters() {
        let matcher = join(one_or_more(char_match('*')));

        assert_eq!(matcher.apply("hello"), None);
        assert_eq!(
            matcher.apply("***hello"),
            Some((Match::Text("***".into()), "hello"))
        );
    }

    #[test]
    fn join_rejects_non_character_results() {
        let matcher = join(maybe(char_match('*')));
        assert_eq!(matcher.apply("hello"), None);
    }

    #[test]
    fn flatten_splices_one_level() {
        let doubled = and(vec![char_match('*'), char_match('*')]);
        let matcher = flatten(and(vec![doubled, char_match('_')]));

        assert_eq!(
            matcher.apply("**_x"),
            Some((
                Match::Seq(vec![Match::Char('*'), Match::Char('*'), Match::Char('_')]),
                "x"
            ))
        );
    }

    #[test]
    fn strip_projects_the_payload() {
        let matcher = strip(
            and(vec![char_match('('), char_match('x'), char_match(')')]),
            1,
        );

        assert_eq!(matcher.apply("(x)rest"), Some((Match::Char('x'), "rest")));
        assert_eq!(matcher.apply("(y)rest"), None);
    }

    #[test]
    fn strip_fails_when_index_is_out_of_bounds() {
        let matcher = strip(and(vec![char_match('a'), char_match('b')]), 2);
        assert_eq!(matcher.apply("ab"), None);
    }

    #[test]
    fn number_converts_digit_strings() {
        let matcher = number(join(one_or_more(char_if(|c| c.is_ascii_digit()))));

        assert_eq!(matcher.apply("248rest"), Some((Match::Number(248), "rest")));
        assert_eq!(matcher.apply("rest"), None);
    }

    #[test]
    fn number_fails_on_overflow() {
        let matcher = number(join(one_or_more(char_if(|c| c.is_ascii_digit()))));
        // One digit past u64::MAX.
        assert_eq!(matcher.apply("184467440737095516160"), None);
    }

    #[test]
    fn number_rejects_an_empty_string() {
        let empty = Matcher::new(|input| Some((Match::Text(String::new()), input)));
        assert_eq!(number(empty).apply("x"), None);
    }

    #[test]
    fn tag_wraps_results_into_nodes() {
        let matcher = tag(join(one_or_more(not(char_match('*')))), NodeKind::Text);
        assert_eq!(
            matcher.apply("hi*"),
            Some((Match::Node(Node::Text("hi".into())), "*"))
        );
    }

    #[test]
    fn matchers_are_shareable_across_threads() {
        let matcher = one_or_more(char_match('a'));
        let clone = matcher.clone();

        let handle = std::thread::spawn(move || clone.apply("aab").map(|(_, rest)| rest.len()));

        assert_eq!(
            matcher.apply("aab"),
            Some((Match::Seq(vec![Match::Char('a'), Match::Char('a')]), "b"))
        );
        assert_eq!(handle.join().unwrap(), Some(1));
    }
}
