//! Transition rules and the ordered rule set.
//!
//! A transition rule detects the token that moves the scanner from one
//! content type to another ("`/*` begins a block comment"). Rules are
//! stateless: given a line of text and a scan offset they either report a
//! matched length and a destination content type, or they fail. The
//! companion `partition-core-rules` crate ships literal and regex
//! implementations; hosts can also implement [`TransitionRule`] directly
//! or wrap a plain function with [`MatcherRule`].

use crate::content_type::ContentType;

/// A rule detecting tokens that begin a new partition.
///
/// `matches` must be a pure function of its inputs. A returned length of
/// `Some(0)` is a legal zero-width transition (an immediate state change
/// that consumes no text); the partitioner guarantees forward progress
/// afterwards.
pub trait TransitionRule {
    /// Content type this rule fires from.
    fn source(&self) -> ContentType;

    /// Content type in effect after this rule fires.
    fn destination(&self) -> ContentType;

    /// Try to match at `offset` (a character offset) in `line` (terminator
    /// excluded). Returns the matched length in characters, or `None`.
    fn matches(&self, line: &str, offset: usize) -> Option<usize>;
}

/// A successful transition: how much text the token consumed and which
/// content type governs from here on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Matched token length in characters (0 for zero-width transitions).
    pub length: usize,
    /// Content type in effect after the transition.
    pub destination: ContentType,
}

/// Adapter turning a `(source, matcher, destination)` triple into a
/// [`TransitionRule`], for hosts that author rules as plain functions.
pub struct MatcherRule<F> {
    source: ContentType,
    destination: ContentType,
    matcher: F,
}

impl<F> MatcherRule<F>
where
    F: Fn(&str, usize) -> Option<usize>,
{
    /// Create a rule from a matcher function.
    pub fn new(source: ContentType, destination: ContentType, matcher: F) -> Self {
        Self {
            source,
            destination,
            matcher,
        }
    }
}

impl<F> TransitionRule for MatcherRule<F>
where
    F: Fn(&str, usize) -> Option<usize>,
{
    fn source(&self) -> ContentType {
        self.source
    }

    fn destination(&self) -> ContentType {
        self.destination
    }

    fn matches(&self, line: &str, offset: usize) -> Option<usize> {
        (self.matcher)(line, offset)
    }
}

/// Ordered collection of transition rules.
///
/// Rules are consulted in registration order; only rules whose source
/// content type equals the current one are tried, and the first match
/// wins.
#[derive(Default)]
pub struct TransitionRuleSet {
    rules: Vec<Box<dyn TransitionRule>>,
}

impl TransitionRuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule behind all previously registered rules.
    pub fn add_rule(&mut self, rule: Box<dyn TransitionRule>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try every applicable rule at `offset` in `line`, given the content
    /// type in effect before that offset. `None` means no rule fired and
    /// the current content type persists.
    pub fn try_transition(
        &self,
        line: &str,
        offset: usize,
        current: ContentType,
    ) -> Option<Transition> {
        for rule in &self.rules {
            if rule.source() != current {
                continue;
            }
            if let Some(length) = rule.matches(line, offset) {
                return Some(Transition {
                    length,
                    destination: rule.destination(),
                });
            }
        }
        None
    }
}

impl std::fmt::Debug for TransitionRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionRuleSet")
            .field("rules", &self.rules.len())
            .finish()
    }
}
