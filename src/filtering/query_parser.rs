use serde::{Deserialize, Serialize};

const OR_SEPARATOR: &str = " or ";
const AND_SEPARATOR: &str = " and ";

/// How the tokens of a query are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombineMode {
    #[default]
    And,
    Or,
}

/// Whether the user is mid-way through typing a combined query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// Nothing pending
    #[default]
    Idle,
    /// The text ends with a separator; the next token has not been typed yet
    AwaitingNextToken,
}

/// One lowercase fragment of a query: a literal substring, `is:<name>`, or
/// `is:<name><op><number>`, optionally prefixed with `!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterToken(String);

impl FilterToken {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.0.starts_with('!')
    }

    /// The token with a leading `!` removed
    #[must_use]
    pub fn body(&self) -> &str {
        self.0.strip_prefix('!').unwrap_or(&self.0)
    }
}

impl std::fmt::Display for FilterToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed wildcard query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    pub tokens: Vec<FilterToken>,
    pub mode: CombineMode,
    /// The raw text ended with a separator
    pub append: bool,
}

impl FilterQuery {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn input_state(&self) -> InputState {
        if self.append {
            InputState::AwaitingNextToken
        } else {
            InputState::Idle
        }
    }

    /// The last, possibly incomplete, token
    #[must_use]
    pub fn last_fragment(&self) -> Option<&FilterToken> {
        self.tokens.last()
    }
}

/// Parse raw filter text into a [`FilterQuery`].
///
/// The text is lowercased and leading whitespace dropped. If `" or "` occurs
/// anywhere the text is split on it and the query is OR-combined, even when
/// `" and "` is also present; otherwise it is split on `" and "`. `append` is
/// read from the untrimmed text so a trailing separator still sets it; each
/// token is then trimmed. Blank text yields the empty AND query. Tags are not
/// validated here.
#[must_use]
pub fn parse(raw: &str) -> FilterQuery {
    if raw.trim().is_empty() {
        return FilterQuery::default();
    }

    let text = raw.trim_start().to_lowercase();
    let (separator, mode) = if text.contains(OR_SEPARATOR) {
        (OR_SEPARATOR, CombineMode::Or)
    } else {
        (AND_SEPARATOR, CombineMode::And)
    };

    let tokens = text.split(separator).map(|t| FilterToken::new(t.trim())).collect();
    let append = text.ends_with(AND_SEPARATOR) || text.ends_with(OR_SEPARATOR);

    FilterQuery {
        tokens,
        mode,
        append,
    }
}
