use crate::models::Item;

use super::query_parser::{CombineMode, FilterQuery, FilterToken};

const LOCKED_TAG: &str = "is:locked";
const UNLOCKED_TAG: &str = "is:unlocked";
const LIGHT_PREFIX: &str = "is:light";
const STAT_TOTAL_PREFIX: &str = "is:stattotal";

/// Numeric comparison operators accepted after a comparison tag prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumComparison {
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `=`
    Eq,
}

impl NumComparison {
    /// Operators in match order; two-character operators come first so the
    /// longest operator wins.
    const PRECEDENCE: [(&'static str, NumComparison); 5] = [
        ("<=", NumComparison::Lte),
        (">=", NumComparison::Gte),
        ("<", NumComparison::Lt),
        (">", NumComparison::Gt),
        ("=", NumComparison::Eq),
    ];

    /// Split a leading operator off `text`
    #[must_use]
    pub fn strip_operator(text: &str) -> Option<(Self, &str)> {
        Self::PRECEDENCE
            .iter()
            .find_map(|&(symbol, op)| text.strip_prefix(symbol).map(|rest| (op, rest)))
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Gte => ">=",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "=",
        }
    }

    #[must_use]
    pub fn evaluate(self, actual: u64, expected: u64) -> bool {
        match self {
            Self::Gte => actual >= expected,
            Self::Lte => actual <= expected,
            Self::Gt => actual > expected,
            Self::Lt => actual < expected,
            Self::Eq => actual == expected,
        }
    }
}

/// Numeric item field addressed by a comparison tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    /// `is:light`
    Power,
    /// `is:stattotal`
    StatTotal,
}

impl NumericField {
    const PREFIXES: [(&'static str, NumericField); 2] = [
        (LIGHT_PREFIX, NumericField::Power),
        (STAT_TOTAL_PREFIX, NumericField::StatTotal),
    ];

    #[must_use]
    pub fn value_of(self, item: &Item) -> u64 {
        match self {
            Self::Power => u64::from(item.power),
            Self::StatTotal => u64::from(item.total_stat_points),
        }
    }
}

/// A token body classified once, ready to be evaluated against many items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPredicate {
    Locked,
    Unlocked,
    Compare {
        field: NumericField,
        op: NumComparison,
        value: u64,
    },
    /// Substring of the search text or notes
    Text(String),
}

impl TagPredicate {
    /// Classify a token body (without any `!`). Unrecognized tags and
    /// comparison tags with a bad operator or operand become `Text`.
    #[must_use]
    pub fn classify(body: &str) -> Self {
        match body {
            LOCKED_TAG => return Self::Locked,
            UNLOCKED_TAG => return Self::Unlocked,
            _ => {}
        }
        NumericField::PREFIXES
            .iter()
            .find_map(|&(prefix, field)| {
                parse_comparison(prefix, body).map(|(op, value)| Self::Compare { field, op, value })
            })
            .unwrap_or_else(|| Self::Text(body.to_string()))
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::Locked => item.locked,
            Self::Unlocked => !item.locked,
            Self::Compare { field, op, value } => op.evaluate(field.value_of(item), *value),
            Self::Text(needle) => text_matches(needle, item),
        }
    }
}

/// A [`TagPredicate`] with its negation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledToken {
    pub negated: bool,
    pub predicate: TagPredicate,
}

impl CompiledToken {
    #[must_use]
    pub fn compile(token: &FilterToken) -> Self {
        Self {
            negated: token.is_negated(),
            predicate: TagPredicate::classify(token.body()),
        }
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        self.predicate.matches(item) != self.negated
    }
}

/// Parse `<prefix><op><digits>`.
///
/// Returns `None` when the prefix is absent, no operator follows, or the
/// operand is not a non-negative integer literal.
#[must_use]
pub fn parse_comparison(prefix: &str, tag: &str) -> Option<(NumComparison, u64)> {
    let rest = tag.strip_prefix(prefix)?;
    let (op, operand) = NumComparison::strip_operator(rest)?;
    if operand.is_empty() || !operand.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    operand.parse().ok().map(|value| (op, value))
}

fn text_matches(needle: &str, item: &Item) -> bool {
    if item.search_text().contains(needle) {
        return true;
    }
    item.notes
        .as_ref()
        .is_some_and(|notes| notes.to_lowercase().contains(needle))
}

/// Evaluate one token against one item.
#[must_use]
pub fn matches(token: &FilterToken, item: &Item) -> bool {
    CompiledToken::compile(token).matches(item)
}

/// Apply the combination rule of `mode` to pre-compiled tokens.
///
/// AND stops at the first failure, OR at the first success. An empty token
/// list keeps the item in either mode.
#[must_use]
pub fn keep_compiled(tokens: &[CompiledToken], mode: CombineMode, item: &Item) -> bool {
    if tokens.is_empty() {
        return true;
    }
    match mode {
        CombineMode::And => tokens.iter().all(|t| t.matches(item)),
        CombineMode::Or => tokens.iter().any(|t| t.matches(item)),
    }
}

/// Whether `item` satisfies the whole query.
#[must_use]
pub fn should_keep(query: &FilterQuery, item: &Item) -> bool {
    let compiled: Vec<CompiledToken> = query.tokens.iter().map(CompiledToken::compile).collect();
    keep_compiled(&compiled, query.mode, item)
}
