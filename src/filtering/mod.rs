//! Filtering, faceting and ordering of gear.
//!
//! # Query syntax
//!
//! The wildcard box accepts tokens joined by ` and ` or ` or ` (the latter
//! wins when both appear). Each token is one of:
//!
//! - `is:locked` / `is:unlocked`
//! - `is:light<op><n>` or `is:stattotal<op><n>`, with `<op>` one of
//!   `<=`, `>=`, `<`, `>`, `=`
//! - any other text, matched as a substring of the item's search text or notes
//!
//! A leading `!` negates a token. Matching is case-insensitive.
//!
//! ## Main Components
//!
//! - **[`parse`]**: raw text to [`FilterQuery`]
//! - **[`conditions::matches`]**: one token against one item
//! - **[`FacetRegistry`]**: the multi-choice filters and their cached options
//! - **[`compare`]**: category-aware ordering
//! - **[`ViewWindow`]**: page slicing
//!
//! # Pipeline
//!
//! [`pipeline::apply`] selects the category, applies the query, then the
//! facets, sorts and finally slices out one page.

pub mod autocomplete;
pub mod choices;
pub mod conditions;
pub mod facets;
pub mod pagination;
pub mod pipeline;
pub mod query_parser;
pub mod sort;

pub use autocomplete::{Autocomplete, DEFAULT_AUTOCOMPLETE_OPTIONS};
pub use choices::{ChoiceCache, ChoiceSet};
pub use conditions::{NumComparison, NumericField, TagPredicate, matches, should_keep};
pub use facets::{Choice, ExclusionReport, Facet, FacetKind, FacetRegistry, ToggleFacet};
pub use pagination::{DEFAULT_PAGE_SIZE, PageSlice, ViewWindow, content_range};
pub use pipeline::{FilterOutcome, apply};
pub use query_parser::{CombineMode, FilterQuery, FilterToken, InputState, parse};
pub use sort::{SortField, SortSpec, SortValue, compare, sort_items};
