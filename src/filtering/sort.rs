use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{Category, Item};

// Shared default values
const DEFAULT_SORT_FIELD: SortField = SortField::Power;
const DEFAULT_DESCENDING: bool = true;

/// Fields the gear list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Power,
    Name,
    #[serde(rename = "type")]
    TypeName,
    #[serde(rename = "stattotal")]
    StatTotal,
    Tier,
    Mark,
    Resets,
}

/// A comparable field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue<'a> {
    Number(u64),
    Text(&'a str),
}

impl SortField {
    pub const ALL: [SortField; 7] = [
        SortField::Power,
        SortField::Name,
        SortField::TypeName,
        SortField::StatTotal,
        SortField::Tier,
        SortField::Mark,
        SortField::Resets,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Power => "power",
            Self::Name => "name",
            Self::TypeName => "type",
            Self::StatTotal => "stattotal",
            Self::Tier => "tier",
            Self::Mark => "mark",
            Self::Resets => "resets",
        }
    }

    /// Look a field up by key (case-insensitive)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.into_iter().find(|f| f.key().eq_ignore_ascii_case(key))
    }

    /// Look a field up by key, falling back to `power`
    #[must_use]
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_else(|| {
            tracing::debug!(key = %key, "Unknown sort field, using default");
            DEFAULT_SORT_FIELD
        })
    }

    /// Whether this field carries a value for items of `category`
    #[must_use]
    pub fn applies_to(self, category: Category) -> bool {
        match self {
            Self::StatTotal => category == Category::Armor,
            Self::Resets => category == Category::Weapon,
            _ => true,
        }
    }

    /// The item's value for this field; `None` when missing or not meaningful
    /// for the item's category.
    #[must_use]
    pub fn value(self, item: &Item) -> Option<SortValue<'_>> {
        if !self.applies_to(item.category) {
            return None;
        }
        match self {
            Self::Power => Some(SortValue::Number(u64::from(item.power))),
            Self::Name => Some(SortValue::Text(&item.name)),
            Self::TypeName => Some(SortValue::Text(&item.type_name)),
            Self::StatTotal => Some(SortValue::Number(u64::from(item.total_stat_points))),
            Self::Tier => Some(SortValue::Number(item.tier as u64)),
            Self::Mark => item.mark.map(|m| SortValue::Number(m as u64)),
            Self::Resets => item.resets.map(|r| SortValue::Number(u64::from(r))),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub descending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: DEFAULT_SORT_FIELD,
            descending: DEFAULT_DESCENDING,
        }
    }
}

impl SortSpec {
    #[must_use]
    pub const fn new(field: SortField, descending: bool) -> Self {
        Self { field, descending }
    }

    /// Choosing the current field flips the direction; a new field starts descending.
    pub fn toggle(&mut self, field: SortField) {
        if field == self.field {
            self.descending = !self.descending;
        } else {
            self.field = field;
            self.descending = true;
        }
    }
}

/// Compare two items under `spec`.
///
/// Missing values sort after present ones in either direction. Ties fall back
/// to ascending name, so items with equal keys and names compare `Equal`.
#[must_use]
pub fn compare(a: &Item, b: &Item, spec: SortSpec) -> Ordering {
    let primary = match (spec.field.value(a), spec.field.value(b)) {
        (Some(x), Some(y)) => {
            let ordering = x.cmp(&y);
            if spec.descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    primary.then_with(|| a.name.cmp(&b.name))
}

/// Stable in-place sort
pub fn sort_items(items: &mut [&Item], spec: SortSpec) {
    items.sort_by(|a, b| compare(a, b, spec));
}
