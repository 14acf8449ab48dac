use crate::models::{Category, Item};

use super::conditions::{CompiledToken, keep_compiled};
use super::facets::{ExclusionReport, FacetRegistry};
use super::pagination::ViewWindow;
use super::query_parser::FilterQuery;
use super::sort::{SortSpec, sort_items};

/// Result of one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    /// The page of items to display, in sort order
    pub visible: Vec<&'a Item>,
    /// Number of items that survived every filter
    pub total: usize,
    /// Page actually shown (zero after an overshoot)
    pub page: usize,
    /// One line per active restriction, for display
    pub notes: Vec<String>,
    /// Items removed by each facet
    pub exclusions: ExclusionReport,
}

/// Run category selection, the wildcard query, the facets, the sort and the
/// page slice, in that order.
///
/// The function is pure: the same inputs always produce the same outcome and
/// the items are only read.
#[must_use]
pub fn apply<'a>(
    items: &'a [Item],
    category: Category,
    query: &FilterQuery,
    facets: &FacetRegistry,
    sort: SortSpec,
    window: ViewWindow,
) -> FilterOutcome<'a> {
    let mut notes: Vec<String> = query
        .tokens
        .iter()
        .map(|token| format!("wildcard = {token}"))
        .collect();

    let in_category = items.iter().filter(|item| item.category == category);

    let compiled: Vec<CompiledToken> = query.tokens.iter().map(CompiledToken::compile).collect();
    let matched: Vec<&Item> = in_category
        .filter(|item| keep_compiled(&compiled, query.mode, item))
        .collect();

    notes.extend(facets.notes(category));
    let (mut kept, exclusions) = facets.filter(category, matched);
    if !exclusions.is_empty() {
        tracing::debug!(exclusions = ?exclusions, "Facet exclusions");
    }

    sort_items(&mut kept, sort);

    let total = kept.len();
    let slice = window.slice(total);
    let visible = kept[slice.range].to_vec();

    tracing::debug!(
        category = ?category,
        tokens = query.tokens.len(),
        total,
        page = slice.page,
        "Filtered gear"
    );

    FilterOutcome {
        visible,
        total,
        page: slice.page,
        notes,
        exclusions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filtering::facets::{Facet, FacetKind};
    use crate::filtering::query_parser::parse;
    use crate::filtering::sort::SortField;
    use crate::models::{AmmoType, Category, Item};

    fn collection() -> Vec<Item> {
        vec![
            Item::builder("w1", "Ace of Spades", Category::Weapon)
                .power(960)
                .type_name("Hand Cannon")
                .ammo_type(AmmoType::Primary)
                .build(),
            Item::builder("w2", "Whisper of the Worm", Category::Weapon)
                .power(940)
                .type_name("Sniper Rifle")
                .ammo_type(AmmoType::Heavy)
                .build(),
            Item::builder("a1", "Ace Helm", Category::Armor).power(990).build(),
        ]
    }

    #[test]
    fn test_category_restriction_precedes_everything() {
        let items = collection();
        let outcome = apply(
            &items,
            Category::Weapon,
            &parse("ace"),
            &FacetRegistry::new(),
            SortSpec::default(),
            ViewWindow::default(),
        );
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.visible[0].id, "w1");
    }

    #[test]
    fn test_notes_include_wildcards_then_facets() {
        let items = collection();
        let mut facets = FacetRegistry::new();
        facets
            .facet_mut(FacetKind::AmmoType)
            .unwrap()
            .select_only(&[Some("heavy")]);
        let outcome = apply(
            &items,
            Category::Weapon,
            &parse("is:light>900 or ace"),
            &facets,
            SortSpec::default(),
            ViewWindow::default(),
        );
        assert_eq!(
            outcome.notes,
            vec![
                "wildcard = is:light>900".to_string(),
                "wildcard = ace".to_string(),
                "ammo = Heavy".to_string(),
            ]
        );
        assert_eq!(outcome.total, 1);
        assert_eq!(outcome.visible[0].id, "w2");
        assert_eq!(outcome.exclusions.get(&FacetKind::AmmoType), Some(&1));
    }

    #[test]
    fn test_inert_facets_do_not_reduce_matches() {
        let items = collection();
        let mut facets = FacetRegistry::new();
        for kind in FacetKind::ALL {
            facets.facet_mut(kind).unwrap().select_all(true);
        }
        let outcome = apply(
            &items,
            Category::Weapon,
            &FilterQuery::default(),
            &facets,
            SortSpec::new(SortField::Name, false),
            ViewWindow::default(),
        );
        assert_eq!(outcome.total, 2);
        assert!(outcome.exclusions.is_empty());
        assert!(outcome.notes.is_empty());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let items = collection();
        let facets = FacetRegistry::new();
        let query = parse("is:light>=900");
        let first = apply(&items, Category::Weapon, &query, &facets, SortSpec::default(), ViewWindow::default());
        let second = apply(&items, Category::Weapon, &query, &facets, SortSpec::default(), ViewWindow::default());
        let ids = |o: &FilterOutcome<'_>| o.visible.iter().map(|i| i.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.total, second.total);
    }
}
