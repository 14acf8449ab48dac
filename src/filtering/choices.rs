use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, Item, Player};

use super::facets::{Choice, FacetKind};

/// Option lists for every facet, derived from one item collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSet {
    lists: BTreeMap<FacetKind, Vec<Choice>>,
}

impl ChoiceSet {
    #[must_use]
    pub fn get(&self, kind: FacetKind) -> Option<&[Choice]> {
        self.lists.get(&kind).map(Vec::as_slice)
    }

    /// Derive option lists from `player`.
    ///
    /// Type and bucket lists are deduplicated by raw value and sorted by label.
    /// Owners keep the character, vault, shared order.
    #[must_use]
    pub fn derive(player: &Player) -> Self {
        let mut lists: BTreeMap<FacetKind, Vec<Choice>> = FacetKind::ALL
            .iter()
            .filter_map(|&kind| kind.static_choices().map(|choices| (kind, choices)))
            .collect();

        lists.insert(
            FacetKind::Owner,
            player.owners().map(|o| Choice::new(o.id.as_str(), o.label.as_str())).collect(),
        );

        let derived: [(FacetKind, Category, fn(&Item) -> &str); 7] = [
            (FacetKind::WeaponType, Category::Weapon, type_name),
            (FacetKind::ModType, Category::GearMod, type_name),
            (FacetKind::ConsumableType, Category::Consumable, type_name),
            (FacetKind::ExchangeType, Category::ExchangeMaterial, type_name),
            (FacetKind::WeaponBucket, Category::Weapon, bucket),
            (FacetKind::ArmorBucket, Category::Armor, bucket),
            (FacetKind::VehicleType, Category::Vehicle, bucket),
        ];
        for (kind, category, field) in derived {
            lists.insert(kind, distinct_sorted(&player.gear, category, field));
        }

        Self { lists }
    }
}

fn type_name(item: &Item) -> &str {
    &item.type_name
}

fn bucket(item: &Item) -> &str {
    &item.bucket
}

fn distinct_sorted(gear: &[Item], category: Category, field: fn(&Item) -> &str) -> Vec<Choice> {
    let values: BTreeSet<&str> = gear
        .iter()
        .filter(|i| i.category == category)
        .map(field)
        .collect();
    let mut choices: Vec<Choice> = values.into_iter().map(Choice::named).collect();
    choices.sort_by(|a, b| a.label.cmp(&b.label));
    choices
}

/// Explicitly invalidated cache of derived option lists.
///
/// Regeneration is skipped while the cache is fresh unless forced, and an
/// empty collection never populates it.
#[derive(Debug, Clone, Default)]
pub struct ChoiceCache {
    current: Option<ChoiceSet>,
}

impl ChoiceCache {
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<&ChoiceSet> {
        self.current.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }

    /// Recompute from `player` if stale or forced.
    ///
    /// Returns the new set when it was recomputed, `None` when the cached set
    /// was kept or the collection is empty.
    pub fn regenerate(&mut self, player: &Player, force: bool) -> Option<&ChoiceSet> {
        if player.gear.is_empty() {
            tracing::debug!("Skipping choice generation for empty collection");
            return None;
        }
        if self.current.is_some() && !force {
            tracing::debug!("Facet choices cached, skipping regeneration");
            return None;
        }
        let set = ChoiceSet::derive(player);
        tracing::debug!(items = player.gear.len(), "Regenerated facet choices");
        Some(&*self.current.insert(set))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Item, Owner, Player};

    fn player(gear: Vec<Item>) -> Player {
        Player::new(
            vec![Owner::new("c1", "Warlock"), Owner::new("c2", "Hunter")],
            Owner::new("vault", "Vault"),
            Owner::new("shared", "Shared"),
            gear,
        )
    }

    fn labels(choices: &[Choice]) -> Vec<&str> {
        choices.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_derive_dedupes_and_sorts_type_names() {
        let gear = vec![
            Item::builder("1", "A", Category::Weapon).type_name("Sniper Rifle").bucket("Energy Weapons").build(),
            Item::builder("2", "B", Category::Weapon).type_name("Auto Rifle").bucket("Kinetic Weapons").build(),
            Item::builder("3", "C", Category::Weapon).type_name("Sniper Rifle").bucket("Energy Weapons").build(),
            Item::builder("4", "D", Category::GearMod).type_name("Weapon Mod").build(),
        ];
        let set = ChoiceSet::derive(&player(gear));
        assert_eq!(labels(set.get(FacetKind::WeaponType).unwrap()), vec!["Auto Rifle", "Sniper Rifle"]);
        assert_eq!(
            labels(set.get(FacetKind::WeaponBucket).unwrap()),
            vec!["Energy Weapons", "Kinetic Weapons"]
        );
        assert_eq!(labels(set.get(FacetKind::ModType).unwrap()), vec!["Weapon Mod"]);
        assert!(set.get(FacetKind::ConsumableType).unwrap().is_empty());
    }

    #[test]
    fn test_derive_owner_order() {
        let gear = vec![Item::builder("1", "A", Category::Weapon).build()];
        let set = ChoiceSet::derive(&player(gear));
        assert_eq!(
            labels(set.get(FacetKind::Owner).unwrap()),
            vec!["Warlock", "Hunter", "Vault", "Shared"]
        );
    }

    #[test]
    fn test_cache_short_circuits_until_forced_or_invalidated() {
        let gear = vec![Item::builder("1", "A", Category::Weapon).type_name("Bow").build()];
        let p = player(gear);
        let mut cache = ChoiceCache::default();

        assert!(cache.regenerate(&p, false).is_some());
        assert!(cache.regenerate(&p, false).is_none());
        assert!(cache.regenerate(&p, true).is_some());

        cache.invalidate();
        assert!(!cache.is_fresh());
        assert!(cache.regenerate(&p, false).is_some());
    }

    #[test]
    fn test_empty_collection_never_populates() {
        let mut cache = ChoiceCache::default();
        assert!(cache.regenerate(&player(Vec::new()), true).is_none());
        assert!(!cache.is_fresh());
    }
}
