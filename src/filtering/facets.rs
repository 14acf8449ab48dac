//! Independent multi-choice filters ("facets").
//!
//! Every facet is a [`ToggleFacet`] driven by a [`FacetKind`], which decides the
//! categories the facet applies to and which item field it reads. The
//! [`FacetRegistry`] owns one facet per kind and applies them as a pure AND.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{
    AmmoType, Category, ClassAllowed, DamageType, EnergyType, Item, Mark, Player, Tier,
};

use super::choices::{ChoiceCache, ChoiceSet};

/// A selectable option. `value` is `None` for the "absent" option (e.g. Unmarked).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub value: Option<String>,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: label.into(),
        }
    }

    /// The option matching items that have no value for the facet's field
    #[must_use]
    pub fn absent(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }

    /// A choice whose value doubles as its label
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self::new(name, name)
    }
}

/// The filter dimensions, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FacetKind {
    Mark,
    WeaponType,
    AmmoType,
    ArmorBucket,
    DamageType,
    EnergyType,
    WeaponBucket,
    VehicleType,
    ModType,
    ConsumableType,
    ExchangeType,
    Owner,
    Equipped,
    Rarity,
    ClassType,
}

const MARKABLE: &[Category] = &[
    Category::Weapon,
    Category::Armor,
    Category::Ghost,
    Category::Vehicle,
];

impl FacetKind {
    pub const ALL: [FacetKind; 15] = [
        FacetKind::Mark,
        FacetKind::WeaponType,
        FacetKind::AmmoType,
        FacetKind::ArmorBucket,
        FacetKind::DamageType,
        FacetKind::EnergyType,
        FacetKind::WeaponBucket,
        FacetKind::VehicleType,
        FacetKind::ModType,
        FacetKind::ConsumableType,
        FacetKind::ExchangeType,
        FacetKind::Owner,
        FacetKind::Equipped,
        FacetKind::Rarity,
        FacetKind::ClassType,
    ];

    /// Stable identifier used in exclusion reports
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mark => "mark",
            Self::WeaponType => "weaponType",
            Self::AmmoType => "ammoType",
            Self::ArmorBucket => "armorInventoryBucket",
            Self::DamageType => "damageType",
            Self::EnergyType => "energyType",
            Self::WeaponBucket => "weaponInventoryBucket",
            Self::VehicleType => "vehicleType",
            Self::ModType => "modType",
            Self::ConsumableType => "consumableType",
            Self::ExchangeType => "exchangeType",
            Self::Owner => "owner",
            Self::Equipped => "equipped",
            Self::Rarity => "rarity",
            Self::ClassType => "classType",
        }
    }

    /// Human-readable name used in notes
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mark => "mark",
            Self::WeaponType => "type",
            Self::AmmoType => "ammo",
            Self::ArmorBucket | Self::WeaponBucket => "bucket",
            Self::DamageType => "damage",
            Self::EnergyType => "energy",
            Self::VehicleType => "vehicle",
            Self::ModType => "mod",
            Self::ConsumableType => "consumable",
            Self::ExchangeType => "exchange",
            Self::Owner => "owner",
            Self::Equipped => "equipped",
            Self::Rarity => "rarity",
            Self::ClassType => "class",
        }
    }

    /// Categories this facet may exclude items from
    #[must_use]
    pub fn categories(self) -> &'static [Category] {
        match self {
            Self::Mark | Self::Equipped => MARKABLE,
            Self::WeaponType | Self::AmmoType | Self::DamageType | Self::WeaponBucket => {
                &[Category::Weapon]
            }
            Self::ArmorBucket | Self::EnergyType | Self::ClassType => &[Category::Armor],
            Self::VehicleType => &[Category::Vehicle],
            Self::ModType => &[Category::GearMod],
            Self::ConsumableType => &[Category::Consumable],
            Self::ExchangeType => &[Category::ExchangeMaterial],
            Self::Owner | Self::Rarity => &Category::ALL,
        }
    }

    #[must_use]
    pub fn applies_to(self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    /// The raw value this facet compares against its selected options
    #[must_use]
    pub fn value_of(self, item: &Item) -> Option<&str> {
        match self {
            Self::Mark => item.mark.map(Mark::as_str),
            Self::WeaponType | Self::ModType | Self::ConsumableType | Self::ExchangeType => {
                Some(item.type_name.as_str())
            }
            Self::AmmoType => item.ammo_type.map(AmmoType::as_str),
            Self::ArmorBucket | Self::WeaponBucket | Self::VehicleType => Some(item.bucket.as_str()),
            Self::DamageType => item.damage_type.map(DamageType::as_str),
            Self::EnergyType => item.energy_type.map(EnergyType::as_str),
            Self::Owner => Some(item.owner_id.as_str()),
            Self::Equipped => Some(if item.equipped { "true" } else { "false" }),
            Self::Rarity => Some(item.tier.display_name()),
            Self::ClassType => item.class_allowed.map(ClassAllowed::as_str),
        }
    }

    /// Options that never depend on the loaded collection, or `None` for
    /// facets whose options are derived from it.
    #[must_use]
    pub fn static_choices(self) -> Option<Vec<Choice>> {
        let choices = match self {
            Self::Mark => {
                let mut marks: Vec<Choice> = Mark::ALL
                    .iter()
                    .map(|m| Choice::new(m.as_str(), m.display_name()))
                    .collect();
                marks.push(Choice::absent("Unmarked"));
                marks
            }
            Self::AmmoType => AmmoType::ALL
                .iter()
                .map(|a| Choice::new(a.as_str(), a.display_name()))
                .collect(),
            Self::DamageType => DamageType::ALL
                .iter()
                .map(|d| Choice::new(d.as_str(), d.display_name()))
                .collect(),
            Self::EnergyType => EnergyType::ALL
                .iter()
                .map(|e| Choice::new(e.as_str(), e.display_name()))
                .collect(),
            Self::ClassType => ClassAllowed::ALL
                .iter()
                .map(|c| Choice::new(c.as_str(), c.display_name()))
                .collect(),
            Self::Equipped => vec![
                Choice::new("true", "Equipped"),
                Choice::new("false", "Not Equipped"),
            ],
            Self::Rarity => Tier::CHOICES
                .iter()
                .map(|t| Choice::named(t.display_name()))
                .collect(),
            _ => return None,
        };
        Some(choices)
    }
}

impl fmt::Display for FacetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Capability shared by every facet.
pub trait Facet {
    fn kind(&self) -> FacetKind;

    /// Whether an item of `category` with `value` passes this facet.
    /// Always true for categories the facet does not apply to.
    fn is_chosen(&self, category: Category, value: Option<&str>) -> bool;

    fn select_all(&mut self, selected: bool);

    fn is_all_selected(&self) -> bool;

    /// Description of the restriction, `None` while at the select-all default
    fn note(&self) -> Option<String>;

    fn admits(&self, category: Category, item: &Item) -> bool {
        self.is_chosen(category, self.kind().value_of(item))
    }
}

/// A checkbox-group facet: an ordered option list and a selection flag per option.
///
/// A facet with no options still remembers whether it was last set to select-all
/// or select-none, so deselecting a derived facet before any gear is loaded
/// rejects its category and survives the next [`ToggleFacet::set_choices`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFacet {
    kind: FacetKind,
    choices: Vec<Choice>,
    selected: Vec<bool>,
    all_when_empty: bool,
}

impl ToggleFacet {
    /// A facet with every option selected
    #[must_use]
    pub fn new(kind: FacetKind, choices: Vec<Choice>) -> Self {
        let selected = vec![true; choices.len()];
        Self {
            kind,
            choices,
            selected,
            all_when_empty: true,
        }
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Replace the option list, keeping the user's selection.
    ///
    /// A facet at its default stays at its default; otherwise only options that
    /// were selected before remain selected. Emptying the list keeps whether the
    /// facet was at its default.
    pub fn set_choices(&mut self, choices: Vec<Choice>) {
        self.all_when_empty = self.is_all_selected();
        let selected = if self.all_when_empty {
            vec![true; choices.len()]
        } else {
            choices
                .iter()
                .map(|c| self.is_value_selected(c.value.as_deref()))
                .collect()
        };
        self.choices = choices;
        self.selected = selected;
    }

    /// Select or deselect one option. Returns false if the value is unknown.
    pub fn set_selected(&mut self, value: Option<&str>, selected: bool) -> bool {
        match self.position(value) {
            Some(index) => {
                self.selected[index] = selected;
                true
            }
            None => false,
        }
    }

    /// Select exactly the given values
    pub fn select_only(&mut self, values: &[Option<&str>]) {
        for (choice, flag) in self.choices.iter().zip(self.selected.iter_mut()) {
            *flag = values.contains(&choice.value.as_deref());
        }
    }

    /// Currently selected choices, in option order
    pub fn selected_choices(&self) -> impl Iterator<Item = &Choice> {
        self.choices
            .iter()
            .zip(&self.selected)
            .filter_map(|(choice, &selected)| selected.then_some(choice))
    }

    fn position(&self, value: Option<&str>) -> Option<usize> {
        self.choices.iter().position(|c| c.value.as_deref() == value)
    }

    fn is_value_selected(&self, value: Option<&str>) -> bool {
        self.position(value).is_some_and(|i| self.selected[i])
    }
}

impl Facet for ToggleFacet {
    fn kind(&self) -> FacetKind {
        self.kind
    }

    fn is_chosen(&self, category: Category, value: Option<&str>) -> bool {
        if !self.kind.applies_to(category) || self.is_all_selected() {
            return true;
        }
        self.is_value_selected(value)
    }

    fn select_all(&mut self, selected: bool) {
        self.selected.fill(selected);
        self.all_when_empty = selected;
    }

    fn is_all_selected(&self) -> bool {
        if self.selected.is_empty() {
            return self.all_when_empty;
        }
        self.selected.iter().all(|&s| s)
    }

    fn note(&self) -> Option<String> {
        if self.is_all_selected() {
            return None;
        }
        let labels: Vec<&str> = self.selected_choices().map(|c| c.label.as_str()).collect();
        let shown = if labels.is_empty() {
            "none".to_string()
        } else {
            labels.join(", ")
        };
        Some(format!("{} = {shown}", self.kind.label()))
    }
}

/// Per-facet exclusion counts from one filtering run.
pub type ExclusionReport = BTreeMap<FacetKind, usize>;

/// One facet per [`FacetKind`] plus the cached option lists they are built from.
#[derive(Debug, Clone)]
pub struct FacetRegistry {
    facets: Vec<ToggleFacet>,
    cache: ChoiceCache,
}

impl Default for FacetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FacetRegistry {
    /// Every facet at its default. Derived facets start with no options.
    #[must_use]
    pub fn new() -> Self {
        let facets = FacetKind::ALL
            .iter()
            .map(|&kind| ToggleFacet::new(kind, kind.static_choices().unwrap_or_default()))
            .collect();
        Self {
            facets,
            cache: ChoiceCache::default(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToggleFacet> {
        self.facets.iter()
    }

    #[must_use]
    pub fn facet(&self, kind: FacetKind) -> Option<&ToggleFacet> {
        self.facets.iter().find(|f| f.kind() == kind)
    }

    pub fn facet_mut(&mut self, kind: FacetKind) -> Option<&mut ToggleFacet> {
        self.facets.iter_mut().find(|f| f.kind() == kind)
    }

    /// The first facet that rejects `item`, if any
    #[must_use]
    pub fn rejecting_facet(&self, category: Category, item: &Item) -> Option<FacetKind> {
        self.facets
            .iter()
            .find(|f| !f.admits(category, item))
            .map(Facet::kind)
    }

    /// Keep the items every facet admits, counting rejections per facet
    #[must_use]
    pub fn filter<'a>(&self, category: Category, items: Vec<&'a Item>) -> (Vec<&'a Item>, ExclusionReport) {
        let mut report = ExclusionReport::new();
        let kept = items
            .into_iter()
            .filter(|item| match self.rejecting_facet(category, item) {
                Some(kind) => {
                    *report.entry(kind).or_insert(0) += 1;
                    false
                }
                None => true,
            })
            .collect();
        (kept, report)
    }

    /// Notes of the facets applicable to `category` that are not at their default
    #[must_use]
    pub fn notes(&self, category: Category) -> Vec<String> {
        self.facets
            .iter()
            .filter(|f| f.kind().applies_to(category))
            .filter_map(Facet::note)
            .collect()
    }

    /// True if any facet, for any category, is restricted
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.facets.iter().any(|f| !f.is_all_selected())
    }

    /// Return every facet to select-all
    pub fn reset(&mut self) {
        for facet in &mut self.facets {
            facet.select_all(true);
        }
    }

    /// Rebuild derived option lists from `player` unless they are cached.
    ///
    /// An empty collection never populates the cache, but the collection-derived
    /// lists are still emptied so no options from a previous collection remain.
    /// Returns true when the cached lists were regenerated.
    pub fn regenerate_choices(&mut self, player: &Player, force: bool) -> bool {
        if player.gear.is_empty() {
            tracing::debug!("Clearing collection-derived facet choices");
            install_choices(&mut self.facets, &ChoiceSet::derive(player));
            return false;
        }
        let Some(choice_set) = self.cache.regenerate(player, force) else {
            return false;
        };
        install_choices(&mut self.facets, choice_set);
        true
    }

    /// Drop cached option lists; the next regeneration recomputes them
    pub fn invalidate_choices(&mut self) {
        self.cache.invalidate();
    }

    #[must_use]
    pub fn choices_cached(&self) -> bool {
        self.cache.is_fresh()
    }
}

fn install_choices(facets: &mut [ToggleFacet], choice_set: &ChoiceSet) {
    for facet in facets {
        if let Some(choices) = choice_set.get(facet.kind()) {
            facet.set_choices(choices.to_vec());
        }
    }
}
