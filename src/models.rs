use serde::{Deserialize, Serialize};

/// Top-level item classification.
///
/// The category selects which slice of the collection is shown and gates
/// which facets and bucket choices apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    Weapon,
    Armor,
    Ghost,
    Vehicle,
    GearMod,
    Consumable,
    ExchangeMaterial,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Category; 7] = [
        Category::Weapon,
        Category::Armor,
        Category::Ghost,
        Category::Vehicle,
        Category::GearMod,
        Category::Consumable,
        Category::ExchangeMaterial,
    ];

    /// Route path segment used for this category (e.g. `gear/weapons`)
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Weapon => "weapons",
            Self::Armor => "armor",
            Self::Ghost => "ghosts",
            Self::Vehicle => "vehicles",
            Self::GearMod => "mods",
            Self::Consumable => "consumable",
            Self::ExchangeMaterial => "material",
        }
    }

    /// Tab label
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Weapon => "Weapons",
            Self::Armor => "Armor",
            Self::Ghost => "Ghosts",
            Self::Vehicle => "Vehicles",
            Self::GearMod => "Mods",
            Self::Consumable => "Consumable",
            Self::ExchangeMaterial => "Material",
        }
    }

    /// Resolve a route path segment back to its category
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.path() == path)
    }
}

/// User-assigned triage mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Upgrade,
    Keep,
    Infuse,
    Junk,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Upgrade, Mark::Keep, Mark::Infuse, Mark::Junk];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upgrade => "upgrade",
            Self::Keep => "keep",
            Self::Infuse => "infuse",
            Self::Junk => "junk",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Upgrade => "Upgrade",
            Self::Keep => "Keep",
            Self::Infuse => "Infuse",
            Self::Junk => "Junk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmmoType {
    Primary,
    Special,
    Heavy,
}

impl AmmoType {
    pub const ALL: [AmmoType; 3] = [AmmoType::Primary, AmmoType::Special, AmmoType::Heavy];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Special => "special",
            Self::Heavy => "heavy",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Special => "Special",
            Self::Heavy => "Heavy",
        }
    }
}

/// Weapon damage element. `Thermal` is shown to players as "Solar".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Kinetic,
    Arc,
    Thermal,
    Void,
}

impl DamageType {
    pub const ALL: [DamageType; 4] = [
        DamageType::Kinetic,
        DamageType::Arc,
        DamageType::Thermal,
        DamageType::Void,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kinetic => "kinetic",
            Self::Arc => "arc",
            Self::Thermal => "thermal",
            Self::Void => "void",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Kinetic => "Kinetic",
            Self::Arc => "Arc",
            Self::Thermal => "Solar",
            Self::Void => "Void",
        }
    }
}

/// Armor energy affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Arc,
    Thermal,
    Void,
    Any,
}

impl EnergyType {
    pub const ALL: [EnergyType; 4] = [
        EnergyType::Arc,
        EnergyType::Thermal,
        EnergyType::Void,
        EnergyType::Any,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Arc => "arc",
            Self::Thermal => "thermal",
            Self::Void => "void",
            Self::Any => "any",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Arc => "Arc",
            Self::Thermal => "Solar",
            Self::Void => "Void",
            Self::Any => "Any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassAllowed {
    Titan,
    Warlock,
    Hunter,
    Any,
}

impl ClassAllowed {
    pub const ALL: [ClassAllowed; 4] = [
        ClassAllowed::Titan,
        ClassAllowed::Warlock,
        ClassAllowed::Hunter,
        ClassAllowed::Any,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Titan => "titan",
            Self::Warlock => "warlock",
            Self::Hunter => "hunter",
            Self::Any => "any",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Titan => "Titan",
            Self::Warlock => "Warlock",
            Self::Hunter => "Hunter",
            Self::Any => "Any",
        }
    }
}

/// Rarity tier, declared from lowest to highest so that `Ord` follows rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Tier {
    #[default]
    Basic,
    Common,
    Rare,
    Legendary,
    Exotic,
}

impl Tier {
    /// Tiers offered as rarity choices, highest first. `Basic` is never offered.
    pub const CHOICES: [Tier; 4] = [Tier::Exotic, Tier::Legendary, Tier::Rare, Tier::Common];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Basic => "Basic",
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Legendary => "Legendary",
            Self::Exotic => "Exotic",
        }
    }
}

/// A storage location: a character, the vault, or shared inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub label: String,
}

impl Owner {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One owned piece of equipment.
///
/// `search_text` is a lowercase concatenation of the searchable attributes.
/// It is derived, never deserialized, and must be rebuilt with
/// [`Item::refresh_search_text`] after any searchable field changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub power: u32,
    #[serde(default)]
    pub total_stat_points: u32,
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub ammo_type: Option<AmmoType>,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub energy_type: Option<EnergyType>,
    #[serde(default)]
    pub damage_type: Option<DamageType>,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub equipped: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub class_allowed: Option<ClassAllowed>,
    #[serde(default)]
    pub mark: Option<Mark>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Masterwork reset count; only tracked for weapons
    #[serde(default)]
    pub resets: Option<u32>,
    /// Precomputed search tags such as `is:masterwork` or `season:undying`
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip)]
    search_text: String,
}

impl Item {
    /// Start building an item with the three identifying fields.
    #[must_use]
    pub fn builder(id: impl Into<String>, name: impl Into<String>, category: Category) -> ItemBuilder {
        ItemBuilder::new(id, name, category)
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Rebuild the lowercase search blob from the current field values.
    pub fn refresh_search_text(&mut self) {
        let mark_tag = self.mark.map(|m| format!("is:{}", m.as_str()));
        let mut parts: Vec<&str> = vec![
            self.name.as_str(),
            self.type_name.as_str(),
            self.bucket.as_str(),
            self.tier.display_name(),
        ];
        if let Some(damage) = self.damage_type {
            parts.push(damage.display_name());
        }
        if let Some(energy) = self.energy_type {
            parts.push(energy.display_name());
        }
        if let Some(ammo) = self.ammo_type {
            parts.push(ammo.display_name());
        }
        if let Some(class) = self.class_allowed {
            parts.push(class.display_name());
        }
        if let Some(tag) = &mark_tag {
            parts.push(tag);
        }
        parts.extend(self.tags.iter().map(String::as_str));
        self.search_text = parts.join(" ").to_lowercase();
    }
}

/// Fluent constructor for [`Item`]; `build` computes the search text.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            item: Item {
                id: id.into(),
                name: name.into(),
                category,
                power: 0,
                total_stat_points: 0,
                type_name: String::new(),
                ammo_type: None,
                bucket: String::new(),
                energy_type: None,
                damage_type: None,
                owner_id: String::new(),
                equipped: false,
                locked: false,
                tier: Tier::default(),
                class_allowed: None,
                mark: None,
                notes: None,
                resets: None,
                tags: Vec::new(),
                search_text: String::new(),
            },
        }
    }

    #[must_use]
    pub fn power(mut self, power: u32) -> Self {
        self.item.power = power;
        self
    }

    #[must_use]
    pub fn total_stat_points(mut self, points: u32) -> Self {
        self.item.total_stat_points = points;
        self
    }

    #[must_use]
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.item.type_name = type_name.into();
        self
    }

    #[must_use]
    pub fn ammo_type(mut self, ammo: AmmoType) -> Self {
        self.item.ammo_type = Some(ammo);
        self
    }

    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.item.bucket = bucket.into();
        self
    }

    #[must_use]
    pub fn energy_type(mut self, energy: EnergyType) -> Self {
        self.item.energy_type = Some(energy);
        self
    }

    #[must_use]
    pub fn damage_type(mut self, damage: DamageType) -> Self {
        self.item.damage_type = Some(damage);
        self
    }

    #[must_use]
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.item.owner_id = owner_id.into();
        self
    }

    #[must_use]
    pub fn equipped(mut self, equipped: bool) -> Self {
        self.item.equipped = equipped;
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.item.locked = locked;
        self
    }

    #[must_use]
    pub fn tier(mut self, tier: Tier) -> Self {
        self.item.tier = tier;
        self
    }

    #[must_use]
    pub fn class_allowed(mut self, class: ClassAllowed) -> Self {
        self.item.class_allowed = Some(class);
        self
    }

    #[must_use]
    pub fn mark(mut self, mark: Mark) -> Self {
        self.item.mark = Some(mark);
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.item.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn resets(mut self, resets: u32) -> Self {
        self.item.resets = Some(resets);
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.item.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn build(mut self) -> Item {
        self.item.refresh_search_text();
        self.item
    }
}

/// The player aggregate: storage locations plus every owned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub characters: Vec<Owner>,
    pub vault: Owner,
    pub shared: Owner,
    #[serde(default)]
    pub gear: Vec<Item>,
}

impl Player {
    #[must_use]
    pub fn new(characters: Vec<Owner>, vault: Owner, shared: Owner, gear: Vec<Item>) -> Self {
        Self {
            characters,
            vault,
            shared,
            gear,
        }
    }

    /// Deserialize a player snapshot and rebuild every item's search text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GearError::Serialization`] when `json` is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, crate::GearError> {
        let mut player: Self = serde_json::from_str(json)?;
        for item in &mut player.gear {
            item.refresh_search_text();
        }
        Ok(player)
    }

    /// Every storage location: characters first, then vault, then shared.
    pub fn owners(&self) -> impl Iterator<Item = &Owner> {
        self.characters
            .iter()
            .chain(std::iter::once(&self.vault))
            .chain(std::iter::once(&self.shared))
    }
}
