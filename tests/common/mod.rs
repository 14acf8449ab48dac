#![allow(dead_code)]

use gearsift::models::{
    AmmoType, Category, ClassAllowed, DamageType, EnergyType, Item, Mark, Owner, Player, Tier,
};

/// Route engine logs to the test output. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_target(false)
        .compact()
        .try_init();
}

pub fn owners() -> (Vec<Owner>, Owner, Owner) {
    (
        vec![Owner::new("c-warlock", "Warlock"), Owner::new("c-hunter", "Hunter")],
        Owner::new("vault", "Vault"),
        Owner::new("shared", "Shared"),
    )
}

pub fn player_with(gear: Vec<Item>) -> Player {
    let (characters, vault, shared) = owners();
    Player::new(characters, vault, shared, gear)
}

/// Ten weapons; exactly three have power of at least 900 (two tie at 910).
pub fn ten_weapons() -> Vec<Item> {
    let rows: [(&str, u32, &str, AmmoType); 10] = [
        ("Ace of Spades", 910, "Hand Cannon", AmmoType::Primary),
        ("Bad Juju", 850, "Pulse Rifle", AmmoType::Primary),
        ("Chaperone", 930, "Shotgun", AmmoType::Special),
        ("Dead Man's Tale", 890, "Scout Rifle", AmmoType::Primary),
        ("Eriana's Vow", 910, "Hand Cannon", AmmoType::Special),
        ("Fighting Lion", 700, "Grenade Launcher", AmmoType::Special),
        ("Gjallarhorn", 899, "Rocket Launcher", AmmoType::Heavy),
        ("Hard Light", 640, "Auto Rifle", AmmoType::Primary),
        ("Izanagi's Burden", 750, "Sniper Rifle", AmmoType::Special),
        ("Jotunn", 800, "Fusion Rifle", AmmoType::Special),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, &(name, power, type_name, ammo))| {
            Item::builder(format!("w{i}"), name, Category::Weapon)
                .power(power)
                .type_name(type_name)
                .ammo_type(ammo)
                .damage_type(DamageType::Kinetic)
                .bucket(if i % 2 == 0 { "Kinetic Weapons" } else { "Energy Weapons" })
                .tier(Tier::Exotic)
                .owner(if i < 5 { "c-warlock" } else { "vault" })
                .locked(i % 3 == 0)
                .build()
        })
        .collect()
}

/// Armor pieces with mixed marks, classes and stat totals.
pub fn armor() -> Vec<Item> {
    vec![
        Item::builder("a1", "Ophidian Aspect", Category::Armor)
            .power(920)
            .total_stat_points(68)
            .bucket("Gauntlets")
            .energy_type(EnergyType::Arc)
            .class_allowed(ClassAllowed::Warlock)
            .tier(Tier::Exotic)
            .mark(Mark::Keep)
            .owner("c-warlock")
            .build(),
        Item::builder("a2", "Wormhusk Crown", Category::Armor)
            .power(880)
            .total_stat_points(62)
            .bucket("Helmet")
            .energy_type(EnergyType::Void)
            .class_allowed(ClassAllowed::Hunter)
            .tier(Tier::Exotic)
            .mark(Mark::Junk)
            .owner("vault")
            .build(),
        Item::builder("a3", "Plain Robes", Category::Armor)
            .power(860)
            .total_stat_points(55)
            .bucket("Chest Armor")
            .energy_type(EnergyType::Thermal)
            .class_allowed(ClassAllowed::Warlock)
            .tier(Tier::Legendary)
            .owner("vault")
            .build(),
    ]
}

/// `count` weapons named so that name order equals id order.
pub fn numbered_weapons(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            Item::builder(format!("n{i:03}"), format!("Weapon {i:03}"), Category::Weapon)
                .power(800)
                .build()
        })
        .collect()
}

pub fn ids(items: &[&Item]) -> Vec<String> {
    items.iter().map(|i| i.id.clone()).collect()
}

pub fn names(items: &[&Item]) -> Vec<String> {
    items.iter().map(|i| i.name.clone()).collect()
}
