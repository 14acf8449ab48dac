use gearsift::filtering::{FacetKind, InputState};
use gearsift::models::{Category, Mark};
use gearsift::settings::{FILTER_TEXT_KEY, HIGHLIGHT_ALL_PERKS_KEY};
use gearsift::{
    GearError, GearView, JsonFileSettings, MemorySettings, SettingsStore, SortField, ViewConfig,
};
use tempfile::TempDir;

mod common;
use common::{armor, init_tracing, numbered_weapons, player_with, ten_weapons};

const SNAPSHOT: &str = r#"{
    "characters": [{"id": "c1", "label": "Titan"}],
    "vault": {"id": "vault", "label": "Vault"},
    "shared": {"id": "shared", "label": "Shared"},
    "gear": [
        {"id": "1", "name": "Sunshot", "category": "Weapon", "power": 905,
         "type_name": "Hand Cannon", "ammo_type": "primary", "damage_type": "thermal",
         "owner_id": "c1", "tags": ["is:masterwork"]},
        {"id": "2", "name": "Riskrunner", "category": "Weapon", "power": 880,
         "type_name": "Submachine Gun", "owner_id": "vault", "mark": "junk",
         "notes": "Dupe, shard later"},
        {"id": "3", "name": "Helm of Saint-14", "category": "Armor", "power": 900,
         "total_stat_points": 64, "owner_id": "c1"}
    ]
}"#;

fn ids<S: SettingsStore>(view: &GearView<S>) -> Vec<&str> {
    view.visible().iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn test_snapshot_loading_builds_search_text() {
    init_tracing();
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load_json(SNAPSHOT).unwrap();
    assert_eq!(ids(&view), vec!["1", "2"]);

    view.set_filter_text("is:masterwork");
    assert_eq!(ids(&view), vec!["1"]);

    view.set_filter_text("solar");
    assert_eq!(ids(&view), vec!["1"]);

    view.set_filter_text("is:junk");
    assert_eq!(ids(&view), vec!["2"]);

    view.set_filter_text("SHARD");
    assert_eq!(ids(&view), vec!["2"]);
}

#[test]
fn test_malformed_snapshot_keeps_previous_collection() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load_json(SNAPSHOT).unwrap();
    let err = view.load_json("{\"gear\": 3}").unwrap_err();
    assert!(matches!(err, GearError::Serialization(_)));
    assert_eq!(view.total(), 2);
}

#[test]
fn test_filter_text_survives_restart_on_disk() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    {
        let store = JsonFileSettings::open(&path).unwrap();
        let mut view = GearView::new(ViewConfig::default(), store);
        view.load(player_with(ten_weapons()));
        view.set_filter_text("is:light>=900");
        view.set_highlight_all_perks(false);
        assert_eq!(view.total(), 3);
    }

    let store = JsonFileSettings::open(&path).unwrap();
    assert_eq!(store.get(FILTER_TEXT_KEY).as_deref(), Some("is:light>=900"));
    assert_eq!(store.get(HIGHLIGHT_ALL_PERKS_KEY).as_deref(), Some("false"));

    let mut view = GearView::new(ViewConfig::default(), store);
    assert!(!view.highlight_all_perks());
    view.load(player_with(ten_weapons()));
    assert_eq!(view.total(), 3);

    view.reset_filters();
    let store = JsonFileSettings::open(&path).unwrap();
    assert_eq!(store.get(FILTER_TEXT_KEY), None);
}

#[test]
fn test_custom_filter_key_from_config() {
    let config = ViewConfig::from_json(r#"{"filter_text_key": "my-filter", "page_size": 2}"#).unwrap();
    let mut view = GearView::new(config, MemorySettings::new());
    view.load(player_with(ten_weapons()));
    view.set_filter_text("rifle");
    assert_eq!(view.store().get("my-filter").as_deref(), Some("rifle"));
    assert_eq!(view.store().get(FILTER_TEXT_KEY), None);
    assert_eq!(view.visible().len(), 2);
}

#[test]
fn test_paging_through_results() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(numbered_weapons(45)));
    view.sort_by(SortField::Name);
    view.sort_by(SortField::Name);
    assert!(!view.sort().descending);

    view.set_page(2);
    assert_eq!(view.visible().len(), 5);
    assert_eq!(view.range_label(), "weapons 40-44/45");

    view.set_page(3);
    assert_eq!(view.window().page, 0);
    assert_eq!(view.range_label(), "weapons 0-19/45");

    view.show(50);
    assert_eq!(view.visible().len(), 45);
}

#[test]
fn test_facet_choices_follow_collection() {
    let mut gear = ten_weapons();
    gear.extend(armor());
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(gear));

    let weapon_types: Vec<&str> = view
        .facets()
        .facet(FacetKind::WeaponType)
        .unwrap()
        .choices()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(weapon_types.len(), 9);
    assert_eq!(weapon_types[0], "Auto Rifle");

    let owners: Vec<&str> = view
        .facets()
        .facet(FacetKind::Owner)
        .unwrap()
        .choices()
        .iter()
        .map(|c| c.label.as_str())
        .collect();
    assert_eq!(owners, vec!["Warlock", "Hunter", "Vault", "Shared"]);

    view.update_facet(FacetKind::Owner, |f| f.select_only(&[Some("vault")]));
    assert_eq!(view.total(), 5);
    assert_eq!(view.notes(), &["owner = Vault".to_string()]);
    assert_eq!(view.exclusions().get(&FacetKind::Owner), Some(&5));

    view.select_category(Category::Armor);
    assert_eq!(view.total(), 2);
}

#[test]
fn test_reload_keeps_restricted_selection() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(ten_weapons()));
    view.update_facet(FacetKind::WeaponType, |f| {
        f.select_only(&[Some("Hand Cannon")]);
    });
    assert_eq!(view.total(), 2);

    let mut gear = ten_weapons();
    gear.push(
        gearsift::Item::builder("extra", "Thorn", Category::Weapon)
            .type_name("Hand Cannon")
            .build(),
    );
    view.load(player_with(gear));
    assert_eq!(view.total(), 3);
}

fn weapon_type_labels<S: SettingsStore>(view: &GearView<S>) -> Vec<&str> {
    view.facets()
        .facet(FacetKind::WeaponType)
        .unwrap()
        .choices()
        .iter()
        .map(|c| c.label.as_str())
        .collect()
}

fn single_weapon(type_name: &str) -> Vec<gearsift::Item> {
    vec![
        gearsift::Item::builder("only", "Sidearm", Category::Weapon)
            .type_name(type_name)
            .build(),
    ]
}

#[test]
fn test_reload_replaces_weapon_type_choices() {
    init_tracing();
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(single_weapon("Bow")));
    assert_eq!(weapon_type_labels(&view), vec!["Bow"]);

    view.load(player_with(single_weapon("Glaive")));
    assert_eq!(weapon_type_labels(&view), vec!["Glaive"]);
    assert_eq!(view.total(), 1);
}

#[test]
fn test_empty_reload_clears_collection_choices() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(ten_weapons()));
    assert_eq!(weapon_type_labels(&view).len(), 9);

    view.load(player_with(Vec::new()));
    assert!(weapon_type_labels(&view).is_empty());
    assert_eq!(view.total(), 0);
    assert!(!view.filters_dirty());
}

#[test]
fn test_bulk_mark_then_filter_by_mark() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(ten_weapons()));
    view.set_filter_text("is:light>=900");
    view.mark_visible(Some(Mark::Infuse));

    view.set_filter_text("is:infuse");
    assert_eq!(view.total(), 3);

    view.update_facet(FacetKind::Mark, |f| f.select_only(&[Some("infuse")]));
    view.set_filter_text("");
    assert_eq!(view.total(), 3);

    view.mark_visible(None);
    assert_eq!(view.total(), 0);
}

#[test]
fn test_input_state_and_suggestions() {
    let mut view = GearView::new(ViewConfig::default(), MemorySettings::new());
    view.load(player_with(ten_weapons()));
    view.set_filter_text("is:locked or ");
    assert_eq!(view.input_state(), InputState::AwaitingNextToken);
    view.set_filter_text("is:locked or season:un");
    assert_eq!(view.input_state(), InputState::Idle);
    assert_eq!(view.suggestions(), &["season:undying".to_string()]);
}

