//! End-to-end tests: definition files on disk, a populated database, one
//! batch load, and assertions over every dependent table.

use armory_core::propagate::PropagationConfig;
use armory_core::test_utils::{CONTAINER_ID, ORIGIN_ID, QUEST_ID, fixture_database};
use armory_data::load_definitions;
use std::fs;
use std::path::{Path, PathBuf};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "armory_pipeline_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

/// The full scenario: origin with market price 1000 and catalog price
/// 500, referenced by a find-item quest condition and a static container
/// at probability 20. The definition scales the market price by 2,
/// inherits the catalog price, and propagates into quests and spawns at
/// weight 0.1.
#[test]
fn end_to_end_clone_and_propagate() {
    let dir = make_test_dir("end_to_end");
    fs::write(
        dir.join("x.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "X",
                "fleaPrice": 2,
                "handBookPrice": "asOriginal",
                "includeInSameQuestsAsOrigin": true,
                "addSpawnsInSamePlacesAsOrigin": true,
                "spawnWeightComparedToOrigin": 0.1
            }}"#
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    let report = load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 0);

    // Cloned with market price 2000 and catalog price 500.
    assert!(db.templates.contains_key("X"));
    assert_eq!(db.market_price("X"), Some(2000.0));
    assert_eq!(db.handbook_price("X"), Some(500.0));

    // The quest condition now accepts both the origin and the clone.
    let targets = &db.quests[QUEST_ID].conditions[0].targets;
    assert!(targets.iter().any(|t| t == ORIGIN_ID));
    assert!(targets.iter().any(|t| t == "X"));

    // Container distribution gains max(round(20 * 0.1), 1) = 2.
    let entry = db.static_loot[CONTAINER_ID]
        .item_distribution
        .iter()
        .find(|e| e.tpl == "X")
        .unwrap();
    assert_eq!(entry.relative_probability, 2);

    cleanup(&dir);
}

/// Every inserted world-spawn template item has exactly one matching
/// distribution entry, scanned over the final state.
#[test]
fn world_spawn_entries_come_in_pairs() {
    let dir = make_test_dir("pairs");
    fs::write(
        dir.join("x.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "X",
                "fleaPrice": "asOriginal",
                "handBookPrice": "asOriginal",
                "addSpawnsInSamePlacesAsOrigin": true,
                "spawnWeightComparedToOrigin": 1.0
            }}"#
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    for location in db.locations.values() {
        for point in &location.spawnpoints {
            let inserted_items = point
                .template_items
                .iter()
                .filter(|i| i.tpl == "X")
                .count();
            let inserted_dists = point
                .item_distribution
                .iter()
                .filter(|d| d.key == "X_composedkey")
                .count();
            assert_eq!(inserted_items, inserted_dists);
        }
    }

    cleanup(&dir);
}

/// A malformed file is reported and skipped; later files still load.
#[test]
fn malformed_definition_does_not_stop_the_batch() {
    let dir = make_test_dir("malformed");
    fs::write(dir.join("a_bad.json"), "this is not json {{{").unwrap();
    fs::write(
        dir.join("b_good.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "good_clone",
                "fleaPrice": "asOriginal",
                "handBookPrice": "asOriginal"
            }}"#
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    let report = load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert!(db.templates.contains_key("good_clone"));

    cleanup(&dir);
}

/// A definition whose origin is missing fails alone; the rest proceed.
#[test]
fn unknown_origin_fails_only_its_own_definition() {
    let dir = make_test_dir("unknown_origin");
    fs::write(
        dir.join("a.json"),
        r#"{
            "cloneOrigin": "nonexistent",
            "id": "orphan",
            "fleaPrice": "asOriginal",
            "handBookPrice": "asOriginal"
        }"#,
    )
    .unwrap();
    fs::write(
        dir.join("b.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "survivor",
                "fleaPrice": "asOriginal",
                "handBookPrice": "asOriginal"
            }}"#
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    let report = load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert!(!db.templates.contains_key("orphan"));
    assert!(db.templates.contains_key("survivor"));

    cleanup(&dir);
}

/// Definitions in nested directories and mixed formats load in one batch.
#[test]
fn nested_directories_and_mixed_formats() {
    let dir = make_test_dir("nested");
    fs::create_dir_all(dir.join("stims/experimental")).unwrap();
    fs::write(
        dir.join("stims/a.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "clone_json",
                "fleaPrice": "asOriginal",
                "handBookPrice": "asOriginal"
            }}"#
        ),
    )
    .unwrap();
    fs::write(
        dir.join("stims/experimental/b.ron"),
        format!(
            r#"(
                cloneOrigin: "{ORIGIN_ID}",
                id: "clone_ron",
                fleaPrice: 2.0,
                handBookPrice: "asOriginal",
            )"#
        ),
    )
    .unwrap();
    fs::write(
        dir.join("stims/c.toml"),
        format!(
            "cloneOrigin = \"{ORIGIN_ID}\"\nid = \"clone_toml\"\nfleaPrice = 25000\nhandBookPrice = \"asOriginal\"\n"
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    let report = load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    assert_eq!(report.succeeded(), 3);
    assert_eq!(db.market_price("clone_json"), Some(1000.0));
    assert_eq!(db.market_price("clone_ron"), Some(2000.0));
    assert_eq!(db.market_price("clone_toml"), Some(25000.0));

    cleanup(&dir);
}

/// Loading the same definition twice leaves quest targets deduplicated
/// while the clone itself is simply re-registered.
#[test]
fn reloading_does_not_duplicate_quest_targets() {
    let dir = make_test_dir("reload");
    fs::write(
        dir.join("x.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "X",
                "fleaPrice": "asOriginal",
                "handBookPrice": "asOriginal",
                "includeInSameQuestsAsOrigin": true
            }}"#
        ),
    )
    .unwrap();

    let mut db = fixture_database();
    load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();
    load_definitions(&mut db, &dir, &PropagationConfig::default()).unwrap();

    let targets = &db.quests[QUEST_ID].conditions[0].targets;
    assert_eq!(targets.iter().filter(|t| *t == "X").count(), 1);

    cleanup(&dir);
}
