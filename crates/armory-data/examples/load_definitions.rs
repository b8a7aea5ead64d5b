//! Minimal load example: a pre-seeded database, two definition files,
//! one batch.
//!
//! Writes definitions into a temp directory, runs the loader against a
//! database already containing the origin entity, and prints the
//! per-file report.
//!
//! Run with: `cargo run -p armory-data --example load_definitions`

use armory_core::propagate::PropagationConfig;
use armory_core::test_utils::{ORIGIN_ID, TRADER_ID, fixture_database};
use armory_data::load_definitions;
use std::fs;

fn main() {
    tracing_subscriber::fmt().init();

    // --- Step 1: Stage definition files ---

    let dir = std::env::temp_dir().join(format!("armory_demo_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("temp dir created");

    fs::write(
        dir.join("budget_stim.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "budget_stim",
                "fleaPrice": 0.5,
                "handBookPrice": "asOriginal",
                "locales": {{"en": {{"name": "Budget Stim", "shortName": "BStim", "description": "A watered-down variant."}}}},
                "includeInSameQuestsAsOrigin": true,
                "addSpawnsInSamePlacesAsOrigin": true,
                "spawnWeightComparedToOrigin": 2.0
            }}"#
        ),
    )
    .expect("definition written");

    fs::write(
        dir.join("premium_stim.json"),
        format!(
            r#"{{
                "cloneOrigin": "{ORIGIN_ID}",
                "id": "premium_stim",
                "fleaPrice": 75000,
                "handBookPrice": 60000,
                "trader": {{"traderId": "{TRADER_ID}", "price": 80000, "amountForSale": 2, "loyaltyReq": 3}}
            }}"#
        ),
    )
    .expect("definition written");

    // --- Step 2: Load the batch ---

    let mut db = fixture_database();
    let report = load_definitions(&mut db, &dir, &PropagationConfig::default())
        .expect("definition directory walked");

    // --- Step 3: Inspect the outcome ---

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(summary) => println!(
                "{}: cloned '{}' (quests +{}, world pairs +{}, containers +{}, trader: {}, craft: {})",
                outcome.file.display(),
                summary.new_id,
                summary.quest_conditions_extended,
                summary.world_spawn_pairs,
                summary.containers_extended,
                summary.trader_listed,
                summary.craft_appended,
            ),
            Err(e) => println!("{}: failed: {e}", outcome.file.display()),
        }
    }

    println!(
        "batch finished: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    println!(
        "budget_stim market price: {:?}",
        db.market_price("budget_stim")
    );

    let _ = fs::remove_dir_all(&dir);
}
