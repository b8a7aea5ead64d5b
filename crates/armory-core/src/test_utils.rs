//! Shared test fixtures for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the data
//! crate's tests can build the same database the core tests use.

use crate::tables::{
    ContainerDistribution, Database, HandbookEntry, ItemTemplate, Location, Quest, QuestCondition,
    SpawnDistribution, SpawnPoint, StaticContainer, TemplateItem, Trader,
};
use serde_json::json;

/// The origin template every fixture table references.
pub const ORIGIN_ID: &str = "5c0e530286f7747fa1419862";
/// A quest whose find-item condition accepts the origin.
pub const QUEST_ID: &str = "5a27c99a86f7747d2c6bdd8e";
/// A vendor present in the fixture trader table.
pub const TRADER_ID: &str = "54cb57776803fa99248b456e";
/// A static container whose distribution lists the origin.
pub const CONTAINER_ID: &str = "578f87b7245977356274f2cd";

/// A database with the origin entity wired into every dependent table:
/// market price 1000, catalog price 500, one matching quest condition,
/// a bigmap spawn point (probability 35), an off-list map spawn point,
/// a static container entry (probability 20), and one empty trader.
pub fn fixture_database() -> Database {
    let mut db = Database::new();

    db.templates.insert(
        ORIGIN_ID.to_string(),
        ItemTemplate {
            id: ORIGIN_ID.to_string(),
            parent: "5448f3a64bdc2d60728b456a".to_string(),
            props: json!({"Weight": 0.05, "StackMaxSize": 1})
                .as_object()
                .unwrap()
                .clone(),
        },
    );
    db.market_prices.insert(ORIGIN_ID.to_string(), 1000.0);
    db.handbook.push(HandbookEntry {
        id: ORIGIN_ID.to_string(),
        parent_id: Some("5b47574386f77428ca22b2f6".to_string()),
        price: 500.0,
    });

    db.quests.insert(
        QUEST_ID.to_string(),
        Quest {
            id: QUEST_ID.to_string(),
            name: "Shortage".to_string(),
            conditions: vec![
                QuestCondition {
                    kind: "FindItem".to_string(),
                    targets: vec![ORIGIN_ID.to_string()],
                },
                QuestCondition {
                    kind: "Kills".to_string(),
                    targets: vec![],
                },
            ],
        },
    );

    db.locations.insert("bigmap".to_string(), origin_location(35));
    db.locations.insert(
        "woods".to_string(),
        Location {
            spawnpoints: vec![SpawnPoint::default()],
        },
    );
    // Off the default world-map list; must never receive injections.
    db.locations.insert("terminal".to_string(), origin_location(50));

    db.static_loot.insert(
        CONTAINER_ID.to_string(),
        StaticContainer {
            item_distribution: vec![ContainerDistribution {
                tpl: ORIGIN_ID.to_string(),
                relative_probability: 20,
            }],
        },
    );

    db.traders.insert(TRADER_ID.to_string(), Trader::default());

    db
}

/// A location with one spawn point carrying a single origin stack and its
/// paired distribution entry.
fn origin_location(probability: u32) -> Location {
    Location {
        spawnpoints: vec![SpawnPoint {
            template_items: vec![TemplateItem {
                id: "origin_stack_1".to_string(),
                tpl: ORIGIN_ID.to_string(),
            }],
            item_distribution: vec![SpawnDistribution {
                key: "origin_stack_1".to_string(),
                relative_probability: probability,
            }],
        }],
    }
}
