//! Reference propagation: injecting a synthesized entity into every
//! subsystem table that references its origin.
//!
//! Each function is a narrow, single-table operation that takes only the
//! table it mutates. A lookup that finds no match is a silent no-op; the
//! returned counts tell the caller what actually happened so it can build
//! a structured per-definition summary.

use crate::tables::{
    AssortItem, BarterCost, ContainerDistribution, Location, Quest, ROUBLE_TPL, SpawnDistribution,
    SpawnPoint, StackDetails, StaticContainer, TemplateItem, Trader,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Table-shape configuration for the propagator.
///
/// The world-map enumeration and the recognized finish-condition kinds
/// drift across host versions, so both are data rather than code. The
/// default matches the current host schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// World maps whose loose-loot spawn points receive injections.
    pub world_maps: Vec<String>,
    /// Quest condition kinds whose target lists are extended.
    pub quest_finish_kinds: Vec<String>,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            world_maps: [
                "bigmap",
                "woods",
                "factory4_day",
                "factory4_night",
                "interchange",
                "laboratory",
                "lighthouse",
                "rezervbase",
                "shoreline",
                "tarkovstreets",
            ]
            .iter()
            .map(|map| map.to_string())
            .collect(),
            quest_finish_kinds: vec!["HandoverItem".to_string(), "FindItem".to_string()],
        }
    }
}

/// Register an effect-buff payload under the new template ID in the
/// global effects configuration. Direct insertion, no search.
pub fn register_effect_preset(presets: &mut HashMap<String, Value>, new_id: &str, buffs: Value) {
    presets.insert(new_id.to_string(), buffs);
}

/// Extend every finish condition that accepts the origin so it also
/// accepts the new template. Conditions are never created or removed,
/// and a target list that already carries the new ID is left untouched,
/// so a second run adds nothing. Returns the number of conditions
/// extended.
pub fn extend_quest_conditions(
    quests: &mut HashMap<String, Quest>,
    finish_kinds: &[String],
    origin: &str,
    new_id: &str,
) -> usize {
    let mut extended = 0;
    for quest in quests.values_mut() {
        for condition in &mut quest.conditions {
            if !finish_kinds.iter().any(|kind| kind == &condition.kind) {
                continue;
            }
            if condition.targets.iter().any(|target| target == origin)
                && !condition.targets.iter().any(|target| target == new_id)
            {
                condition.targets.push(new_id.to_string());
                extended += 1;
            }
        }
    }
    extended
}

/// Relative probability for the injected entity: the origin's probability
/// scaled by the definition's weight and rounded, floored at 1 so a
/// positive spawn weight never collapses to zero.
fn scaled_probability(origin_probability: u32, weight: f64) -> u32 {
    ((origin_probability as f64 * weight).round() as u32).max(1)
}

/// The local stack ID linking an injected template item to its
/// distribution entry.
fn composed_key(new_id: &str) -> String {
    format!("{new_id}_composedkey")
}

/// Inject the new entity into every spawn point of the listed world maps
/// where the origin can spawn.
///
/// A template item and its distribution entry are appended strictly as a
/// pair; an origin item whose local stack ID has no distribution entry
/// contributes nothing. One pair is appended per origin-referencing item,
/// not deduplicated. Returns the number of pairs appended.
pub fn extend_world_spawns(
    locations: &mut HashMap<String, Location>,
    world_maps: &[String],
    origin: &str,
    new_id: &str,
    weight: f64,
) -> usize {
    let mut appended = 0;
    for map in world_maps {
        let Some(location) = locations.get_mut(map) else {
            continue;
        };
        for point in &mut location.spawnpoints {
            let SpawnPoint {
                template_items,
                item_distribution,
            } = point;

            // Scan before appending so the new pairs do not feed the scan.
            let origin_probabilities: Vec<u32> = template_items
                .iter()
                .filter(|item| item.tpl == origin)
                .filter_map(|item| {
                    item_distribution
                        .iter()
                        .find(|dist| dist.key == item.id)
                        .map(|dist| dist.relative_probability)
                })
                .collect();

            for origin_probability in origin_probabilities {
                template_items.push(TemplateItem {
                    id: composed_key(new_id),
                    tpl: new_id.to_string(),
                });
                item_distribution.push(SpawnDistribution {
                    key: composed_key(new_id),
                    relative_probability: scaled_probability(origin_probability, weight),
                });
                appended += 1;
            }
        }
    }
    appended
}

/// Inject the new entity into every static container whose distribution
/// already lists the origin, scaling that container's own probability.
/// Returns the number of containers extended.
pub fn extend_container_spawns(
    static_loot: &mut HashMap<String, StaticContainer>,
    origin: &str,
    new_id: &str,
    weight: f64,
) -> usize {
    let mut extended = 0;
    for container in static_loot.values_mut() {
        let Some(origin_probability) = container
            .item_distribution
            .iter()
            .find(|entry| entry.tpl == origin)
            .map(|entry| entry.relative_probability)
        else {
            continue;
        };
        container.item_distribution.push(ContainerDistribution {
            tpl: new_id.to_string(),
            relative_probability: scaled_probability(origin_probability, weight),
        });
        extended += 1;
    }
    extended
}

/// List the new entity with a vendor: one limited stack parked in the
/// vendor's virtual hideout slot, a single rouble barter cost, and the
/// loyalty-level requirement. An unknown vendor is a no-op. Returns
/// whether a listing was created.
pub fn list_with_trader(
    traders: &mut HashMap<String, Trader>,
    trader_id: &str,
    new_id: &str,
    price: f64,
    amount_for_sale: u32,
    loyalty_req: u8,
) -> bool {
    let Some(trader) = traders.get_mut(trader_id) else {
        return false;
    };
    trader.assort.items.push(AssortItem {
        id: new_id.to_string(),
        tpl: new_id.to_string(),
        parent_id: "hideout".to_string(),
        slot_id: "hideout".to_string(),
        upd: StackDetails {
            unlimited_count: false,
            stack_objects_count: amount_for_sale,
        },
    });
    trader.assort.barter_scheme.insert(
        new_id.to_string(),
        vec![vec![BarterCost {
            count: price,
            tpl: ROUBLE_TPL.to_string(),
        }]],
    );
    trader
        .assort
        .loyal_level_items
        .insert(new_id.to_string(), loyalty_req);
    true
}

/// Append a crafting recipe payload verbatim to the production list.
/// The payload's shape is not validated.
pub fn append_craft(production: &mut Vec<Value>, recipe: Value) {
    production.push(recipe);
}
