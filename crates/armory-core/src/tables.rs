//! The host's mutable in-memory content tables.
//!
//! Everything here is shared state the host owns for its whole lifetime;
//! the load phase is the exclusive writer. Opaque payloads (crafting
//! recipes, effect buffs) stay as [`serde_json::Value`] -- their shape
//! belongs to other subsystems.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Template ID of the rouble currency item. Every trader listing created
/// by the propagator is priced in this currency.
pub const ROUBLE_TPL: &str = "5449016a4bdc2d6f028b456f";

/// An item template record. `props` is the open-ended property bag the
/// host attaches to every template; the cloner copies the origin's bag
/// and layers definition overrides on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: String,
    pub parent: String,
    #[serde(default)]
    pub props: serde_json::Map<String, Value>,
}

/// A catalog (handbook) entry: category linkage plus the catalog price.
/// An item may have no entry at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandbookEntry {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub price: f64,
}

/// A quest completion condition. For hand-over / find conditions,
/// `targets` lists the acceptable template IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestCondition {
    pub kind: String,
    #[serde(default)]
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub conditions: Vec<QuestCondition>,
}

/// A possible physical item stack at a spawn point. `id` is the local
/// stack ID that the distribution list refers to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub id: String,
    pub tpl: String,
}

/// Maps a local stack ID to its relative spawn probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnDistribution {
    pub key: String,
    pub relative_probability: u32,
}

/// One loose-loot spawn point on a world map.
///
/// Invariant: `template_items` and `item_distribution` are extended as a
/// pair -- a stack entry without a distribution entry (or the reverse) is
/// corrupt data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnPoint {
    #[serde(default)]
    pub template_items: Vec<TemplateItem>,
    #[serde(default)]
    pub item_distribution: Vec<SpawnDistribution>,
}

/// Loose-loot data for one world map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub spawnpoints: Vec<SpawnPoint>,
}

/// Distribution entry of a static container, keyed by template ID
/// directly (no local stack indirection).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerDistribution {
    pub tpl: String,
    pub relative_probability: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticContainer {
    #[serde(default)]
    pub item_distribution: Vec<ContainerDistribution>,
}

/// Stack bookkeeping on a trader assort item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackDetails {
    pub unlimited_count: bool,
    pub stack_objects_count: u32,
}

/// One sellable stack in a vendor's assortment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssortItem {
    pub id: String,
    pub tpl: String,
    pub parent_id: String,
    pub slot_id: String,
    pub upd: StackDetails,
}

/// One leg of a barter cost: `count` units of the `tpl` item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarterCost {
    pub count: f64,
    pub tpl: String,
}

/// A vendor's stock: stack entries, barter costs, and loyalty-level
/// requirements, the latter two keyed by assort item ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assortment {
    #[serde(default)]
    pub items: Vec<AssortItem>,
    #[serde(default)]
    pub barter_scheme: HashMap<String, Vec<Vec<BarterCost>>>,
    #[serde(default)]
    pub loyal_level_items: HashMap<String, u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trader {
    #[serde(default)]
    pub assort: Assortment,
}

/// The mutable in-memory content database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Database {
    pub templates: HashMap<String, ItemTemplate>,
    pub handbook: Vec<HandbookEntry>,
    pub market_prices: HashMap<String, f64>,
    pub quests: HashMap<String, Quest>,
    pub locations: HashMap<String, Location>,
    pub static_loot: HashMap<String, StaticContainer>,
    pub traders: HashMap<String, Trader>,
    pub production: Vec<Value>,
    pub effect_presets: HashMap<String, Value>,
    pub locales: HashMap<String, HashMap<String, String>>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Market price of a template, if listed.
    pub fn market_price(&self, tpl: &str) -> Option<f64> {
        self.market_prices.get(tpl).copied()
    }

    /// Handbook entry of a template, if cataloged.
    pub fn handbook_entry(&self, tpl: &str) -> Option<&HandbookEntry> {
        self.handbook.iter().find(|entry| entry.id == tpl)
    }

    /// Catalog price of a template, if cataloged.
    pub fn handbook_price(&self, tpl: &str) -> Option<f64> {
        self.handbook_entry(tpl).map(|entry| entry.price)
    }
}
