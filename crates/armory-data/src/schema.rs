//! Serde structs for the on-disk item-definition format.
//!
//! Wire field names follow the established definition-file convention
//! (camelCase). Pricing directives are normalized into explicit variants
//! at this boundary, so the numeric threshold that encodes them never
//! reaches core logic.

use armory_core::clone::LocaleText;
use armory_core::price::PriceDirective;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// The sentinel meaning "copy the origin's value".
const AS_ORIGINAL: &str = "asOriginal";

/// Largest numeric value still read as a relative multiplier; anything
/// above it is an absolute price.
const MULTIPLIER_MAX: f64 = 10.0;

/// A raw price field as written in a definition file: the sentinel
/// string, or a number encoding either "N x origin price" or an absolute
/// price.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Sentinel(String),
    Number(f64),
}

impl RawPrice {
    /// Normalize into an explicit directive. An unrecognized sentinel
    /// string is a schema error, reported with the offending value.
    pub fn to_directive(&self) -> Result<PriceDirective, String> {
        match self {
            RawPrice::Sentinel(s) if s == AS_ORIGINAL => Ok(PriceDirective::Inherit),
            RawPrice::Sentinel(s) => Err(s.clone()),
            RawPrice::Number(n) if *n <= MULTIPLIER_MAX => Ok(PriceDirective::ScaleBy(*n)),
            RawPrice::Number(n) => Ok(PriceDirective::Absolute(*n)),
        }
    }
}

/// A vendor listing request inside a definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderListing {
    pub trader_id: String,
    pub price: f64,
    pub amount_for_sale: u32,
    pub loyalty_req: u8,
}

/// One declarative item definition: which origin to clone, the identity
/// and prices of the new entity, and which subsystem propagations to run
/// for it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    pub clone_origin: String,
    pub id: String,
    pub flea_price: RawPrice,
    pub hand_book_price: RawPrice,
    #[serde(default)]
    pub override_properties: serde_json::Map<String, Value>,
    #[serde(default)]
    pub locales: HashMap<String, LocaleText>,
    #[serde(default)]
    pub include_in_same_quests_as_origin: bool,
    #[serde(default)]
    pub add_spawns_in_same_places_as_origin: bool,
    #[serde(default = "default_spawn_weight")]
    pub spawn_weight_compared_to_origin: f64,
    #[serde(default)]
    pub trader: Option<TraderListing>,
    #[serde(default)]
    pub craft: Option<Value>,
    #[serde(default, rename = "Buffs")]
    pub buffs: Option<Value>,
}

fn default_spawn_weight() -> f64 {
    1.0
}
