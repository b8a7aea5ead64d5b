//! The entity synthesizer: creates a new item template as a clone of an
//! existing origin, with definition overrides layered over the origin's
//! property defaults.

use crate::tables::{Database, HandbookEntry, ItemTemplate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Localized display text for one language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleText {
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub description: String,
}

/// Everything needed to register a new template and its derived records
/// in one call: clone source, identity, category linkage, resolved
/// prices, property overrides, and display text.
#[derive(Debug, Clone)]
pub struct CloneRequest {
    pub clone_source: String,
    pub new_id: String,
    pub parent_id: String,
    pub handbook_parent_id: Option<String>,
    pub market_price: Option<f64>,
    pub handbook_price: Option<f64>,
    pub override_properties: serde_json::Map<String, Value>,
    pub locales: HashMap<String, LocaleText>,
}

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("clone source template '{id}' does not exist")]
    UnknownSource { id: String },
}

/// Create a new template from `request` and register it, its prices, and
/// its locale text into `db`.
///
/// Fails only when the clone source is missing. There is no rollback: a
/// request that has been applied stays applied.
pub fn create_from_clone(db: &mut Database, request: CloneRequest) -> Result<(), CloneError> {
    let origin = db
        .templates
        .get(&request.clone_source)
        .ok_or_else(|| CloneError::UnknownSource {
            id: request.clone_source.clone(),
        })?;

    // Origin props are the defaults; every override field wins.
    let mut props = origin.props.clone();
    for (key, value) in request.override_properties {
        props.insert(key, value);
    }

    db.templates.insert(
        request.new_id.clone(),
        ItemTemplate {
            id: request.new_id.clone(),
            parent: request.parent_id,
            props,
        },
    );

    if let Some(price) = request.market_price {
        db.market_prices.insert(request.new_id.clone(), price);
    }

    // A definition without a resolvable catalog price yields no handbook
    // entry at all, matching how a missing origin entry propagates.
    if let Some(price) = request.handbook_price {
        db.handbook.push(HandbookEntry {
            id: request.new_id.clone(),
            parent_id: request.handbook_parent_id,
            price,
        });
    }

    for (lang, text) in request.locales {
        let entries = db.locales.entry(lang).or_default();
        entries.insert(format!("{} Name", request.new_id), text.name);
        entries.insert(format!("{} ShortName", request.new_id), text.short_name);
        entries.insert(format!("{} Description", request.new_id), text.description);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_database, ORIGIN_ID};
    use serde_json::json;

    fn basic_request(new_id: &str) -> CloneRequest {
        CloneRequest {
            clone_source: ORIGIN_ID.to_string(),
            new_id: new_id.to_string(),
            parent_id: "parent_category".to_string(),
            handbook_parent_id: Some("handbook_category".to_string()),
            market_price: Some(2000.0),
            handbook_price: Some(500.0),
            override_properties: serde_json::Map::new(),
            locales: HashMap::new(),
        }
    }

    #[test]
    fn clone_registers_template_and_prices() {
        let mut db = fixture_database();
        create_from_clone(&mut db, basic_request("clone_a")).unwrap();

        let template = &db.templates["clone_a"];
        assert_eq!(template.id, "clone_a");
        assert_eq!(template.parent, "parent_category");
        assert_eq!(db.market_price("clone_a"), Some(2000.0));
        let entry = db.handbook_entry("clone_a").unwrap();
        assert_eq!(entry.price, 500.0);
        assert_eq!(entry.parent_id.as_deref(), Some("handbook_category"));
    }

    #[test]
    fn unknown_source_fails() {
        let mut db = fixture_database();
        let mut request = basic_request("clone_a");
        request.clone_source = "nonexistent".to_string();

        let result = create_from_clone(&mut db, request);
        assert!(matches!(
            result,
            Err(CloneError::UnknownSource { ref id }) if id == "nonexistent"
        ));
        assert!(!db.templates.contains_key("clone_a"));
    }

    #[test]
    fn overrides_layer_over_origin_defaults() {
        let mut db = fixture_database();
        let mut request = basic_request("clone_a");
        request.override_properties = json!({"StackMaxSize": 5, "NewField": "x"})
            .as_object()
            .unwrap()
            .clone();

        create_from_clone(&mut db, request).unwrap();

        let props = &db.templates["clone_a"].props;
        // Overridden field takes the definition's value.
        assert_eq!(props["StackMaxSize"], json!(5));
        // Field absent from the overrides keeps the origin's value.
        assert_eq!(props["Weight"], db.templates[ORIGIN_ID].props["Weight"]);
        assert_eq!(props["NewField"], json!("x"));
    }

    #[test]
    fn missing_handbook_price_creates_no_entry() {
        let mut db = fixture_database();
        let mut request = basic_request("clone_a");
        request.handbook_price = None;

        create_from_clone(&mut db, request).unwrap();
        assert!(db.handbook_entry("clone_a").is_none());
    }

    #[test]
    fn missing_market_price_creates_no_listing() {
        let mut db = fixture_database();
        let mut request = basic_request("clone_a");
        request.market_price = None;

        create_from_clone(&mut db, request).unwrap();
        assert_eq!(db.market_price("clone_a"), None);
    }

    #[test]
    fn locales_registered_per_language() {
        let mut db = fixture_database();
        let mut request = basic_request("clone_a");
        request.locales.insert(
            "en".to_string(),
            LocaleText {
                name: "Cloned Stim".to_string(),
                short_name: "CStim".to_string(),
                description: "A cloned stimulator.".to_string(),
            },
        );

        create_from_clone(&mut db, request).unwrap();

        let en = &db.locales["en"];
        assert_eq!(en["clone_a Name"], "Cloned Stim");
        assert_eq!(en["clone_a ShortName"], "CStim");
        assert_eq!(en["clone_a Description"], "A cloned stimulator.");
    }
}
