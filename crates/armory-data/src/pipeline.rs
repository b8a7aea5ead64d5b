//! The load pipeline: drives parsing, price resolution, cloning, and
//! reference propagation once per definition file.
//!
//! Failures are isolated per file. A definition that fails to parse or
//! clone is recorded in the [`BatchReport`] and the batch moves on;
//! mutations a failing definition already applied are not rolled back.

use crate::loader::{DefinitionError, deserialize_definition, discover_definition_files};
use crate::schema::ItemDefinition;
use armory_core::clone::{CloneError, CloneRequest, create_from_clone};
use armory_core::price::resolve_price;
use armory_core::propagate::{
    PropagationConfig, append_craft, extend_container_spawns, extend_quest_conditions,
    extend_world_spawns, list_with_trader, register_effect_preset,
};
use armory_core::tables::Database;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What one successfully processed definition did to the database.
#[derive(Debug, Clone)]
pub struct EntitySummary {
    pub new_id: String,
    pub quest_conditions_extended: usize,
    pub world_spawn_pairs: usize,
    pub containers_extended: usize,
    pub trader_listed: bool,
    pub craft_appended: bool,
}

/// Outcome of one definition file.
#[derive(Debug)]
pub struct FileOutcome {
    pub file: PathBuf,
    pub result: Result<EntitySummary, DefinitionError>,
}

/// Per-batch outcome report, one entry per discovered definition file.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Load every definition under `dir` into `db`.
///
/// The outer error covers only the directory walk; everything per file is
/// captured in the report.
pub fn load_definitions(
    db: &mut Database,
    dir: &Path,
    config: &PropagationConfig,
) -> Result<BatchReport, DefinitionError> {
    info!(dir = %dir.display(), "definition load started");
    let files = discover_definition_files(dir)?;

    let mut report = BatchReport::default();
    for file in files {
        debug!(file = %file.display(), "processing definition");
        let result = process_file(db, &file, config);
        match &result {
            Ok(summary) => {
                info!(file = %file.display(), id = %summary.new_id, "definition applied");
            }
            Err(e) => {
                error!(file = %file.display(), "definition failed: {e}");
            }
        }
        report.outcomes.push(FileOutcome { file, result });
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "definition load finished"
    );
    Ok(report)
}

fn process_file(
    db: &mut Database,
    file: &Path,
    config: &PropagationConfig,
) -> Result<EntitySummary, DefinitionError> {
    let definition = deserialize_definition(file)?;
    apply_definition(db, file, definition, config)
}

/// Apply one parsed definition: resolve both prices, synthesize the
/// clone, then run the flag-gated propagations in fixed order.
fn apply_definition(
    db: &mut Database,
    file: &Path,
    definition: ItemDefinition,
    config: &PropagationConfig,
) -> Result<EntitySummary, DefinitionError> {
    let market_directive = definition.flea_price.to_directive().map_err(|value| {
        DefinitionError::InvalidPriceDirective {
            file: file.to_path_buf(),
            value,
        }
    })?;
    let handbook_directive = definition.hand_book_price.to_directive().map_err(|value| {
        DefinitionError::InvalidPriceDirective {
            file: file.to_path_buf(),
            value,
        }
    })?;

    let origin = &definition.clone_origin;

    // Each price field resolves against its own source table.
    let market_price = resolve_price(market_directive, db.market_price(origin));
    let handbook_price = resolve_price(handbook_directive, db.handbook_price(origin));

    let parent_id = db
        .templates
        .get(origin)
        .map(|template| template.parent.clone())
        .ok_or_else(|| CloneError::UnknownSource { id: origin.clone() })?;
    let handbook_parent_id = db
        .handbook_entry(origin)
        .and_then(|entry| entry.parent_id.clone());

    create_from_clone(
        db,
        CloneRequest {
            clone_source: definition.clone_origin.clone(),
            new_id: definition.id.clone(),
            parent_id,
            handbook_parent_id,
            market_price,
            handbook_price,
            override_properties: definition.override_properties,
            locales: definition.locales,
        },
    )?;

    if let Some(buffs) = definition.buffs {
        register_effect_preset(&mut db.effect_presets, &definition.id, buffs);
    }

    let quest_conditions_extended = if definition.include_in_same_quests_as_origin {
        extend_quest_conditions(
            &mut db.quests,
            &config.quest_finish_kinds,
            origin,
            &definition.id,
        )
    } else {
        0
    };

    let (world_spawn_pairs, containers_extended) = if definition.add_spawns_in_same_places_as_origin
    {
        let weight = definition.spawn_weight_compared_to_origin;
        (
            extend_world_spawns(
                &mut db.locations,
                &config.world_maps,
                origin,
                &definition.id,
                weight,
            ),
            extend_container_spawns(&mut db.static_loot, origin, &definition.id, weight),
        )
    } else {
        (0, 0)
    };

    let trader_listed = match &definition.trader {
        Some(listing) => list_with_trader(
            &mut db.traders,
            &listing.trader_id,
            &definition.id,
            listing.price,
            listing.amount_for_sale,
            listing.loyalty_req,
        ),
        None => false,
    };

    let craft_appended = match definition.craft {
        Some(recipe) => {
            append_craft(&mut db.production, recipe);
            true
        }
        None => false,
    };

    Ok(EntitySummary {
        new_id: definition.id,
        quest_conditions_extended,
        world_spawn_pairs,
        containers_extended,
        trader_listed,
        craft_appended,
    })
}
