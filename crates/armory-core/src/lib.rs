//! Armory Core -- the content-clone engine for an in-memory game database.
//!
//! The host process owns a large mutable content database (item templates,
//! price tables, quests, loot spawn tables, trader assortments, crafting
//! recipes). This crate models those tables and provides the machinery to
//! synthesize a new entity as a clone of an existing origin entity and to
//! propagate references to it into every table that references the origin.
//!
//! # Key Types
//!
//! - [`tables::Database`] -- the mutable in-memory tables, edited in place.
//! - [`price::PriceDirective`] -- how a price field derives from the origin's.
//! - [`clone::CloneRequest`] / [`clone::create_from_clone`] -- the entity
//!   synthesizer: origin defaults plus definition overrides.
//! - [`propagate`] -- per-table injection of the new entity ID into quest
//!   conditions, loot spawn points, static containers, trader assortments,
//!   and the crafting production list.
//! - [`propagate::PropagationConfig`] -- the world-map enumeration and the
//!   recognized quest condition kinds, carried as data rather than code.
//!
//! The whole load runs single-threaded during host initialization; no table
//! has a concurrent reader or writer while this crate mutates it.

pub mod clone;
pub mod price;
pub mod propagate;
pub mod tables;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
