//! Armory Data -- declarative item-definition loading for the armory
//! content database.
//!
//! Walks a directory tree of definition files (RON, TOML, or JSON), and
//! for each one synthesizes a new entity cloned from its declared origin,
//! then propagates the new entity into every subsystem table that
//! references the origin. Failures are isolated per file; the batch
//! always runs to the end and reports per-file outcomes.

pub mod loader;
pub mod pipeline;
pub mod schema;

pub use loader::{DefinitionError, discover_definition_files};
pub use pipeline::{BatchReport, EntitySummary, FileOutcome, load_definitions};
