//! End-to-end adventure generation
//!
//! topology -> repair -> room types -> text -> final repair
//!
//! Types are assigned on the repaired map so degrees count both directions of
//! every exit. The final repair pass runs after the writer has been involved
//! and honours the cap mode: a gap the first pass kept is kept again.

use crate::catalog::{LocationCatalog, assign_room_types};
use crate::config::GenerationConfig;
use crate::enrich::{EnrichSummary, Enricher, enrich_rooms};
use crate::error::AdventureError;
use crate::model::Adventure;
use crate::repair::{RepairReport, revalidate, validate_and_fix};
use crate::rng::GameRng;
use crate::topology::make_adventure;

/// Sub-stream key for room type assignment
const ROOM_TYPE_STREAM: &[u8] = b"room-types";

/// A finished adventure and what it took to get there
#[derive(Debug, Clone)]
pub struct Generated {
    pub adventure: Adventure,
    /// First repair pass, straight after topology generation
    pub repair: RepairReport,
    /// Repair pass after enrichment. Its `disconnected_after_cap` describes
    /// the adventure as returned.
    pub final_repair: RepairReport,
    pub rooms_typed: usize,
    pub enrichment: EnrichSummary,
}

/// Generate, enrich and repair an adventure.
pub fn generate_adventure(
    config: &GenerationConfig,
    catalog: Option<&LocationCatalog>,
    enricher: &mut dyn Enricher,
) -> Result<Generated, AdventureError> {
    config.validate()?;
    if let Some(catalog) = catalog {
        catalog.validate()?;
    }

    let seed = config.resolve_seed();
    let options = config.repair_options();
    tracing::info!(seed, rooms = config.rooms, cap = options.cap, "generating adventure");

    let mut adventure = make_adventure(&config.title, seed, config.rooms);
    adventure.lore = config.lore.clone();
    adventure.style_guide = config.style_guide.clone();

    let repair = validate_and_fix(&mut adventure, &options);

    let rooms_typed = match catalog {
        Some(catalog) => {
            let mut rng = GameRng::derive(seed, ROOM_TYPE_STREAM);
            assign_room_types(&mut adventure, catalog, &mut rng)
        }
        None => 0,
    };

    let enrichment = enrich_rooms(&mut adventure, enricher, &config.theme);
    let final_repair = revalidate(&mut adventure, &options, &repair);

    tracing::info!(
        rooms = adventure.rooms.len(),
        exits = adventure.exit_count(),
        described = enrichment.described,
        failed = enrichment.failed.len(),
        "adventure ready"
    );

    Ok(Generated {
        adventure,
        repair,
        final_repair,
        rooms_typed,
        enrichment,
    })
}
