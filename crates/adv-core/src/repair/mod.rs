//! Map validation and repair
//!
//! Turns an arbitrary room graph into one that satisfies the structural
//! invariants: valid exit targets, mirrored exits, one connected component and
//! a bounded room count. Stage order matters:
//! 1. Normalize directions
//! 2. Drop exits to unknown rooms
//! 3. Mirror exits
//! 4. Connect components
//! 5. Cap the room count (then drop exits into removed rooms again)
//!
//! Capping runs last and can leave the kept rooms split into several
//! components. By default that is reported, not fixed; set
//! [`RepairOptions::reconnect_after_cap`] to run stage 4 once more.

mod connectivity;
mod stages;

use serde::{Deserialize, Serialize};

use crate::error::AdventureError;
use crate::model::Adventure;

pub use connectivity::{ConnectivityTracker, component_count, is_connected};
pub use stages::{
    CapOutcome, cap_rooms, drop_invalid_targets, ensure_bidirectional, ensure_connected,
    normalize_directions,
};

/// Default maximum room count kept after repair
pub const DEFAULT_ROOM_CAP: usize = 30;

/// Knobs for the repair pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairOptions {
    /// Maximum number of rooms kept, by creation order
    pub cap: usize,
    /// Re-run connectivity repair after capping
    pub reconnect_after_cap: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            cap: DEFAULT_ROOM_CAP,
            reconnect_after_cap: false,
        }
    }
}

impl RepairOptions {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    /// A cap of zero would remove every room, start room included.
    pub fn validate(&self) -> Result<(), AdventureError> {
        if self.cap == 0 {
            return Err(AdventureError::InvalidCap);
        }
        Ok(())
    }
}

/// What the pipeline changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    pub directions_normalized: usize,
    pub invalid_exits_dropped: usize,
    pub reverse_exits_added: usize,
    pub corridors_added: usize,
    pub rooms_capped: usize,
    pub exits_dropped_by_cap: usize,
    pub corridors_added_after_cap: usize,
    pub start_moved: bool,
    /// The kept rooms form more than one component after capping
    pub disconnected_after_cap: bool,
}

impl RepairReport {
    /// True when the pipeline found nothing to fix
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Run the full repair pipeline in place.
///
/// Never fails. Afterwards all exit targets exist, every exit with a known
/// opposite is mirrored and the start room exists (when any room does and
/// `cap >= 1`). Connectivity holds unless capping split the map and
/// `reconnect_after_cap` is off; the report says which.
///
/// Running this again on a map whose cap gap was kept joins the gap in
/// stage 4. Use [`revalidate`] for later passes over such a map.
pub fn validate_and_fix(adv: &mut Adventure, options: &RepairOptions) -> RepairReport {
    run_pipeline(adv, options, true)
}

/// Repeat the pipeline on a map already repaired with `options`.
///
/// When `previous` kept a post-cap gap and `reconnect_after_cap` is off,
/// stage 4 is skipped so the gap survives and is reported again. Otherwise
/// this is [`validate_and_fix`].
pub fn revalidate(
    adv: &mut Adventure,
    options: &RepairOptions,
    previous: &RepairReport,
) -> RepairReport {
    let keep_gap = previous.disconnected_after_cap && !options.reconnect_after_cap;
    run_pipeline(adv, options, !keep_gap)
}

fn run_pipeline(adv: &mut Adventure, options: &RepairOptions, connect: bool) -> RepairReport {
    let mut report = RepairReport {
        directions_normalized: normalize_directions(adv),
        invalid_exits_dropped: drop_invalid_targets(adv),
        reverse_exits_added: ensure_bidirectional(adv),
        corridors_added: if connect { ensure_connected(adv) } else { 0 },
        ..RepairReport::default()
    };

    let capped = cap_rooms(adv, options.cap);
    report.rooms_capped = capped.rooms_removed;
    report.exits_dropped_by_cap = capped.exits_dropped;
    report.start_moved = capped.start_moved;

    let split = !is_connected(adv);
    if split && capped.rooms_removed > 0 && options.reconnect_after_cap {
        report.corridors_added_after_cap = ensure_connected(adv);
    } else if split && (capped.rooms_removed > 0 || !connect) {
        report.disconnected_after_cap = true;
        tracing::warn!(
            cap = options.cap,
            components = component_count(adv),
            "capping left the map disconnected"
        );
    }

    tracing::debug!(?report, rooms = adv.rooms.len(), "repair finished");
    report
}
