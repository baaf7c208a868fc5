//! Room text enrichment
//!
//! Names and descriptions come from an outside writer behind the [`Enricher`]
//! trait. The writer sees a [`RoomBrief`] and answers with a [`RoomText`]; it
//! never touches ids or exits. A failed room keeps its current text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Adventure;

/// Errors from an enrichment collaborator
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Malformed reply: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("Reply was for room {found}, expected {expected}")]
    WrongRoom { expected: String, found: String },

    #[error("Reply has an empty {0}")]
    EmptyField(&'static str),

    #[error("Writer unavailable: {0}")]
    Unavailable(String),
}

/// Everything a writer is told about one room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomBrief {
    pub id: String,
    pub placeholder_name: String,
    pub exit_count: usize,
    pub room_type: Option<String>,
    pub tags: Vec<String>,
    pub neighbour_types: Vec<String>,
    pub theme: String,
    pub lore: Option<String>,
    pub style_guide: Vec<String>,
}

/// A writer's answer for one room.
///
/// This is the only accepted reply shape. Writers that receive raw JSON
/// decode it into this type; `?` turns a decode failure into
/// [`EnrichError::MalformedReply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomText {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl RoomText {
    /// Accept this reply for room `expected_id`.
    ///
    /// The id must match and neither text field may be blank.
    pub fn verify(self, expected_id: &str) -> Result<Self, EnrichError> {
        if self.id != expected_id {
            return Err(EnrichError::WrongRoom {
                expected: expected_id.to_string(),
                found: self.id,
            });
        }
        if self.name.trim().is_empty() {
            return Err(EnrichError::EmptyField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(EnrichError::EmptyField("description"));
        }
        Ok(self)
    }
}

/// Something that can write room text
pub trait Enricher {
    fn describe(&mut self, brief: &RoomBrief) -> Result<RoomText, EnrichError>;
}

/// Offline writer that fills in fixed themed text.
#[derive(Debug, Clone, Default)]
pub struct TemplateEnricher;

impl Enricher for TemplateEnricher {
    fn describe(&mut self, brief: &RoomBrief) -> Result<RoomText, EnrichError> {
        Ok(RoomText {
            id: brief.id.clone(),
            name: format!("{} - {}", title_case(&brief.theme), brief.id),
            description: format!(
                "A {} chamber with dust and echoes. Exits lead elsewhere.",
                brief.theme
            ),
        })
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Outcome of an enrichment pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichSummary {
    pub described: usize,
    pub failed: Vec<String>,
}

/// Build the brief for room `index`
pub fn brief_for(adv: &Adventure, index: usize, theme: &str) -> Option<RoomBrief> {
    let room = adv.rooms.get(index)?;
    Some(RoomBrief {
        id: room.id.clone(),
        placeholder_name: room.name.clone(),
        exit_count: room.exits.len(),
        room_type: room.room_type.clone(),
        tags: room.tags.clone(),
        neighbour_types: adv.neighbour_types(&room.id),
        theme: theme.to_string(),
        lore: adv.lore.clone(),
        style_guide: adv.style_guide.clone().unwrap_or_default(),
    })
}

/// Ask `enricher` for every room's text, in room order.
///
/// Only `name` and `description` change. A failure is logged and the room
/// keeps whatever text it had.
pub fn enrich_rooms(
    adv: &mut Adventure,
    enricher: &mut dyn Enricher,
    theme: &str,
) -> EnrichSummary {
    let mut summary = EnrichSummary::default();

    for index in 0..adv.rooms.len() {
        let Some(brief) = brief_for(adv, index, theme) else {
            continue;
        };

        let reply = enricher
            .describe(&brief)
            .and_then(|text| text.verify(&brief.id));

        match reply {
            Ok(text) => {
                let room = &mut adv.rooms[index];
                room.name = text.name;
                room.description = text.description;
                summary.described += 1;
            }
            Err(err) => {
                tracing::warn!(
                    room = %brief.id,
                    error = %err,
                    "enrichment failed, keeping placeholder"
                );
                summary.failed.push(brief.id);
            }
        }
    }

    summary
}
