//! adv-save: JSON snapshots of generated adventures
//!
//! A snapshot is the adventure document itself, pretty-printed. The schema
//! version lives inside the document and is checked on load.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use adv_core::{Adventure, AdventureError};

/// Where the CLI writes a snapshot when no path is given
pub const DEFAULT_OUTPUT: &str = "out/adventure.json";

/// Snapshot load/store errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid adventure: {0}")]
    Invalid(#[from] AdventureError),
}

/// Serialize an adventure to pretty JSON
pub fn to_json(adv: &Adventure) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string_pretty(adv)?)
}

/// Parse and validate an adventure document
pub fn from_json(json: &str) -> Result<Adventure, SnapshotError> {
    let adv: Adventure = serde_json::from_str(json)?;
    adv.validate()?;
    Ok(adv)
}

/// Write a snapshot, creating parent directories as needed
pub fn save_adventure(adv: &Adventure, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = to_json(adv)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;

    tracing::debug!(path = %path.display(), rooms = adv.rooms.len(), "snapshot written");
    Ok(())
}

/// Read a snapshot without validating it
///
/// Only the document shape is checked. Use this to feed hand-edited files into
/// the repair pipeline.
pub fn read_adventure(path: impl AsRef<Path>) -> Result<Adventure, SnapshotError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| SnapshotError::NotFound(path.to_path_buf()))?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Read and validate a snapshot
pub fn load_adventure(path: impl AsRef<Path>) -> Result<Adventure, SnapshotError> {
    let adv = read_adventure(path)?;
    adv.validate()?;
    Ok(adv)
}

/// Default snapshot path, relative to the working directory
pub fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adv_core::topology::make_adventure;
    use adv_core::{Exit, RepairOptions, Room, validate_and_fix};

    fn sample() -> Adventure {
        let mut adv = make_adventure("Snapshot", 123, 12);
        validate_and_fix(&mut adv, &RepairOptions::default());
        adv
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("adv_save_test_snapshot.json");

        let adv = sample();
        save_adventure(&adv, &path).unwrap();
        assert!(path.exists());

        let loaded = load_adventure(&path).unwrap();
        assert_eq!(loaded, adv);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = std::env::temp_dir().join("adv_save_test_nested");
        let path = dir.join("deeper").join("adventure.json");
        std::fs::remove_dir_all(&dir).ok();

        save_adventure(&sample(), &path).unwrap();
        assert!(path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_serialization_is_stable() {
        let adv = sample();
        let first = to_json(&adv).unwrap();
        let reparsed = from_json(&first).unwrap();
        assert_eq!(to_json(&reparsed).unwrap(), first);
    }

    #[test]
    fn test_snapshot_field_names() {
        let mut adv = Adventure::new("Tiny", 5, vec![Room::placeholder("A")], "A");
        adv.rooms[0].room_type = Some("central_hub".to_string());
        let json = to_json(&adv).unwrap();
        assert!(json.contains("\"schema_version\": 1"));
        assert!(json.contains("\"start_room\": \"A\""));
        assert!(json.contains("\"type\": \"central_hub\""));
        assert!(!json.contains("\"lore\""));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let adv = Adventure::new(
            "Dup",
            0,
            vec![Room::placeholder("A"), Room::placeholder("A")],
            "A",
        );
        let json = to_json(&adv).unwrap();
        assert!(matches!(
            from_json(&json),
            Err(SnapshotError::Invalid(AdventureError::DuplicateRoomId(_)))
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let json =
            r#"{"schema_version":1,"title":"t","seed":0,"rooms":[],"start_room":"","extra":1}"#;
        assert!(matches!(from_json(json), Err(SnapshotError::Serialization(_))));
    }

    #[test]
    fn test_read_skips_validation() {
        let path = std::env::temp_dir().join("adv_save_test_unchecked.json");
        let mut a = Room::placeholder("A");
        a.exits.push(Exit::new("North", "A"));
        let adv = Adventure::new("Raw", 0, vec![a], "A");
        std::fs::write(&path, serde_json::to_string(&adv).unwrap()).unwrap();

        assert!(read_adventure(&path).is_ok());
        assert!(matches!(
            load_adventure(&path),
            Err(SnapshotError::Invalid(AdventureError::UnknownDirection { .. }))
        ));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_adventure("/nonexistent/path/adventure.json");
        assert!(matches!(result, Err(SnapshotError::NotFound(_))));
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(default_output_path(), PathBuf::from("out/adventure.json"));
    }
}
