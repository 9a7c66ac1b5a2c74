use std::fs;
use std::path::Path;

use tracing::info;

use super::OffsetsCollection;
use crate::error::{Error, Result};

/// Load an offset table from a JSON file.
///
/// Tables with a missing version or zero offsets are rejected.
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<OffsetsCollection> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let offsets: OffsetsCollection = serde_json::from_str(&content)?;

    if !offsets.is_valid() {
        return Err(Error::InvalidOffset(format!(
            "{} has a missing version or zero offsets",
            path.display()
        )));
    }

    info!("Loaded offsets version {} from {}", offsets.version, path.display());
    Ok(offsets)
}

/// Write an offset table as pretty JSON
pub fn save_offsets<P: AsRef<Path>>(path: P, offsets: &OffsetsCollection) -> Result<()> {
    let content = serde_json::to_string_pretty(offsets)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let offsets = OffsetsCollection {
            version: "test".to_string(),
            local_player_pawn: 0x1000,
            old_origin: 0x20,
            velocity: 0x30,
        };

        save_offsets(temp_file.path(), &offsets).unwrap();
        let loaded = load_offsets(temp_file.path()).unwrap();
        assert_eq!(loaded, offsets);
    }

    #[test]
    fn test_load_rejects_zero_offsets() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"version":"x","local_player_pawn":0,"old_origin":16,"velocity":32}}"#
        )
        .unwrap();

        assert!(matches!(
            load_offsets(temp_file.path()),
            Err(Error::InvalidOffset(_))
        ));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "not json").unwrap();
        assert!(matches!(load_offsets(temp_file.path()), Err(Error::Json(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_offsets(dir.path().join("nope.json")).unwrap_err();
        assert!(err.is_not_found());
    }
}
