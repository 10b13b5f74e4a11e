//! Configuration profile persistence
//!
//! Save/load/list/delete decoder profiles as JSON files in a caller-supplied
//! directory (the host decides where its data lives).

use std::path::{Path, PathBuf};

use crate::domain::{DecoderProfile, DtmfError, DtmfResult};

/// Sanitize a profile name to prevent path traversal. Rejects anything with
/// path separators, "..", or empty strings.
fn sanitize_name(name: &str) -> DtmfResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DtmfError::Config("Profile name cannot be empty".into()));
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(DtmfError::Config("Invalid profile name".into()));
    }
    // Only allow alphanumeric, spaces, hyphens, underscores
    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err(DtmfError::Config(
            "Profile name contains invalid characters".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}

/// Write a profile as pretty JSON, creating `dir` if needed
pub fn save_profile(dir: &Path, profile: &DecoderProfile) -> DtmfResult<()> {
    let name = sanitize_name(&profile.name)?;
    std::fs::create_dir_all(dir)
        .map_err(|e| DtmfError::Config(format!("Failed to create profile dir: {e}")))?;
    let json = serde_json::to_string_pretty(profile)
        .map_err(|e| DtmfError::Config(format!("Serialization error: {e}")))?;
    std::fs::write(profile_path(dir, &name), json)
        .map_err(|e| DtmfError::Config(format!("Failed to write profile '{name}': {e}")))?;
    Ok(())
}

pub fn load_profile(dir: &Path, name: &str) -> DtmfResult<DecoderProfile> {
    let name = sanitize_name(name)?;
    let json = std::fs::read_to_string(profile_path(dir, &name))
        .map_err(|e| DtmfError::Config(format!("Failed to read profile '{name}': {e}")))?;
    serde_json::from_str(&json)
        .map_err(|e| DtmfError::Config(format!("Failed to parse profile '{name}': {e}")))
}

/// Names of all saved profiles, sorted
pub fn list_profiles(dir: &Path) -> DtmfResult<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map_err(|e| DtmfError::Config(format!("Failed to read profile dir: {e}")))?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension()?.to_str()? == "json" {
                path.file_stem()?.to_str().map(String::from)
            } else {
                None
            }
        })
        .collect();
    names.sort();
    Ok(names)
}

pub fn delete_profile(dir: &Path, name: &str) -> DtmfResult<()> {
    let name = sanitize_name(name)?;
    let path = profile_path(dir, &name);
    if !path.exists() {
        return Err(DtmfError::Config(format!("Profile '{name}' not found")));
    }
    std::fs::remove_file(&path)
        .map_err(|e| DtmfError::Config(format!("Failed to delete profile '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_name_rejects_path_traversal() {
        assert!(sanitize_name("../evil").is_err());
        assert!(sanitize_name("foo/bar").is_err());
        assert!(sanitize_name("foo\\bar").is_err());
        assert!(sanitize_name("").is_err());
        assert!(sanitize_name("  ").is_err());
    }

    #[test]
    fn sanitize_name_accepts_valid_names() {
        assert_eq!(sanitize_name("Default").unwrap(), "Default");
        assert_eq!(sanitize_name("Workbench Arduino").unwrap(), "Workbench Arduino");
        assert_eq!(sanitize_name("line_sim-2").unwrap(), "line_sim-2");
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let profile = DecoderProfile {
            name: "Bench".into(),
            line_port: Some("/dev/ttyUSB0".into()),
            baud_rate: 115_200,
            sample_rate: 9615.38,
        };
        save_profile(dir.path(), &profile).unwrap();

        let loaded = load_profile(dir.path(), "Bench").unwrap();
        assert_eq!(loaded.line_port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(loaded.sample_rate, 9615.38);
    }

    #[test]
    fn list_returns_sorted_names_and_ignores_other_files() {
        let dir = tempfile::tempdir().unwrap();
        save_profile(
            dir.path(),
            &DecoderProfile {
                name: "Zulu".into(),
                ..DecoderProfile::default()
            },
        )
        .unwrap();
        save_profile(
            dir.path(),
            &DecoderProfile {
                name: "Alpha".into(),
                ..DecoderProfile::default()
            },
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a profile").unwrap();

        assert_eq!(list_profiles(dir.path()).unwrap(), vec!["Alpha", "Zulu"]);
    }

    #[test]
    fn list_of_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(list_profiles(&missing).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_the_profile() {
        let dir = tempfile::tempdir().unwrap();
        save_profile(dir.path(), &DecoderProfile::default()).unwrap();
        delete_profile(dir.path(), "Default").unwrap();
        assert!(list_profiles(dir.path()).unwrap().is_empty());
        assert!(delete_profile(dir.path(), "Default").is_err());
    }
}
