//! # File I/O Module
//!
//! Handles case file operations:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## Example
//!
//! ```rust,no_run
//! use beam_core::file_io::{load_case, save_case};
//! use std::path::Path;
//!
//! let path = Path::new("b1.beam.json");
//! let mut case = load_case(path)?;
//! case.touch();
//! save_case(&case, path)?;
//! # Ok::<(), beam_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::case::{AnalysisCase, SCHEMA_VERSION};
use crate::errors::{CalcError, CalcResult};

/// Save a case to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize case to JSON
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync) and read back to verify
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_case(case: &AnalysisCase, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(case).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    let written = fs::read_to_string(&tmp_path).map_err(|e| {
        CalcError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    if written != json {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::file_error(
            "verify temp file",
            tmp_path.display().to_string(),
            "contents read back differ from contents written",
        ));
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved case '{}' to {}", case.meta.job_id, path.display());
    Ok(())
}

/// Load a case from a file.
///
/// # Returns
///
/// * `Ok(AnalysisCase)` - Successfully loaded case
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_case(path: &Path) -> CalcResult<AnalysisCase> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let case: AnalysisCase =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&case.meta.version)?;

    log::debug!(
        "loaded case '{}' (schema {}) from {}",
        case.meta.job_id,
        case.meta.version,
        path.display()
    );
    Ok(case)
}

/// Temp file used during an atomic save: the target name plus `.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    match (file_parts.as_slice(), current_parts.as_slice()) {
        // Major version must match
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        // For 0.x versions, a newer minor version is not readable
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::beam::{BeamInput, LoadInput};
    use crate::supports::Supports;
    use std::env::temp_dir;

    fn temp_case_path(name: &str) -> PathBuf {
        temp_dir().join(format!("beam_core_test_{}_{}.json", name, std::process::id()))
    }

    fn case() -> AnalysisCase {
        let beam = BeamInput {
            label: "B-1".to_string(),
            length_m: 4.0,
            width_mm: 200.0,
            height_mm: 300.0,
            supports: Supports::new(4.0, 0.0),
            loads: vec![LoadInput::Point {
                position_m: 2.0,
                magnitude_kn: -10.0,
            }],
            cracks: vec![],
            limits: None,
            queries: vec![],
            diagram_points: 11,
        };
        AnalysisCase::new("Test Engineer", "TEST-001", beam)
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/b1.beam.json"));
        assert_eq!(tmp, Path::new("/path/to/b1.beam.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_case_path("roundtrip");

        let original = case();
        save_case(&original, &path).unwrap();

        let loaded = load_case(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.meta.created, original.meta.created);
        assert_eq!(loaded.beam, original.beam);
        assert_eq!(loaded.settings, original.settings);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_case_path("atomic");
        let tmp_path = tmp_path_for(&path);

        save_case(&case(), &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_case_path("version");
        let mut newer = case();
        newer.meta.version = "1.0.0".to_string();
        save_case(&newer, &path).unwrap();

        let err = load_case(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_case(&temp_case_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_case_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        let err = load_case(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("x.y").is_err());
    }
}
