//! # File I/O Module
//!
//! Dataset and settings files, all plain JSON:
//! - **Atomic saves**: write `<name>.tmp`, sync, rename over the target
//! - **Version validation**: datasets carry a schema version that must be
//!   compatible with [`SCHEMA_VERSION`]
//! - **Imports**: a bare JSON array of sample records becomes a new dataset
//!
//! ## Example
//!
//! ```rust,no_run
//! use composite_core::file_io::{load_dataset, save_dataset};
//! use composite_core::samples::{MaterialSample, SampleStore};
//! use std::path::Path;
//!
//! let mut store = SampleStore::new("bench");
//! store.add_sample(MaterialSample::new("Carbon", "Epoxy", 55.0, 1450.0))?;
//!
//! let path = Path::new("samples.json");
//! save_dataset(&store, path)?;
//! let loaded = load_dataset(path)?;
//! assert_eq!(loaded.len(), 1);
//! # Ok::<(), composite_core::errors::CompositeError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::errors::{CompositeError, CompositeResult};
use crate::samples::{MaterialSample, SampleStore, SCHEMA_VERSION};
use crate::settings::EngineSettings;

/// Save a dataset with atomic write semantics.
///
/// The save process:
/// 1. Serialize the store to pretty JSON
/// 2. Write to `<name>.tmp` next to the target
/// 3. Sync to disk
/// 4. Rename over the target
pub fn save_dataset(store: &SampleStore, path: &Path) -> CompositeResult<()> {
    let json = serde_json::to_string_pretty(store)?;
    write_atomic(path, json.as_bytes())?;
    log::info!("saved {} samples to {}", store.len(), path.display());
    Ok(())
}

/// Load a dataset file.
///
/// # Returns
///
/// * `Err(CompositeError::VersionMismatch)` - File version is incompatible
/// * `Err(CompositeError::InvalidInput)` - A stored record breaks a sample invariant
/// * `Err(CompositeError::SerializationError)` - Invalid JSON
/// * `Err(CompositeError::FileError)` - I/O error
pub fn load_dataset(path: &Path) -> CompositeResult<SampleStore> {
    let store: SampleStore = read_json(path)?;
    validate_version(&store.meta.version)?;
    for (id, sample) in &store.samples {
        sample.validate().map_err(|e| {
            CompositeError::invalid_input(format!("samples[{}]", id), path.display().to_string(), e.to_string())
        })?;
    }
    log::info!(
        "loaded {} samples from {} (schema {})",
        store.len(),
        path.display(),
        store.meta.version
    );
    Ok(store)
}

/// Import a JSON array of sample records into a new dataset.
///
/// Every record is validated; the first bad one fails the import with its
/// position in the array.
pub fn import_samples(path: &Path) -> CompositeResult<SampleStore> {
    let records: Vec<MaterialSample> = read_json(path)?;
    let mut store = SampleStore::new(path.display().to_string());
    for (index, sample) in records.into_iter().enumerate() {
        store.add_sample(sample).map_err(|e| {
            CompositeError::invalid_input(
                format!("samples[{}]", index),
                path.display().to_string(),
                e.to_string(),
            )
        })?;
    }
    log::info!("imported {} samples from {}", store.len(), path.display());
    Ok(store)
}

/// Load engine settings. Fields missing from the file keep their defaults.
pub fn load_settings(path: &Path) -> CompositeResult<EngineSettings> {
    let settings: EngineSettings = read_json(path)?;
    settings.validate()?;
    log::info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Save engine settings (atomic).
pub fn save_settings(settings: &EngineSettings, path: &Path) -> CompositeResult<()> {
    let json = serde_json::to_string_pretty(settings)?;
    write_atomic(path, json.as_bytes())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CompositeResult<T> {
    let mut file =
        File::open(path).map_err(|e| CompositeError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CompositeError::file_error("read", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents)
        .map_err(|e| CompositeError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

/// `<dir>/<name>.tmp` for `<dir>/<name>`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> CompositeResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CompositeError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CompositeError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CompositeError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CompositeError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Validate that a file version is compatible with the current schema.
///
/// Major versions must match; on 0.x the file's minor version may not be
/// newer than ours.
fn validate_version(file_version: &str) -> CompositeResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CompositeError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SampleQuery;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("composite_core_test_{}_{}.json", name, uuid::Uuid::new_v4()))
    }

    fn sample_store() -> SampleStore {
        SampleStore::from_samples(
            "unit test",
            vec![
                MaterialSample::new("Carbon", "Epoxy", 55.0, 1450.0).with_youngs_modulus(120.0),
                MaterialSample::new("Glass", "Polyester", 35.0, 500.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_tmp_path() {
        assert_eq!(tmp_path_for(Path::new("/data/samples.json")), Path::new("/data/samples.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");
        let store = sample_store();
        save_dataset(&store, &path).unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.meta.source, "unit test");
        assert_eq!(loaded.samples, store.samples);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        save_dataset(&sample_store(), &path).unwrap();
        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset(Path::new("/nonexistent/dir/samples.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_newer_schema_rejected() {
        let path = temp_path("newer");
        let mut store = sample_store();
        store.meta.version = "0.2.0".to_string();
        save_dataset(&store, &path).unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_import_samples() {
        let path = temp_path("import");
        let json = r#"[
            {"fiber_type":"Sisal","matrix_type":"Epoxy","fiber_content":25,"tensile_strength":95},
            {"fiber_type":"Sisal","matrix_type":"Epoxy","fiber_content":40,"content_type":"weight",
             "orientation":"90","tensile_strength":120,"youngs_modulus":7.5,"ply_count":4}
        ]"#;
        fs::write(&path, json).unwrap();

        let store = import_samples(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.distinct_orientations().unwrap(), vec!["0", "90"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_import_rejects_bad_record() {
        let path = temp_path("import_bad");
        let json = r#"[
            {"fiber_type":"Sisal","matrix_type":"Epoxy","fiber_content":25,"tensile_strength":95},
            {"fiber_type":"Sisal","matrix_type":"Epoxy","fiber_content":250,"tensile_strength":95}
        ]"#;
        fs::write(&path, json).unwrap();

        match import_samples(&path).unwrap_err() {
            CompositeError::InvalidInput { field, .. } => assert_eq!(field, "samples[1]"),
            other => panic!("unexpected error: {:?}", other),
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_edited_bad_record() {
        let path = temp_path("load_bad");
        let mut store = SampleStore::new("hand edited");
        let id = store.add_sample(MaterialSample::new("Sisal", "Epoxy", 25.0, 95.0)).unwrap();
        save_dataset(&store, &path).unwrap();

        let mut json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let record = &mut json["samples"][id.to_string()];
        record["fiber_content"] = serde_json::json!(250.0);
        record["tensile_strength"] = serde_json::json!(-75.0);
        fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

        match load_dataset(&path).unwrap_err() {
            CompositeError::InvalidInput { field, .. } => assert_eq!(field, format!("samples[{}]", id)),
            other => panic!("unexpected error: {:?}", other),
        }
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_import_invalid_json() {
        let path = temp_path("import_json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(import_samples(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_settings_roundtrip_and_partial_file() {
        let path = temp_path("settings");
        fs::write(&path, r#"{"curve_points": 25, "summary_fvf_percent": [15, 45]}"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.curve_points, 25);
        assert_eq!(settings.summary_fvf_percent, vec![15.0, 45.0]);
        assert_eq!(settings.stress_strain_points, 50);

        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let path = temp_path("settings_bad");
        fs::write(&path, r#"{"curve_points": 0}"#).unwrap();
        assert!(load_settings(&path).is_err());
        let _ = fs::remove_file(&path);
    }
}
