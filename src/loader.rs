//! JSON input and output
//!
//! Every input file is a JSON array of records. Outputs are pretty-printed.

use crate::intel::{ActorEntry, ActorGroup, TargetingRow, ThreatRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type LoadResult<T> = Result<T, LoadError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LoadError + '_ {
    move |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> LoadError + '_ {
    move |source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a JSON array from `path`
pub fn read_json_array<T: DeserializeOwned>(path: impl AsRef<Path>) -> LoadResult<Vec<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io_error(path))?;
    let items: Vec<T> = serde_json::from_reader(BufReader::new(file)).map_err(json_error(path))?;
    debug!("Read {} items from {}", items.len(), path.display());
    Ok(items)
}

pub fn load_records(path: impl AsRef<Path>) -> LoadResult<Vec<ThreatRecord>> {
    let records = read_json_array(path.as_ref())?;
    info!("Loaded {} threat records from {}", records.len(), path.as_ref().display());
    Ok(records)
}

pub fn load_registry(path: impl AsRef<Path>) -> LoadResult<Vec<ActorEntry>> {
    let entries = read_json_array(path.as_ref())?;
    info!("Loaded {} actor registry entries from {}", entries.len(), path.as_ref().display());
    Ok(entries)
}

pub fn load_groups(path: impl AsRef<Path>) -> LoadResult<Vec<ActorGroup>> {
    read_json_array(path)
}

pub fn load_targeting(path: impl AsRef<Path>) -> LoadResult<Vec<TargetingRow>> {
    read_json_array(path)
}

/// Write `value` as pretty JSON, creating parent directories as needed
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> LoadResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error(path))?;
    }

    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(json_error(path))?;
    writer.flush().map_err(io_error(path))?;

    info!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_records("/nonexistent/data.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/data.json"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_registry(&path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/groups.json");
        let groups = vec![ActorGroup {
            name: "APT28".into(),
            aliases: vec!["Fancy Bear".into()],
        }];

        write_json(&path, &groups).unwrap();
        assert_eq!(load_groups(&path).unwrap(), groups);
    }
}
