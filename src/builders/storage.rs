use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{StoreError, StoreResult};

/// Load/save access to named collections of records.
///
/// A collection is an ordered sequence of flat JSON objects. Every write replaces
/// the whole collection; there are no partial or append writes.
pub trait StorageProvider {
    /// Makes sure a collection called `name` exists, creating it empty if needed.
    /// Existing content is never touched.
    fn initialize(&self, name: &str) -> StoreResult<()>;

    /// Returns the records of `name` in stored order, or an empty sequence when
    /// the collection has never been written.
    fn load(&self, name: &str) -> StoreResult<Vec<Value>>;

    /// Replaces the content of `name` with `records`.
    fn save(&self, name: &str, records: &[Value]) -> StoreResult<()>;
}

/// Loads a collection and decodes every record into `T`.
pub fn load_records<T: DeserializeOwned>(
    store: &dyn StorageProvider,
    name: &str,
) -> StoreResult<Vec<T>> {
    store
        .load(name)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value).map_err(|source| StoreError::Decode {
                name: name.to_string(),
                source,
            })
        })
        .collect()
}

/// Encodes `records` and writes them as the full content of `name`.
pub fn save_records<T: Serialize>(
    store: &dyn StorageProvider,
    name: &str,
    records: &[T],
) -> StoreResult<()> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| StoreError::Encode {
            name: name.to_string(),
            source,
        })?;
    store.save(name, &values)
}

/// Collections kept as pretty-printed JSON arrays, one `<name>` file each, inside
/// a single data directory.
pub struct JsonFileStorage {
    data_dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens (and if needed creates) the data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            log::debug!("creating data directory {}", data_dir.display());
            fs::create_dir_all(&data_dir).map_err(|source| StoreError::Io {
                path: data_dir.clone(),
                source,
            })?;
        }
        Ok(Self { data_dir })
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn write_pretty(&self, path: &Path, name: &str, records: &[Value]) -> StoreResult<()> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut serializer)
            .map_err(|source| StoreError::Encode {
                name: name.to_string(),
                source,
            })?;
        fs::write(path, buf).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl StorageProvider for JsonFileStorage {
    fn initialize(&self, name: &str) -> StoreResult<()> {
        let path = self.collection_path(name);
        if path.is_file() {
            return Ok(());
        }
        log::debug!("initializing empty collection {}", path.display());
        self.write_pretty(&path, name, &[])
    }

    fn load(&self, name: &str) -> StoreResult<Vec<Value>> {
        let path = self.collection_path(name);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let records = parse_collection(name, &content)?;
        log::debug!("loaded {} record(s) from {}", records.len(), path.display());
        Ok(records)
    }

    fn save(&self, name: &str, records: &[Value]) -> StoreResult<()> {
        let path = self.collection_path(name);
        log::debug!("saving {} record(s) to {}", records.len(), path.display());
        self.write_pretty(&path, name, records)
    }
}

/// Parses file content as a JSON array whose elements are all objects.
fn parse_collection(name: &str, content: &str) -> StoreResult<Vec<Value>> {
    let decode = |source: serde_json::Error| StoreError::Decode {
        name: name.to_string(),
        source,
    };
    let records: Vec<Value> = serde_json::from_str(content).map_err(decode)?;
    if let Some(pos) = records.iter().position(|r| !r.is_object()) {
        return Err(decode(<serde_json::Error as serde::de::Error>::custom(
            format!("entry {pos} is not a record"),
        )));
    }
    Ok(records)
}

/// Keeps every collection in memory. Nothing survives the process; used for
/// dry runs and tests.
#[derive(Default)]
pub struct MemoryStorage {
    collections: RefCell<HashMap<String, Vec<Value>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageProvider for MemoryStorage {
    fn initialize(&self, name: &str) -> StoreResult<()> {
        self.collections
            .borrow_mut()
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<Vec<Value>> {
        Ok(self
            .collections
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, name: &str, records: &[Value]) -> StoreResult<()> {
        self.collections
            .borrow_mut()
            .insert(name.to_string(), records.to_vec());
        Ok(())
    }
}
