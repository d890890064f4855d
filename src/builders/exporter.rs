use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::builders::storage::StorageProvider;
use crate::core::records::EntityKind;

/// A trait for writing a stored collection out in another format.
pub trait CollectionExporter {
    /// Renders collection `name` (holding `kind` records) in `format` and writes
    /// it to `target`. Returns the number of exported records.
    fn export(
        &self,
        kind: EntityKind,
        name: &str,
        target: &Path,
        format: &str,
    ) -> Result<usize>;
}

/// Exports straight from a [`StorageProvider`], without going through the
/// typed registries, so records are written exactly as stored.
pub struct FileExporter<'s> {
    store: &'s dyn StorageProvider,
}

impl<'s> FileExporter<'s> {
    pub fn new(store: &'s dyn StorageProvider) -> Self {
        Self { store }
    }

    /// Formats `records` as `json`, `yaml` or `toml`. Anything else falls back
    /// to TOML.
    ///
    /// TOML has no top-level arrays, so the records are placed under a key named
    /// after the kind (`hotels = [...]`).
    pub fn render(&self, kind: EntityKind, records: &[Value], format: &str) -> Result<String> {
        let content = match format {
            "json" => {
                serde_json::to_string_pretty(records).context("Failed to serialize to JSON")?
            }
            "yaml" => serde_yaml::to_string(records).context("Failed to serialize to YAML")?,
            _ => {
                let mut table = BTreeMap::new();
                table.insert(table_key(kind), records);
                toml::to_string_pretty(&table).context("Failed to serialize to TOML")?
            }
        };
        Ok(content)
    }
}

impl CollectionExporter for FileExporter<'_> {
    fn export(
        &self,
        kind: EntityKind,
        name: &str,
        target: &Path,
        format: &str,
    ) -> Result<usize> {
        let records = self
            .store
            .load(name)
            .with_context(|| format!("Failed to load collection '{name}'"))?;
        let content = self.render(kind, &records, format)?;

        fs::write(target, content).context("Failed to write export file")?;
        log::debug!(
            "exported {} {kind} record(s) to {}",
            records.len(),
            target.display()
        );

        Ok(records.len())
    }
}

fn table_key(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Hotel => "hotels",
        EntityKind::Customer => "customers",
        EntityKind::Reservation => "reservations",
    }
}
