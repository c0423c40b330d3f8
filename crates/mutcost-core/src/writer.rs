//! Dataset writer
//!
//! Serializes the catalog with each cost replaced by the current setting
//! value and returns the cache describing exactly what went to disk.

use mutcost_catalog::{write_catalog, Catalog, MutationEntry, WriteError};
use mutcost_options::{resolve_setting, setting_id, SettingsCache, SettingsRegistry};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Writes the generated Mutations.xml
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogWriter;

impl CatalogWriter {
    /// Create writer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Write `catalog` to `destination`, resolving costs against `registry`
    ///
    /// The file is written next to the destination and renamed into place,
    /// so readers never see a half-written dataset.
    ///
    /// # Errors
    /// Returns `WriteError` if the directory, file or XML cannot be written.
    pub fn write<R>(
        &self,
        catalog: &Catalog,
        registry: &R,
        destination: &Path,
    ) -> Result<SettingsCache, WriteError>
    where
        R: SettingsRegistry + ?Sized,
    {
        if let Some(dir) = destination.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| WriteError::io_error(dir, e))?;
        }

        let staging = destination.with_extension("xml.tmp");
        let file = File::create(&staging).map_err(|e| WriteError::io_error(&staging, e))?;

        let mut cache = SettingsCache::new();
        let written = write_catalog(BufWriter::new(file), catalog, |entry| {
            resolve_entry(entry, registry, &mut cache)
        });
        if let Err(e) = written {
            discard_staging(&staging);
            return Err(e);
        }

        if let Err(e) = fs::rename(&staging, destination) {
            discard_staging(&staging);
            return Err(WriteError::io_error(destination, e));
        }

        tracing::info!(
            "Wrote {} mutations to {}",
            catalog.entry_count(),
            destination.display()
        );
        Ok(cache)
    }
}

fn discard_staging(staging: &Path) {
    if let Err(e) = fs::remove_file(staging) {
        tracing::warn!("Failed to remove staging file {}: {}", staging.display(), e);
    }
}

fn resolve_entry<R>(entry: &MutationEntry, registry: &R, cache: &mut SettingsCache) -> String
where
    R: SettingsRegistry + ?Sized,
{
    let id = setting_id(entry);
    let value = resolve_setting(registry.get(&id).as_deref(), entry.cost);
    cache.record(id, value.clone(), entry.cost);
    value
}
