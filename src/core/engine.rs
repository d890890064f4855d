use crate::builders::storage::{JsonFileStorage, MemoryStorage, StorageProvider};
use crate::core::config::{ConfigManager, ConfigProvider, StorageBackend, StorageSettings};
use crate::core::customers::CustomerRegistry;
use crate::core::error::StoreResult;
use crate::core::hotels::HotelRegistry;
use crate::core::records::EntityKind;
use crate::core::reservations::ReservationLedger;
use anyhow::{Context, Result};

/// Owns the store and hands out the three registries, all working on the same
/// storage instance.
pub struct LedgerEngine {
    storage: Box<dyn StorageProvider>,
    settings: StorageSettings,
}

impl LedgerEngine {
    /// Opens the store described by the configuration and makes sure every
    /// collection exists.
    pub fn new(config_manager: &ConfigManager) -> Result<Self> {
        let config = config_manager.load_config()?;

        // Choose storage backend based on config
        let storage: Box<dyn StorageProvider> = match config.storage.backend {
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::File => {
                let data_dir = config_manager.resolve_data_dir(&config);
                Box::new(JsonFileStorage::new(data_dir.clone()).with_context(|| {
                    format!("Failed to open data directory {}", data_dir.display())
                })?)
            }
        };

        let engine = Self::with_storage(storage, config.storage);
        engine
            .initialize()
            .context("Failed to initialize collections")?;
        Ok(engine)
    }

    pub fn with_storage(storage: Box<dyn StorageProvider>, settings: StorageSettings) -> Self {
        Self { storage, settings }
    }

    /// Creates any missing collection as an empty one.
    pub fn initialize(&self) -> StoreResult<()> {
        for (_, name) in self.settings.collection_names() {
            self.storage.initialize(name)?;
        }
        Ok(())
    }

    pub fn hotels(&self) -> HotelRegistry<'_> {
        HotelRegistry::new(
            self.store(),
            self.collection_name(EntityKind::Hotel),
            self.reservations(),
        )
    }

    pub fn customers(&self) -> CustomerRegistry<'_> {
        CustomerRegistry::new(self.store(), self.collection_name(EntityKind::Customer))
    }

    pub fn reservations(&self) -> ReservationLedger<'_> {
        ReservationLedger::new(self.store(), self.collection_name(EntityKind::Reservation))
    }

    pub fn store(&self) -> &dyn StorageProvider {
        self.storage.as_ref()
    }

    pub fn collection_name(&self, kind: EntityKind) -> &str {
        self.settings.collection_name(kind)
    }
}
