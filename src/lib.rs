//! Persistent records for a small hotel booking domain: hotels, customers and
//! the reservations that tie them together.
//!
//! Each collection is a JSON file that is read whole and written whole on every
//! operation. [`core::engine::LedgerEngine`] is the entry point:
//!
//! ```no_run
//! use hotel_ledger::core::config::ConfigManager;
//! use hotel_ledger::core::engine::LedgerEngine;
//!
//! let config_manager = ConfigManager::new()?;
//! let engine = LedgerEngine::new(&config_manager)?;
//! let report = engine.hotels().create(1, "Test Hotel", "Test Location", 100)?;
//! println!("{report}");
//! # Ok::<(), anyhow::Error>(())
//! ```
pub mod builders;
pub mod core;
pub mod utils;

#[cfg(test)]
mod tests;
