// This file is the module declaration file for the `core` module.
// It declares the submodules of `src/core/` and exposes them to the rest of
// the crate.

// `config` module:
// Loads and saves `hotel-ledger.toml` (data directory, storage backend,
// collection names, verbosity) through the `ConfigProvider` trait implemented
// by `ConfigManager`.
pub mod config;
pub mod customers;
pub mod engine;
pub mod error;
pub mod hotels;
pub mod records;
pub mod reservations;
