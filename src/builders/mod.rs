// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules hold the building blocks the registries in `core`
// are assembled from.

// `exporter` module:
// Writes a stored collection out as JSON, YAML or TOML for the `export`
// command. It reads raw records straight from a `StorageProvider`.
pub mod exporter;

// `reporter` module:
// Turns the `Report` returned by every registry operation into the line the
// user sees. Defines the `OutcomeReporter` trait and its `ConsoleReporter`
// implementation.
pub mod reporter;

// `storage` module:
// The durable store. Defines the `StorageProvider` trait over named
// collections of records, the JSON-file backend used by default, an in-memory
// backend, and the typed `load_records` / `save_records` helpers.
pub mod storage;

// `validator` module:
// Type guards applied to every field before a registry touches storage
// (`is_integer`, `is_text` and their extracting variants), plus the
// `ConfigValidator` trait used by the `validate` command.
pub mod validator;
