#[cfg(test)]
mod tests {
    use crate::builders::exporter::{CollectionExporter, FileExporter};
    use crate::builders::reporter::ConsoleReporter;
    use crate::builders::storage::{
        JsonFileStorage, MemoryStorage, StorageProvider, load_records, save_records,
    };
    use crate::builders::validator::{
        self, ConfigValidator, StandardValidator, is_integer, is_text, is_unset,
    };
    use crate::core::config::{
        CONFIG_FILE_NAME, ConfigManager, ConfigProvider, LedgerConfig, StorageBackend,
    };
    use crate::core::error::{StoreError, ValidationError};
    use crate::core::records::{EntityKind, Hotel, Record, Report, Reservation};
    use crate::utils::{integer_field, optional_integer_field};
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::tempdir;

    fn sample_hotel(id: i64) -> Hotel {
        Hotel {
            hotel_id: id,
            name: "Test Hotel".to_string(),
            location: "Test Location".to_string(),
            rooms: 100,
        }
    }

    #[test]
    fn test_integer_guard() {
        assert!(is_integer(&json!(1)));
        assert!(is_integer(&json!(-42)));
        assert!(!is_integer(&json!("1")));
        assert!(!is_integer(&json!(1.5)));
        assert!(!is_integer(&json!(null)));
        assert!(!is_integer(&json!(true)));
    }

    #[test]
    fn test_text_guard() {
        assert!(is_text(&json!("Test Hotel")));
        assert!(is_text(&json!("")));
        assert!(!is_text(&json!(5)));
        assert!(!is_text(&json!(null)));
        assert!(!is_text(&json!(["a"])));
    }

    #[test]
    fn test_extractors_name_the_field() {
        assert_eq!(validator::integer("hotel_id", &json!(7)), Ok(7));
        assert_eq!(
            validator::integer("hotel_id", &json!("seven")),
            Err(ValidationError::NotInteger { field: "hotel_id" })
        );
        assert_eq!(
            validator::text("email", &json!(3)),
            Err(ValidationError::NotText { field: "email" })
        );
        assert_eq!(
            validator::integer("rooms", &json!(u64::MAX)),
            Err(ValidationError::NotInteger { field: "rooms" })
        );
    }

    #[test]
    fn test_falsy_values_are_unset() {
        assert!(is_unset(None));
        assert!(is_unset(Some(&json!(null))));
        assert!(is_unset(Some(&json!(""))));
        assert!(is_unset(Some(&json!(0))));
        assert!(is_unset(Some(&json!(false))));
        assert!(!is_unset(Some(&json!("x"))));
        assert!(!is_unset(Some(&json!(3))));

        assert_eq!(validator::optional_integer("rooms", Some(json!(0))), Ok(None));
        assert_eq!(validator::optional_text("name", Some(json!(""))), Ok(None));
        assert_eq!(
            validator::optional_text("name", Some(json!(12))),
            Err(ValidationError::NotText { field: "name" })
        );
    }

    #[test]
    fn test_file_storage_round_trip_keeps_order() {
        let dir = tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path().join("data")).unwrap();
        let hotels = vec![sample_hotel(3), sample_hotel(1), sample_hotel(2)];

        save_records(&store, "hotels.json", &hotels).unwrap();
        let loaded: Vec<Hotel> = load_records(&store, "hotels.json").unwrap();

        assert_eq!(loaded, hotels);
    }

    #[test]
    fn test_file_storage_creates_directory_and_empty_collection() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let store = JsonFileStorage::new(&data_dir).unwrap();
        assert!(data_dir.is_dir());

        store.initialize("customers.json").unwrap();
        let content = fs::read_to_string(data_dir.join("customers.json")).unwrap();
        assert_eq!(content, "[]");
        assert!(store.load("customers.json").unwrap().is_empty());
    }

    #[test]
    fn test_initialize_never_overwrites() {
        let dir = tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path()).unwrap();
        save_records(&store, "hotels.json", &[sample_hotel(1)]).unwrap();

        store.initialize("hotels.json").unwrap();

        let loaded: Vec<Hotel> = load_records(&store, "hotels.json").unwrap();
        assert_eq!(loaded, vec![sample_hotel(1)]);
    }

    #[test]
    fn test_missing_collection_loads_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path()).unwrap();
        assert!(store.load("never-written.json").unwrap().is_empty());
    }

    #[test]
    fn test_saved_collection_is_pretty_printed() {
        let dir = tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path()).unwrap();
        save_records(&store, "hotels.json", &[sample_hotel(1)]).unwrap();

        let content = fs::read_to_string(dir.path().join("hotels.json")).unwrap();
        assert!(content.starts_with("[\n    {\n        \"hotel_id\": 1,"));
    }

    #[test]
    fn test_malformed_collection_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let store = JsonFileStorage::new(dir.path()).unwrap();

        fs::write(dir.path().join("hotels.json"), "{ not json").unwrap();
        assert!(matches!(
            store.load("hotels.json"),
            Err(StoreError::Decode { .. })
        ));

        fs::write(dir.path().join("hotels.json"), "{\"hotel_id\": 1}").unwrap();
        assert!(matches!(
            store.load("hotels.json"),
            Err(StoreError::Decode { .. })
        ));

        fs::write(dir.path().join("hotels.json"), "[1, 2]").unwrap();
        assert!(matches!(
            store.load("hotels.json"),
            Err(StoreError::Decode { .. })
        ));
    }

    #[test]
    fn test_record_of_wrong_shape_is_a_decode_error() {
        let store = MemoryStorage::new();
        store
            .save("hotels.json", &[json!({"hotel_id": "one", "name": "x"})])
            .unwrap();

        let result: Result<Vec<Hotel>, _> = load_records(&store, "hotels.json");
        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_memory_storage() {
        let store = MemoryStorage::new();
        assert!(store.load("reservations.json").unwrap().is_empty());

        store.initialize("reservations.json").unwrap();
        store.save("reservations.json", &[json!({"a": 1})]).unwrap();
        store.initialize("reservations.json").unwrap();

        assert_eq!(store.load("reservations.json").unwrap(), vec![json!({"a": 1})]);
    }

    #[test]
    fn test_reservation_without_dates_omits_keys() {
        let reservation = Reservation {
            reservation_id: 1,
            customer_id: 3,
            hotel_id: 2,
            room_number: 100,
            start_date: None,
            end_date: None,
        };
        let value = serde_json::to_value(&reservation).unwrap();
        assert_eq!(
            value,
            json!({"reservation_id": 1, "customer_id": 3, "hotel_id": 2, "room_number": 100})
        );

        let back: Reservation = serde_json::from_value(value).unwrap();
        assert_eq!(back, reservation);
    }

    #[test]
    fn test_config_initialize_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let config_manager = ConfigManager::new_at(dir.path().to_path_buf()).unwrap();

        config_manager.initialize().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        assert!(config_path.exists());

        let mut config = config_manager.load_config().unwrap();
        config.settings.verbose = true;
        config_manager.save_config(&config).unwrap();
        config_manager.initialize().unwrap();

        assert!(config_manager.load_config().unwrap().settings.verbose);
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom.toml");
        fs::write(&config_path, "[storage]\nbackend = \"Memory\"\n").unwrap();

        let config_manager = ConfigManager::with_path(config_path).unwrap();
        let config = config_manager.load_config().unwrap();

        assert_eq!(config.version, "1.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.hotels, "hotels.json");
        assert_eq!(
            config_manager.resolve_data_dir(&config),
            dir.path().join("data_storage")
        );
    }

    #[test]
    fn test_config_validator_reports_issues() {
        let validator = StandardValidator::new();
        assert!(
            validator
                .validate_config(&LedgerConfig::default())
                .unwrap()
                .is_empty()
        );

        let mut config = LedgerConfig::default();
        config.version = "2.0".to_string();
        config.storage.customers = "hotels.json".to_string();
        config.storage.reservations = "../reservations.json".to_string();

        let issues = validator.validate_config(&config).unwrap();
        assert_eq!(issues.len(), 3, "{issues:?}");
        assert!(issues.iter().any(|i| i.contains("Unsupported config version")));
        assert!(issues.iter().any(|i| i.contains("used more than once")));
        assert!(issues.iter().any(|i| i.contains("path separator")));
    }

    #[test]
    fn test_report_messages() {
        let reporter = ConsoleReporter::new();

        let not_found = Report::NotFound {
            kind: EntityKind::Hotel,
            id: 7,
        };
        assert!(
            reporter
                .format_report(&not_found)
                .contains("Hotel with ID '7' not found.")
        );

        let invalid = Report::Invalid(ValidationError::NotInteger { field: "hotel_id" });
        assert!(
            reporter
                .format_report(&invalid)
                .contains("Error: hotel_id must be an integer.")
        );

        let taken = Report::RoomTaken {
            hotel_id: 2,
            room_number: 100,
        };
        assert!(taken.is_conflict());
        assert!(
            reporter
                .format_report(&taken)
                .contains("Room 100 in Hotel ID '2' is already reserved.")
        );

        let found = Report::Found(Record::Hotel(sample_hotel(1)));
        assert_eq!(
            reporter.format_report(&found),
            "Hotel ID: 1\nName: Test Hotel\nLocation: Test Location\nRooms: 100"
        );
    }

    #[test]
    fn test_export_formats() {
        let dir = tempdir().unwrap();
        let store = MemoryStorage::new();
        save_records(&store, "hotels.json", &[sample_hotel(1), sample_hotel(2)]).unwrap();
        let exporter = FileExporter::new(&store);

        let json_path = dir.path().join("hotels.export.json");
        let count = exporter
            .export(EntityKind::Hotel, "hotels.json", &json_path, "json")
            .unwrap();
        assert_eq!(count, 2);
        let exported: Vec<Hotel> =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(exported, vec![sample_hotel(1), sample_hotel(2)]);

        let yaml_path = dir.path().join("hotels.yaml");
        exporter
            .export(EntityKind::Hotel, "hotels.json", &yaml_path, "yaml")
            .unwrap();
        let exported: Vec<Hotel> =
            serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(exported.len(), 2);

        let toml_path = dir.path().join("hotels.toml");
        exporter
            .export(EntityKind::Hotel, "hotels.json", &toml_path, "anything")
            .unwrap();
        let content = fs::read_to_string(&toml_path).unwrap();
        assert!(content.contains("[[hotels]]"));
        assert!(content.contains("name = \"Test Hotel\""));
    }

    #[test]
    fn test_cli_fields() {
        assert_eq!(integer_field("42"), json!(42));
        assert_eq!(integer_field(" 7 "), json!(7));
        assert_eq!(integer_field("res_id"), json!("res_id"));
        assert_eq!(integer_field("1.5"), json!("1.5"));
        assert_eq!(optional_integer_field(None), None::<Value>);
        assert_eq!(optional_integer_field(Some("")), Some(json!("")));
    }
}
