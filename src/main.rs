/// Hotel ledger:
/// Keeps hotels, customers and room reservations in plain JSON files
/// next to the configuration, so the data stays readable and easy to
/// back up. Every command loads the collection it needs, applies one
/// change, and writes the collection back.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hotel_ledger::builders::exporter::{CollectionExporter, FileExporter};
use hotel_ledger::builders::reporter::{ConsoleReporter, OutcomeReporter};
use hotel_ledger::core::config::ConfigProvider;
use hotel_ledger::core::engine::LedgerEngine;
use hotel_ledger::core::error::StoreResult;
use hotel_ledger::core::records::{EntityKind, Report};
use hotel_ledger::utils::{self, integer_field, optional_integer_field};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hotel-ledger")]
#[command(about = "Manage hotels, customers and room reservations stored as JSON files")]
struct Cli {
    /// Path to the configuration file (defaults to ./hotel-ledger.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default configuration and create empty collections
    Init,
    /// Check the configuration for problems
    Validate,
    /// Manage hotels and book their rooms
    #[command(subcommand)]
    Hotel(HotelCommands),
    /// Manage customers
    #[command(subcommand)]
    Customer(CustomerCommands),
    /// Manage reservations
    #[command(subcommand)]
    Reservation(ReservationCommands),
    /// Export a collection to a file
    Export {
        collection: Collection,
        path: PathBuf,
        /// Output format: json, yaml or toml
        #[arg(long, default_value = "json")]
        format: String,
    },
}

#[derive(Subcommand)]
enum HotelCommands {
    /// Register a new hotel
    Create {
        id: String,
        name: String,
        location: String,
        rooms: String,
    },
    /// Delete a hotel
    Delete { id: String },
    /// Show one hotel
    Display { id: String },
    /// Show every hotel
    List,
    /// Change some fields of a hotel; empty values are ignored
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        rooms: Option<String>,
    },
    /// Reserve a room without dates
    Reserve {
        reservation_id: String,
        hotel_id: String,
        customer_id: String,
        room_number: String,
    },
    /// Cancel a reservation
    Cancel { reservation_id: String },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Register a new customer
    Create {
        id: String,
        name: String,
        email: String,
    },
    /// Delete a customer
    Delete { id: String },
    /// Show one customer
    Display { id: String },
    /// Show every customer
    List,
    /// Change some fields of a customer; empty values are ignored
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum ReservationCommands {
    /// Book a room with dates
    Create {
        reservation_id: String,
        customer_id: String,
        hotel_id: String,
        room_number: String,
        start_date: String,
        end_date: String,
    },
    /// Cancel a reservation
    Cancel { reservation_id: String },
    /// Show one reservation
    Display { reservation_id: String },
    /// Show every reservation
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Hotels,
    Customers,
    Reservations,
}

impl From<Collection> for EntityKind {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::Hotels => EntityKind::Hotel,
            Collection::Customers => EntityKind::Customer,
            Collection::Reservations => EntityKind::Reservation,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_manager = utils::get_config_manager(cli.config)?;
    let config = config_manager.load_config()?;
    utils::init_logging(cli.verbose || config.settings.verbose);

    let open = || LedgerEngine::new(&config_manager);
    let report = match cli.command {
        Commands::Init => return utils::initialize_ledger(&config_manager),
        Commands::Validate => return config_manager.validate_config(),
        Commands::Export {
            collection,
            path,
            format,
        } => return export_collection(&open()?, collection.into(), &path, &format),
        Commands::Hotel(command) => run_hotel(&open()?, command),
        Commands::Customer(command) => run_customer(&open()?, command),
        Commands::Reservation(command) => run_reservation(&open()?, command),
    }
    .context("Storage operation failed")?;

    ConsoleReporter::new().report(&report);
    Ok(())
}

fn export_collection(
    engine: &LedgerEngine,
    kind: EntityKind,
    path: &Path,
    format: &str,
) -> Result<()> {
    let exporter = FileExporter::new(engine.store());
    let count = exporter.export(kind, engine.collection_name(kind), path, format)?;
    println!("✓ Exported {count} {kind} record(s) to {}", path.display());
    Ok(())
}

fn run_hotel(engine: &LedgerEngine, command: HotelCommands) -> StoreResult<Report> {
    let hotels = engine.hotels();
    match command {
        HotelCommands::Create {
            id,
            name,
            location,
            rooms,
        } => hotels.create(integer_field(&id), name, location, integer_field(&rooms)),
        HotelCommands::Delete { id } => hotels.delete(integer_field(&id)),
        HotelCommands::Display { id } => hotels.display(integer_field(&id)),
        HotelCommands::List => hotels.list(),
        HotelCommands::Update {
            id,
            name,
            location,
            rooms,
        } => hotels.update(
            integer_field(&id),
            name.map(Into::into),
            location.map(Into::into),
            optional_integer_field(rooms.as_deref()),
        ),
        HotelCommands::Reserve {
            reservation_id,
            hotel_id,
            customer_id,
            room_number,
        } => hotels.reserve_room(
            integer_field(&reservation_id),
            integer_field(&hotel_id),
            integer_field(&customer_id),
            integer_field(&room_number),
        ),
        HotelCommands::Cancel { reservation_id } => {
            hotels.cancel_reservation(integer_field(&reservation_id))
        }
    }
}

fn run_customer(engine: &LedgerEngine, command: CustomerCommands) -> StoreResult<Report> {
    let customers = engine.customers();
    match command {
        CustomerCommands::Create { id, name, email } => {
            customers.create(integer_field(&id), name, email)
        }
        CustomerCommands::Delete { id } => customers.delete(integer_field(&id)),
        CustomerCommands::Display { id } => customers.display(integer_field(&id)),
        CustomerCommands::List => customers.list(),
        CustomerCommands::Update { id, name, email } => {
            customers.update(integer_field(&id), name.map(Into::into), email.map(Into::into))
        }
    }
}

fn run_reservation(engine: &LedgerEngine, command: ReservationCommands) -> StoreResult<Report> {
    let reservations = engine.reservations();
    match command {
        ReservationCommands::Create {
            reservation_id,
            customer_id,
            hotel_id,
            room_number,
            start_date,
            end_date,
        } => reservations.create(
            integer_field(&reservation_id),
            integer_field(&customer_id),
            integer_field(&hotel_id),
            integer_field(&room_number),
            start_date,
            end_date,
        ),
        ReservationCommands::Cancel { reservation_id } => {
            reservations.cancel(integer_field(&reservation_id))
        }
        ReservationCommands::Display { reservation_id } => {
            reservations.display(integer_field(&reservation_id))
        }
        ReservationCommands::List => reservations.list(),
    }
}
