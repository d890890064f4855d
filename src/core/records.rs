use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::ValidationError;

/// A hotel as stored in the hotels collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub hotel_id: i64,
    pub name: String,
    pub location: String,
    /// Room capacity of the hotel.
    pub rooms: i64,
}

/// A customer as stored in the customers collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
}

/// A room reservation.
///
/// `customer_id` and `hotel_id` are plain references: they are never checked
/// against the other collections. Dates are free text, and a reservation booked
/// through the hotel registry carries none, in which case the keys are left out
/// of the stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub reservation_id: i64,
    pub customer_id: i64,
    pub hotel_id: i64,
    pub room_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Reservation {
    /// Whether this reservation holds the given room of the given hotel.
    pub fn occupies(&self, hotel_id: i64, room_number: i64) -> bool {
        self.hotel_id == hotel_id && self.room_number == room_number
    }
}

/// The three entity kinds managed by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Hotel,
    Customer,
    Reservation,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Hotel,
        EntityKind::Customer,
        EntityKind::Reservation,
    ];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Hotel => write!(f, "Hotel"),
            EntityKind::Customer => write!(f, "Customer"),
            EntityKind::Reservation => write!(f, "Reservation"),
        }
    }
}

/// Any stored record, used when a report carries data back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Hotel(Hotel),
    Customer(Customer),
    Reservation(Reservation),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Hotel(h) => write!(
                f,
                "Hotel ID: {}\nName: {}\nLocation: {}\nRooms: {}",
                h.hotel_id, h.name, h.location, h.rooms
            ),
            Record::Customer(c) => write!(
                f,
                "Customer ID: {}\nName: {}\nEmail: {}",
                c.customer_id, c.name, c.email
            ),
            Record::Reservation(r) => {
                write!(
                    f,
                    "Reservation ID: {}\nCustomer ID: {}\nHotel ID: {}\nRoom: {}",
                    r.reservation_id, r.customer_id, r.hotel_id, r.room_number
                )?;
                if let Some(start) = &r.start_date {
                    write!(f, "\nStart: {start}")?;
                }
                if let Some(end) = &r.end_date {
                    write!(f, "\nEnd: {end}")?;
                }
                Ok(())
            }
        }
    }
}

/// Outcome of a registry operation.
///
/// Validation failures, missing ids and conflicts are not errors in the `Result`
/// sense: the operation is abandoned without touching storage and the caller gets
/// one of these variants to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Created { kind: EntityKind, id: i64 },
    Updated { kind: EntityKind, id: i64 },
    Deleted { kind: EntityKind, id: i64 },
    Cancelled { reservation_id: i64 },
    Found(Record),
    Listed { kind: EntityKind, records: Vec<Record> },
    NotFound { kind: EntityKind, id: i64 },
    AlreadyExists { kind: EntityKind, id: i64 },
    RoomTaken { hotel_id: i64, room_number: i64 },
    Invalid(ValidationError),
}

impl Report {
    /// Logs a rejected input and turns it into the report shown to the user.
    pub(crate) fn rejected(err: ValidationError) -> Self {
        log::info!("input rejected: {err}");
        Report::Invalid(err)
    }

    /// True for outcomes that changed storage or answered a query.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Report::Created { .. }
                | Report::Updated { .. }
                | Report::Deleted { .. }
                | Report::Cancelled { .. }
                | Report::Found(_)
                | Report::Listed { .. }
        )
    }

    /// True when a uniqueness rule rejected the mutation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Report::AlreadyExists { .. } | Report::RoomTaken { .. })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Created { kind, id } => write!(f, "{kind} '{id}' added successfully."),
            Report::Updated { kind, id } => write!(f, "{kind} '{id}' updated successfully."),
            Report::Deleted { kind, id } => {
                write!(f, "{kind} with ID '{id}' has been deleted.")
            }
            Report::Cancelled { reservation_id } => {
                write!(f, "Reservation ID '{reservation_id}' has been cancelled.")
            }
            Report::Found(record) => write!(f, "{record}"),
            Report::Listed { kind, records } => {
                if records.is_empty() {
                    return write!(f, "No {kind} records stored.");
                }
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                        writeln!(f)?;
                    }
                    write!(f, "{record}")?;
                }
                Ok(())
            }
            Report::NotFound { kind, id } => write!(f, "{kind} with ID '{id}' not found."),
            Report::AlreadyExists { kind, id } => {
                write!(f, "{kind} with ID '{id}' already exists.")
            }
            Report::RoomTaken {
                hotel_id,
                room_number,
            } => write!(
                f,
                "Room {room_number} in Hotel ID '{hotel_id}' is already reserved."
            ),
            Report::Invalid(err) => write!(f, "Error: {err}."),
        }
    }
}
