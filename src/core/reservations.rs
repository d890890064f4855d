use serde_json::Value;

use crate::builders::storage::{StorageProvider, load_records, save_records};
use crate::builders::validator;
use crate::core::error::{StoreResult, ValidationError};
use crate::core::records::{EntityKind, Record, Report, Reservation};

/// Owner of the reservations collection.
///
/// This is the only component that adds or removes reservations, and the only
/// place where the "one active reservation per (hotel, room)" rule is checked.
/// The hotel registry books and cancels through it.
pub struct ReservationLedger<'s> {
    store: &'s dyn StorageProvider,
    collection: &'s str,
}

impl<'s> ReservationLedger<'s> {
    pub fn new(store: &'s dyn StorageProvider, collection: &'s str) -> Self {
        Self { store, collection }
    }

    /// Books a room with explicit dates.
    ///
    /// The four numeric fields are type-checked; the dates are stored as given.
    /// A date that is not a string is kept in its JSON text form.
    pub fn create(
        &self,
        reservation_id: impl Into<Value>,
        customer_id: impl Into<Value>,
        hotel_id: impl Into<Value>,
        room_number: impl Into<Value>,
        start_date: impl Into<Value>,
        end_date: impl Into<Value>,
    ) -> StoreResult<Report> {
        let reservation = match parse_reservation(
            &reservation_id.into(),
            &customer_id.into(),
            &hotel_id.into(),
            &room_number.into(),
        ) {
            Ok(reservation) => Reservation {
                start_date: date_field(start_date.into()),
                end_date: date_field(end_date.into()),
                ..reservation
            },
            Err(err) => return Ok(Report::rejected(err)),
        };

        self.book(reservation)
    }

    /// Stores an already validated reservation.
    ///
    /// Rejects a reservation id that is already taken, then a room that is
    /// already held by another reservation of the same hotel. Nothing is written
    /// on rejection.
    pub fn book(&self, reservation: Reservation) -> StoreResult<Report> {
        let mut reservations = self.load()?;

        if reservations
            .iter()
            .any(|r| r.reservation_id == reservation.reservation_id)
        {
            log::info!(
                "reservation {} rejected: id already in use",
                reservation.reservation_id
            );
            return Ok(Report::AlreadyExists {
                kind: EntityKind::Reservation,
                id: reservation.reservation_id,
            });
        }

        if reservations
            .iter()
            .any(|r| r.occupies(reservation.hotel_id, reservation.room_number))
        {
            log::info!(
                "reservation {} rejected: room {} of hotel {} is taken",
                reservation.reservation_id,
                reservation.room_number,
                reservation.hotel_id
            );
            return Ok(Report::RoomTaken {
                hotel_id: reservation.hotel_id,
                room_number: reservation.room_number,
            });
        }

        let id = reservation.reservation_id;
        reservations.push(reservation);
        self.save(&reservations)?;
        Ok(Report::Created {
            kind: EntityKind::Reservation,
            id,
        })
    }

    /// Removes a reservation, reporting whether one was actually found.
    pub fn cancel(&self, reservation_id: impl Into<Value>) -> StoreResult<Report> {
        let reservation_id = match validator::integer("reservation_id", &reservation_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut reservations = self.load()?;
        let before = reservations.len();
        reservations.retain(|r| r.reservation_id != reservation_id);

        if reservations.len() == before {
            return Ok(Report::NotFound {
                kind: EntityKind::Reservation,
                id: reservation_id,
            });
        }

        self.save(&reservations)?;
        Ok(Report::Cancelled { reservation_id })
    }

    pub fn display(&self, reservation_id: impl Into<Value>) -> StoreResult<Report> {
        let reservation_id = match validator::integer("reservation_id", &reservation_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        Ok(self
            .load()?
            .into_iter()
            .find(|r| r.reservation_id == reservation_id)
            .map(|r| Report::Found(Record::Reservation(r)))
            .unwrap_or(Report::NotFound {
                kind: EntityKind::Reservation,
                id: reservation_id,
            }))
    }

    pub fn list(&self) -> StoreResult<Report> {
        Ok(Report::Listed {
            kind: EntityKind::Reservation,
            records: self.load()?.into_iter().map(Record::Reservation).collect(),
        })
    }

    pub fn load(&self) -> StoreResult<Vec<Reservation>> {
        load_records(self.store, self.collection)
    }

    fn save(&self, reservations: &[Reservation]) -> StoreResult<()> {
        save_records(self.store, self.collection, reservations)
    }
}

/// Validates the numeric part of a reservation. Dates are left empty.
pub(crate) fn parse_reservation(
    reservation_id: &Value,
    customer_id: &Value,
    hotel_id: &Value,
    room_number: &Value,
) -> Result<Reservation, ValidationError> {
    Ok(Reservation {
        reservation_id: validator::integer("reservation_id", reservation_id)?,
        customer_id: validator::integer("customer_id", customer_id)?,
        hotel_id: validator::integer("hotel_id", hotel_id)?,
        room_number: validator::integer("room_number", room_number)?,
        start_date: None,
        end_date: None,
    })
}

fn date_field(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
