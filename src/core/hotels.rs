use serde_json::Value;

use crate::builders::storage::{StorageProvider, load_records, save_records};
use crate::builders::validator;
use crate::core::error::{StoreResult, ValidationError};
use crate::core::records::{EntityKind, Hotel, Record, Report};
use crate::core::reservations::{ReservationLedger, parse_reservation};

/// CRUD over the hotels collection, plus the room booking entry point.
///
/// Every operation checks the kind of each argument before loading anything. A
/// mismatch ends the operation with [`Report::Invalid`] and leaves storage as it
/// was.
pub struct HotelRegistry<'s> {
    store: &'s dyn StorageProvider,
    collection: &'s str,
    reservations: ReservationLedger<'s>,
}

impl<'s> HotelRegistry<'s> {
    pub fn new(
        store: &'s dyn StorageProvider,
        collection: &'s str,
        reservations: ReservationLedger<'s>,
    ) -> Self {
        Self {
            store,
            collection,
            reservations,
        }
    }

    pub fn create(
        &self,
        hotel_id: impl Into<Value>,
        name: impl Into<Value>,
        location: impl Into<Value>,
        rooms: impl Into<Value>,
    ) -> StoreResult<Report> {
        let hotel = match parse_hotel(
            &hotel_id.into(),
            &name.into(),
            &location.into(),
            &rooms.into(),
        ) {
            Ok(hotel) => hotel,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut hotels = self.load()?;
        if hotels.iter().any(|h| h.hotel_id == hotel.hotel_id) {
            log::info!("hotel {} already exists", hotel.hotel_id);
            return Ok(Report::AlreadyExists {
                kind: EntityKind::Hotel,
                id: hotel.hotel_id,
            });
        }

        let id = hotel.hotel_id;
        hotels.push(hotel);
        self.save(&hotels)?;
        Ok(Report::Created {
            kind: EntityKind::Hotel,
            id,
        })
    }

    /// Removes the hotel if present. Deleting an unknown id still succeeds.
    pub fn delete(&self, hotel_id: impl Into<Value>) -> StoreResult<Report> {
        let hotel_id = match validator::integer("hotel_id", &hotel_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut hotels = self.load()?;
        hotels.retain(|h| h.hotel_id != hotel_id);
        self.save(&hotels)?;
        Ok(Report::Deleted {
            kind: EntityKind::Hotel,
            id: hotel_id,
        })
    }

    pub fn display(&self, hotel_id: impl Into<Value>) -> StoreResult<Report> {
        let hotel_id = match validator::integer("hotel_id", &hotel_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        Ok(self
            .load()?
            .into_iter()
            .find(|h| h.hotel_id == hotel_id)
            .map(|h| Report::Found(Record::Hotel(h)))
            .unwrap_or(Report::NotFound {
                kind: EntityKind::Hotel,
                id: hotel_id,
            }))
    }

    /// Partial update. Unset fields, and falsy ones such as `""` or `0`, keep
    /// their stored value.
    pub fn update(
        &self,
        hotel_id: impl Into<Value>,
        name: Option<Value>,
        location: Option<Value>,
        rooms: Option<Value>,
    ) -> StoreResult<Report> {
        let hotel_id = match validator::integer("hotel_id", &hotel_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };
        let changes = match HotelChanges::parse(name, location, rooms) {
            Ok(changes) => changes,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut hotels = self.load()?;
        let Some(hotel) = hotels.iter_mut().find(|h| h.hotel_id == hotel_id) else {
            return Ok(Report::NotFound {
                kind: EntityKind::Hotel,
                id: hotel_id,
            });
        };

        changes.apply(hotel);

        self.save(&hotels)?;
        Ok(Report::Updated {
            kind: EntityKind::Hotel,
            id: hotel_id,
        })
    }

    /// Books a room without dates.
    ///
    /// Goes through [`ReservationLedger::book`], so the same id and room rules
    /// apply as for reservations created with dates.
    pub fn reserve_room(
        &self,
        reservation_id: impl Into<Value>,
        hotel_id: impl Into<Value>,
        customer_id: impl Into<Value>,
        room_number: impl Into<Value>,
    ) -> StoreResult<Report> {
        match parse_reservation(
            &reservation_id.into(),
            &customer_id.into(),
            &hotel_id.into(),
            &room_number.into(),
        ) {
            Ok(reservation) => self.reservations.book(reservation),
            Err(err) => Ok(Report::rejected(err)),
        }
    }

    pub fn cancel_reservation(&self, reservation_id: impl Into<Value>) -> StoreResult<Report> {
        self.reservations.cancel(reservation_id)
    }

    pub fn list(&self) -> StoreResult<Report> {
        Ok(Report::Listed {
            kind: EntityKind::Hotel,
            records: self.load()?.into_iter().map(Record::Hotel).collect(),
        })
    }

    pub fn load(&self) -> StoreResult<Vec<Hotel>> {
        load_records(self.store, self.collection)
    }

    fn save(&self, hotels: &[Hotel]) -> StoreResult<()> {
        save_records(self.store, self.collection, hotels)
    }
}

fn parse_hotel(
    hotel_id: &Value,
    name: &Value,
    location: &Value,
    rooms: &Value,
) -> Result<Hotel, ValidationError> {
    Ok(Hotel {
        hotel_id: validator::integer("hotel_id", hotel_id)?,
        name: validator::text("name", name)?,
        location: validator::text("location", location)?,
        rooms: validator::integer("rooms", rooms)?,
    })
}

/// The supplied fields of a hotel update.
struct HotelChanges {
    name: Option<String>,
    location: Option<String>,
    rooms: Option<i64>,
}

impl HotelChanges {
    fn parse(
        name: Option<Value>,
        location: Option<Value>,
        rooms: Option<Value>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validator::optional_text("name", name)?,
            location: validator::optional_text("location", location)?,
            rooms: validator::optional_integer("rooms", rooms)?,
        })
    }

    fn apply(self, hotel: &mut Hotel) {
        if let Some(name) = self.name {
            hotel.name = name;
        }
        if let Some(location) = self.location {
            hotel.location = location;
        }
        if let Some(rooms) = self.rooms {
            hotel.rooms = rooms;
        }
    }
}
