use serde_json::Value;

use crate::builders::storage::{StorageProvider, load_records, save_records};
use crate::builders::validator;
use crate::core::error::{StoreResult, ValidationError};
use crate::core::records::{Customer, EntityKind, Record, Report};

/// CRUD over the customers collection. Same validation discipline as the hotel
/// registry, without any reservation linkage.
pub struct CustomerRegistry<'s> {
    store: &'s dyn StorageProvider,
    collection: &'s str,
}

impl<'s> CustomerRegistry<'s> {
    pub fn new(store: &'s dyn StorageProvider, collection: &'s str) -> Self {
        Self { store, collection }
    }

    pub fn create(
        &self,
        customer_id: impl Into<Value>,
        name: impl Into<Value>,
        email: impl Into<Value>,
    ) -> StoreResult<Report> {
        let customer = match parse_customer(&customer_id.into(), &name.into(), &email.into()) {
            Ok(customer) => customer,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut customers = self.load()?;
        if customers
            .iter()
            .any(|c| c.customer_id == customer.customer_id)
        {
            log::info!("customer {} already exists", customer.customer_id);
            return Ok(Report::AlreadyExists {
                kind: EntityKind::Customer,
                id: customer.customer_id,
            });
        }

        let id = customer.customer_id;
        customers.push(customer);
        self.save(&customers)?;
        Ok(Report::Created {
            kind: EntityKind::Customer,
            id,
        })
    }

    pub fn delete(&self, customer_id: impl Into<Value>) -> StoreResult<Report> {
        let customer_id = match validator::integer("customer_id", &customer_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut customers = self.load()?;
        customers.retain(|c| c.customer_id != customer_id);
        self.save(&customers)?;
        Ok(Report::Deleted {
            kind: EntityKind::Customer,
            id: customer_id,
        })
    }

    pub fn display(&self, customer_id: impl Into<Value>) -> StoreResult<Report> {
        let customer_id = match validator::integer("customer_id", &customer_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };

        Ok(self
            .load()?
            .into_iter()
            .find(|c| c.customer_id == customer_id)
            .map(|c| Report::Found(Record::Customer(c)))
            .unwrap_or(Report::NotFound {
                kind: EntityKind::Customer,
                id: customer_id,
            }))
    }

    /// Partial update; empty values keep the stored field.
    pub fn update(
        &self,
        customer_id: impl Into<Value>,
        name: Option<Value>,
        email: Option<Value>,
    ) -> StoreResult<Report> {
        let customer_id = match validator::integer("customer_id", &customer_id.into()) {
            Ok(id) => id,
            Err(err) => return Ok(Report::rejected(err)),
        };
        let (name, email) = match validator::optional_text("name", name)
            .and_then(|name| Ok((name, validator::optional_text("email", email)?)))
        {
            Ok(fields) => fields,
            Err(err) => return Ok(Report::rejected(err)),
        };

        let mut customers = self.load()?;
        let Some(customer) = customers.iter_mut().find(|c| c.customer_id == customer_id) else {
            return Ok(Report::NotFound {
                kind: EntityKind::Customer,
                id: customer_id,
            });
        };

        if let Some(name) = name {
            customer.name = name;
        }
        if let Some(email) = email {
            customer.email = email;
        }

        self.save(&customers)?;
        Ok(Report::Updated {
            kind: EntityKind::Customer,
            id: customer_id,
        })
    }

    pub fn list(&self) -> StoreResult<Report> {
        Ok(Report::Listed {
            kind: EntityKind::Customer,
            records: self.load()?.into_iter().map(Record::Customer).collect(),
        })
    }

    pub fn load(&self) -> StoreResult<Vec<Customer>> {
        load_records(self.store, self.collection)
    }

    fn save(&self, customers: &[Customer]) -> StoreResult<()> {
        save_records(self.store, self.collection, customers)
    }
}

fn parse_customer(
    customer_id: &Value,
    name: &Value,
    email: &Value,
) -> Result<Customer, ValidationError> {
    Ok(Customer {
        customer_id: validator::integer("customer_id", customer_id)?,
        name: validator::text("name", name)?,
        email: validator::text("email", email)?,
    })
}
