//! In-memory [`Database`] implementation.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use common::operations::{By, Delete, Insert, Select, Update};
use tokio::{sync::Mutex, task};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        property::{self, Listing},
        Property,
    },
    infra::{database, Database},
};

/// In-memory property store.
///
/// Every operation yields to the runtime once, the way a remote round-trip
/// would, so callers observe their own intermediate states.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`Property`]s.
    properties: Arc<Mutex<HashMap<property::Id, Property>>>,

    /// Indicator whether write operations are refused.
    refuse_writes: Arc<AtomicBool>,
}

impl Memory {
    /// Creates a new empty [`Memory`] store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following write operation fail (or succeed again).
    pub fn refuse_writes(&self, refuse: bool) {
        self.refuse_writes.store(refuse, Ordering::SeqCst);
    }

    /// Returns the number of stored [`Property`]s.
    pub async fn len(&self) -> usize {
        self.properties.lock().await.len()
    }

    /// Indicates whether no [`Property`] is stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Checks whether writes are currently allowed.
    fn check_writable(&self, op: &str) -> Result<(), Traced<database::Error>> {
        if self.refuse_writes.load(Ordering::SeqCst) {
            log::debug!("refusing `{op}` operation");
            return Err(tracerr::new!(database::Error::Refused(format!(
                "`{op}` is not allowed",
            ))));
        }
        Ok(())
    }
}

impl Database<Insert<Listing>> for Memory {
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        task::yield_now().await;
        self.check_writable("insert")?;

        let property = Property {
            id: property::Id::new(),
            listing,
        };
        _ = self
            .properties
            .lock()
            .await
            .insert(property.id, property.clone());
        log::debug!("inserted `Property(id: {})`", property.id);

        Ok(property)
    }
}

impl Database<Update<Property>> for Memory {
    type Ok = Property;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(property): Update<Property>,
    ) -> Result<Self::Ok, Self::Err> {
        task::yield_now().await;
        self.check_writable("update")?;

        let mut properties = self.properties.lock().await;
        let stored = properties
            .get_mut(&property.id)
            .ok_or(database::Error::NotFound(property.id))
            .map_err(tracerr::wrap!())?;
        stored.clone_from(&property);
        log::debug!("updated `Property(id: {})`", property.id);

        Ok(property)
    }
}

impl Database<Delete<By<Property, property::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Property, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        task::yield_now().await;
        self.check_writable("delete")?;

        let id = by.into_inner();
        self.properties
            .lock()
            .await
            .remove(&id)
            .map(drop)
            .ok_or(database::Error::NotFound(id))
            .map_err(tracerr::wrap!())
    }
}

impl Database<Select<By<Option<Property>, property::Id>>> for Memory {
    type Ok = Option<Property>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Property>, property::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        task::yield_now().await;

        Ok(self.properties.lock().await.get(by.inner()).cloned())
    }
}
