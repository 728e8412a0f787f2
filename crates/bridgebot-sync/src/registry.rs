//! Identity-keyed adaptor collections.
//!
//! Subscriber and publisher namespaces are independent: the same id may
//! hold both roles (that is how two-way adaptors register), but never the
//! same role twice. Publishers keep insertion order — that is the fan-out
//! iteration order.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::adaptor::{Publisher, Subscriber, Syncable};
use crate::error::RegistryError;

#[derive(Default)]
pub struct Registry {
    subscribers: HashMap<String, Arc<dyn Subscriber>>,
    publishers: Vec<Arc<dyn Publisher>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_subscriber(
        &mut self,
        adaptor: Arc<dyn Subscriber>,
    ) -> Result<(), RegistryError> {
        let id = adaptor.id().to_string();
        validate_id(&id)?;
        if self.subscribers.contains_key(&id) {
            return Err(RegistryError::Duplicate {
                id,
                role: "subscriber",
            });
        }
        info!(adaptor = %id, "subscriber registered");
        self.subscribers.insert(id, adaptor);
        Ok(())
    }

    pub fn register_publisher(
        &mut self,
        adaptor: Arc<dyn Publisher>,
    ) -> Result<(), RegistryError> {
        let id = adaptor.id().to_string();
        validate_id(&id)?;
        if self.publishers.iter().any(|p| p.id() == id) {
            return Err(RegistryError::Duplicate {
                id,
                role: "publisher",
            });
        }
        info!(adaptor = %id, "publisher registered");
        self.publishers.push(adaptor);
        Ok(())
    }

    /// Register one adaptor in both namespaces.
    ///
    /// Both namespaces are checked before either is touched, so a failed
    /// registration leaves the registry unchanged.
    pub fn register_syncable<A>(&mut self, adaptor: Arc<A>) -> Result<(), RegistryError>
    where
        A: Syncable + 'static,
    {
        let id = adaptor.id().to_string();
        validate_id(&id)?;
        if self.subscribers.contains_key(&id) {
            return Err(RegistryError::Duplicate {
                id,
                role: "subscriber",
            });
        }
        if self.publishers.iter().any(|p| p.id() == id) {
            return Err(RegistryError::Duplicate {
                id,
                role: "publisher",
            });
        }

        info!(adaptor = %id, "syncable adaptor registered");
        self.subscribers
            .insert(id, Arc::clone(&adaptor) as Arc<dyn Subscriber>);
        self.publishers.push(adaptor as Arc<dyn Publisher>);
        Ok(())
    }

    pub fn subscriber(&self, id: &str) -> Option<&Arc<dyn Subscriber>> {
        self.subscribers.get(id)
    }

    pub fn subscribers(&self) -> impl Iterator<Item = (&str, &Arc<dyn Subscriber>)> {
        self.subscribers.iter().map(|(id, a)| (id.as_str(), a))
    }

    pub fn subscriber_ids(&self) -> Vec<String> {
        self.subscribers.keys().cloned().collect()
    }

    /// Publishers in fan-out order (insertion order).
    pub fn publishers(&self) -> &[Arc<dyn Publisher>] {
        &self.publishers
    }
}

fn validate_id(id: &str) -> Result<(), RegistryError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RegistryError::InvalidId { id: id.to_string() })
    }
}
