//! The dispatch engine and its setup/serving lifecycle.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, info, warn};
use url::Url;

use bridgebot_core::{BaseUrl, BridgeConfig, ConfigError, Message};

use crate::adaptor::{Publisher, Subscriber, Syncable};
use crate::error::RegistryError;
use crate::pipeline;
use crate::processor::Processor;
use crate::registry::Registry;
use crate::resolve;

/// Setup-phase handle.
///
/// Registration requires `&mut self`, so nothing can register once the
/// builder is consumed by [`build`](Self::build) — the serving-phase
/// [`Bridge`] is immutable by construction and needs no locks.
pub struct BridgeBuilder {
    base_url: BaseUrl,
    step_timeout: Duration,
    registry: Registry,
    interceptors: Vec<Arc<dyn Processor>>,
    handlers: Vec<Arc<dyn Processor>>,
}

impl BridgeBuilder {
    /// Validates the base URL up front; an invalid URL or scheme is the
    /// one fatal construction-time failure.
    pub fn new(config: &BridgeConfig) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::parse(&config.base_url)?;
        info!(base_url = %base_url, "bridge configured");
        Ok(Self {
            base_url,
            step_timeout: Duration::from_millis(config.step_timeout_ms),
            registry: Registry::new(),
            interceptors: Vec::new(),
            handlers: Vec::new(),
        })
    }

    /// Register an adaptor that receives inbound messages.
    pub fn subscribe(&mut self, adaptor: Arc<dyn Subscriber>) -> Result<&mut Self, RegistryError> {
        self.registry.register_subscriber(adaptor)?;
        Ok(self)
    }

    /// Register an adaptor that accepts outbound messages.
    pub fn publish(&mut self, adaptor: Arc<dyn Publisher>) -> Result<&mut Self, RegistryError> {
        self.registry.register_publisher(adaptor)?;
        Ok(self)
    }

    /// Register a two-way adaptor in both namespaces at once.
    pub fn sync<A>(&mut self, adaptor: Arc<A>) -> Result<&mut Self, RegistryError>
    where
        A: Syncable + 'static,
    {
        self.registry.register_syncable(adaptor)?;
        Ok(self)
    }

    /// Add global interceptors — run before any fan-out leg starts.
    pub fn intercept(
        &mut self,
        processors: impl IntoIterator<Item = Arc<dyn Processor>>,
    ) -> &mut Self {
        pipeline::add_processors(&mut self.interceptors, processors);
        self
    }

    /// Add global handlers — run after every fan-out leg has settled.
    pub fn handle(
        &mut self,
        processors: impl IntoIterator<Item = Arc<dyn Processor>>,
    ) -> &mut Self {
        pipeline::add_processors(&mut self.handlers, processors);
        self
    }

    /// Apply a plugin: a setup routine that receives the builder.
    pub fn with(&mut self, plugin: impl FnOnce(&mut Self)) -> &mut Self {
        plugin(self);
        self
    }

    /// Freeze registration and produce the serving-phase engine.
    pub fn build(self) -> Bridge {
        Bridge {
            inner: Arc::new(BridgeInner {
                base_url: self.base_url,
                step_timeout: self.step_timeout,
                registry: self.registry,
                interceptors: self.interceptors,
                handlers: self.handlers,
            }),
        }
    }
}

struct BridgeInner {
    base_url: BaseUrl,
    step_timeout: Duration,
    registry: Registry,
    interceptors: Vec<Arc<dyn Processor>>,
    handlers: Vec<Arc<dyn Processor>>,
}

/// The serving-phase dispatch engine. Cheaply cloneable; all state is
/// frozen at build time.
#[derive(Clone)]
pub struct Bridge {
    inner: Arc<BridgeInner>,
}

impl Bridge {
    pub fn base_url(&self) -> &BaseUrl {
        &self.inner.base_url
    }

    /// The callback URL the transport serves for an adaptor id.
    pub fn webhook_url(&self, adaptor_id: &str) -> Result<Url, ConfigError> {
        self.inner.base_url.webhook_url(adaptor_id)
    }

    pub fn subscriber(&self, id: &str) -> Option<&Arc<dyn Subscriber>> {
        self.inner.registry.subscriber(id)
    }

    pub fn subscriber_ids(&self) -> Vec<String> {
        self.inner.registry.subscriber_ids()
    }

    pub fn publishers(&self) -> &[Arc<dyn Publisher>] {
        self.inner.registry.publishers()
    }

    pub fn interceptors(&self) -> &[Arc<dyn Processor>] {
        &self.inner.interceptors
    }

    pub fn handlers(&self) -> &[Arc<dyn Processor>] {
        &self.inner.handlers
    }

    pub fn step_timeout(&self) -> Duration {
        self.inner.step_timeout
    }

    /// Tell every subscriber where its webhooks will be delivered.
    ///
    /// Called once before serving starts. Failures are logged and skipped
    /// — an adaptor that cannot self-register is configured by hand.
    pub async fn announce_webhooks(&self) {
        for (id, subscriber) in self.inner.registry.subscribers() {
            let url = match self.inner.base_url.webhook_url(id) {
                Ok(url) => url,
                Err(e) => {
                    warn!(adaptor = %id, error = %e, "could not compute webhook URL");
                    continue;
                }
            };
            match subscriber.set_webhook_url(&url).await {
                Ok(true) => info!(adaptor = %id, url = %url, "webhook URL announced"),
                Ok(false) => {}
                Err(e) => {
                    warn!(adaptor = %id, url = %url, error = %e, "webhook announcement failed")
                }
            }
        }
    }

    /// Relay one inbound message to every destination except its origin.
    ///
    /// Phases run in fixed order: global interceptors to completion, then
    /// one concurrent leg per eligible publisher, then global handlers
    /// once every leg has settled. Per-destination failures are contained
    /// inside their leg; this method itself never fails.
    pub async fn dispatch(&self, mut message: Message, origin_id: &str) {
        debug!(
            origin = %origin_id,
            message_id = %message.id,
            kind = message.kind(),
            "dispatch started"
        );

        pipeline::run(
            &self.inner.interceptors,
            &mut message,
            self.inner.step_timeout,
        )
        .await;

        let legs = self
            .inner
            .registry
            .publishers()
            .iter()
            .filter(|publisher| publisher.id() != origin_id)
            .map(|publisher| self.run_leg(publisher.as_ref(), &message));
        join_all(legs).await;

        pipeline::run(&self.inner.handlers, &mut message, self.inner.step_timeout).await;

        debug!(origin = %origin_id, message_id = %message.id, "dispatch complete");
    }

    /// One fan-out leg, on its own copy of the message: scoped
    /// interceptors, then the send, then scoped handlers — each step
    /// awaited before the next starts.
    async fn run_leg(&self, publisher: &dyn Publisher, message: &Message) {
        let mut local = message.clone();
        let step_timeout = self.inner.step_timeout;

        pipeline::run(publisher.interceptors(), &mut local, step_timeout).await;

        match tokio::time::timeout(step_timeout, resolve::resolve(publisher, &local)).await {
            Ok(Ok(true)) => {
                debug!(publisher = %publisher.id(), message_id = %local.id, "delivered")
            }
            Ok(Ok(false)) => {
                debug!(publisher = %publisher.id(), message_id = %local.id, "not delivered")
            }
            Ok(Err(e)) => {
                warn!(publisher = %publisher.id(), message_id = %local.id, error = %e, "send failed")
            }
            Err(_) => {
                warn!(
                    publisher = %publisher.id(),
                    message_id = %local.id,
                    timeout_ms = step_timeout.as_millis() as u64,
                    "send timed out"
                )
            }
        }

        pipeline::run(publisher.handlers(), &mut local, step_timeout).await;
    }
}
