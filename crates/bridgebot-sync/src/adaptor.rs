//! Adaptor capability traits.
//!
//! A value's role is fixed by which traits it implements — there is no
//! runtime probing for optional methods. [`Subscriber`]s receive inbound
//! webhook deliveries, [`Publisher`]s accept outbound messages, and
//! [`Syncable`] covers adaptors that do both (and is what
//! [`BridgeBuilder::sync`](crate::BridgeBuilder::sync) requires).

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use bridgebot_core::{LocationPayload, MediaPayload, Message, SystemEvent, TextPayload};

use crate::error::AdaptorError;
use crate::processor::Processor;
use crate::types::InboundRequest;

/// Identity and destination-scoped processing shared by every role.
pub trait Adaptor: Send + Sync {
    /// Stable identifier, unique per capability namespace.
    /// Must match `[A-Za-z0-9_-]+`.
    fn id(&self) -> &str;

    /// Processors run on this destination's copy of a message before the
    /// send call is issued.
    fn interceptors(&self) -> &[Arc<dyn Processor>] {
        &[]
    }

    /// Processors run on this destination's copy after the send settles.
    fn handlers(&self) -> &[Arc<dyn Processor>] {
        &[]
    }
}

/// An adaptor that receives messages from its platform.
#[async_trait]
pub trait Subscriber: Adaptor {
    /// Parse one webhook delivery into messages for dispatch.
    /// `Ok(None)` means the delivery carried nothing to relay.
    async fn receive(&self, request: InboundRequest)
        -> Result<Option<Vec<Message>>, AdaptorError>;

    /// Called once at serve time with the computed callback URL so the
    /// platform knows where to deliver webhooks. The default is a no-op
    /// reporting `Ok(false)` for adaptors whose platform is configured
    /// out of band.
    async fn set_webhook_url(&self, _url: &Url) -> Result<bool, AdaptorError> {
        Ok(false)
    }
}

/// An adaptor that delivers messages to its platform.
///
/// `send_text` is mandatory — it is also the target of the alt-fallback
/// chain. The other capabilities are optional: the defaults answer
/// `Ok(None)`, which the send resolver reads as "unsupported".
#[async_trait]
pub trait Publisher: Adaptor {
    async fn send_text(&self, message: &Message, text: &TextPayload)
        -> Result<bool, AdaptorError>;

    async fn send_media(
        &self,
        _message: &Message,
        _media: &MediaPayload,
    ) -> Result<Option<bool>, AdaptorError> {
        Ok(None)
    }

    async fn send_location(
        &self,
        _message: &Message,
        _location: &LocationPayload,
    ) -> Result<Option<bool>, AdaptorError> {
        Ok(None)
    }

    async fn send_system(
        &self,
        _message: &Message,
        _event: &SystemEvent,
    ) -> Result<Option<bool>, AdaptorError> {
        Ok(None)
    }
}

/// Two-way adaptors. Blanket-implemented: anything that can both receive
/// and send qualifies.
pub trait Syncable: Subscriber + Publisher {}

impl<T: Subscriber + Publisher> Syncable for T {}
