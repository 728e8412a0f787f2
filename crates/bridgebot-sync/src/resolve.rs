//! Type-aware send resolution with the alt fallback chain.

use tracing::debug;

use bridgebot_core::{Message, MessagePayload};

use crate::adaptor::Publisher;
use crate::error::AdaptorError;

/// Invoke the publisher capability matching the message's payload type.
///
/// When the type-specific capability is absent (`Ok(None)` from an
/// optional send method), the fallback chain applies: a message carrying
/// `alt` content is re-sent as a synthesized text message through
/// `send_text`; otherwise the result is `Ok(false)` — a missing
/// capability is not an error. Errors from the underlying send call
/// propagate to the caller (the fan-out leg).
pub async fn resolve(publisher: &dyn Publisher, message: &Message) -> Result<bool, AdaptorError> {
    let attempted = match &message.payload {
        MessagePayload::Text(text) => return publisher.send_text(message, text).await,
        MessagePayload::Media(media) => publisher.send_media(message, media).await?,
        MessagePayload::Location(location) => publisher.send_location(message, location).await?,
        MessagePayload::System(event) => publisher.send_system(message, event).await?,
    };

    if let Some(delivered) = attempted {
        return Ok(delivered);
    }

    if let Some(synthesized) = message.alt_fallback() {
        if let MessagePayload::Text(ref text) = synthesized.payload {
            return publisher.send_text(&synthesized, text).await;
        }
    }

    debug!(
        publisher = %publisher.id(),
        kind = message.kind(),
        "capability absent and no alt fallback, message skipped"
    );
    Ok(false)
}
