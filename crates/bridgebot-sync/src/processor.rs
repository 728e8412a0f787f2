use async_trait::async_trait;

use bridgebot_core::Message;

use crate::error::ProcessingError;

/// A named, priority-ordered action over a message in flight.
///
/// Processors may rewrite the message's content or metadata but must
/// leave identity fields (`id`, `timestamp`, `sender`, `source`) alone —
/// a cooperative contract, not an enforced one. Actions should be safe to
/// re-run; the engine itself never retries.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Name used for log correlation and outcome reporting.
    fn name(&self) -> &str;

    /// Lower value runs earlier. Ties keep registration order.
    fn priority(&self) -> i32 {
        0
    }

    async fn process(&self, message: &mut Message) -> Result<(), ProcessingError>;
}
