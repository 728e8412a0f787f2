//! The message dispatch/synchronization engine.
//!
//! [`BridgeBuilder`] is the setup-phase handle: adaptors and processors
//! are registered there, then [`BridgeBuilder::build`] freezes everything
//! into an immutable [`Bridge`] that the transport layer drives. One
//! inbound message flows through global interceptors, a concurrent
//! fan-out to every other destination, and global handlers — in that
//! strict order.

pub mod adaptor;
pub mod bridge;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod registry;
pub mod resolve;
pub mod types;

pub use adaptor::{Adaptor, Publisher, Subscriber, Syncable};
pub use bridge::{Bridge, BridgeBuilder};
pub use error::{AdaptorError, ProcessingError, RegistryError};
pub use pipeline::ProcessorOutcome;
pub use processor::Processor;
pub use registry::Registry;
pub use types::InboundRequest;
