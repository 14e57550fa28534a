#![forbid(unsafe_code)]

//! Applies ordered change batches from a producer to a live widget tree.
//!
//! The [`Bridge`] owns the authoritative id-to-node table for one tree and
//! walks each batch strictly in stream order, dispatching to the structural
//! primitives of `treeline-widget`. Platform bindings plug in through three
//! capability traits: [`NodeFactory`] (widget instantiation by tag),
//! [`EventSink`] (outbound events toward the producer), and
//! [`MismatchHandler`] (policy for producer/consumer schema skew).
//!
//! All application happens on whatever thread owns the bridge; the `&mut`
//! API makes batch interleaving impossible by construction. Hand batches
//! over whole and apply them on the thread with rendering affinity.

pub mod bridge;
pub mod node;

pub use bridge::{Bridge, BridgeError, Lenient, MismatchHandler, Strict};
pub use node::{EventSink, NodeFactory, PropertyError, ProtocolNode};
