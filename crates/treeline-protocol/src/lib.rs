#![forbid(unsafe_code)]

//! Change protocol for remotely produced widget trees.
//!
//! A producer process describes its UI as an ordered stream of [`Change`]s:
//! node creations, children-list edits, property sets, and layout-modifier
//! replacements. This crate defines those types, their construction-time
//! invariants, and the JSON wire codec that carries them between processes.
//!
//! The codec is transport-agnostic. A batch is a JSON array of changes, each
//! encoded as a two-element `[token, payload]` array:
//!
//! ```json
//! [["create",{"id":1,"tag":2}],["property",{"id":1,"tag":2,"value":"hi"}]]
//! ```
//!
//! Changes are order-sensitive: later entries may reference ids or indices
//! introduced by earlier ones, so a batch must be applied front to back.

pub mod change;
pub mod tags;
mod wire;

pub use change::{
    Add, Change, Create, Event, ModifierChange, ModifierElement, Move, PropertyChange,
    ProtocolError, Remove,
};
pub use tags::{ChildrenTag, EventTag, Id, ModifierTag, PropertyTag, WidgetTag};
