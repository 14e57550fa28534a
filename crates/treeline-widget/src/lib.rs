#![forbid(unsafe_code)]

//! Widget-side primitives for consumers of the change protocol.
//!
//! A platform binding implements [`Widget`] for each node kind it can render
//! and [`Children`] for each ordered children slot. The [`MutableChildren`]
//! editor covers the common case of a plain ordered list and is the single
//! implementation of the structural primitives (insert, move, remove) the
//! rest of the system builds on.

pub mod children;

pub use children::{Children, MutableChildren};

use treeline_protocol::ModifierElement;

/// A live widget instance bound to one native value.
///
/// `Value` is the platform handle handed to a parent's [`Children`] slot on
/// attach. It must be `Clone` because the same handle is held by both the
/// node and its parent's container; platform bindings typically use a
/// reference-counted pointer or an index into platform storage.
pub trait Widget {
    type Value: Clone;

    /// The native handle for this widget.
    fn value(&self) -> Self::Value;

    /// Replace this widget's entire layout-modifier element list.
    ///
    /// Lists are replaced wholesale, never merged with the previous list.
    fn set_modifiers(&mut self, elements: &[ModifierElement]);
}
