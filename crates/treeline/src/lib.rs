#![forbid(unsafe_code)]

//! Treeline public facade.
//!
//! Keeps a remotely produced UI description synchronized with a locally
//! rendered widget tree. A producer emits ordered [`Change`] batches; the
//! [`Bridge`] applies them to live nodes created through a [`NodeFactory`];
//! lazy lists materialize a bounded window of an unbounded sequence through
//! [`WindowSizer`] and [`LazyItems`].
//!
//! This crate re-exports the surface of the member crates; depend on the
//! members directly if you only need one layer.

// --- Protocol re-exports ---------------------------------------------------

pub use treeline_protocol::{
    Add, Change, ChildrenTag, Create, Event, EventTag, Id, ModifierChange, ModifierElement,
    ModifierTag, Move, PropertyChange, PropertyTag, ProtocolError, Remove, WidgetTag,
};

// --- Widget re-exports -----------------------------------------------------

pub use treeline_widget::{Children, MutableChildren, Widget};

// --- Bridge re-exports -----------------------------------------------------

pub use treeline_bridge::{
    Bridge, BridgeError, EventSink, Lenient, MismatchHandler, NodeFactory, PropertyError,
    ProtocolNode, Strict,
};

// --- Lazy-list re-exports --------------------------------------------------

pub use treeline_lazy::{
    DEFAULT_MARGIN, ItemsNotification, LazyController, LazyItems, Loaded, PagingSource,
    WindowSizer,
};
