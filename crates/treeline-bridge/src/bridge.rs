//! The change applier.

use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;

use tracing::{trace, warn};

use treeline_protocol::{
    Add, Change, ChildrenTag, Create, Id, ModifierChange, Move, PropertyChange, PropertyTag,
    Remove, WidgetTag,
};
use treeline_widget::Children;

use crate::node::{EventSink, NodeFactory, PropertyError, ProtocolNode};

/// Failure while applying a change batch.
///
/// Application stops at the first failing change; the tree keeps the effects
/// of every change before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// A change referenced an id that was never created, or was already
    /// removed. Nodes are never auto-created on reference.
    NodeNotFound(Id),
    /// A create targeted an id that is already registered (or the root).
    DuplicateId(Id),
    /// The factory does not know this widget tag (strict policy).
    UnknownWidget { id: Id, tag: WidgetTag },
    /// The node does not know this property tag (strict policy).
    UnknownProperty { id: Id, tag: PropertyTag },
    /// The node has no children slot with this tag.
    UnknownChildren { id: Id, tag: ChildrenTag },
    /// A known property rejected its payload.
    InvalidProperty {
        id: Id,
        tag: PropertyTag,
        reason: String,
    },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "node {id} not found"),
            Self::DuplicateId(id) => write!(f, "node {id} already exists"),
            Self::UnknownWidget { id, tag } => {
                write!(f, "unknown widget tag {tag} for node {id}")
            }
            Self::UnknownProperty { id, tag } => {
                write!(f, "unknown property tag {tag} on node {id}")
            }
            Self::UnknownChildren { id, tag } => {
                write!(f, "node {id} has no children slot {tag}")
            }
            Self::InvalidProperty { id, tag, reason } => {
                write!(f, "invalid payload for property {tag} on node {id}: {reason}")
            }
        }
    }
}

impl Error for BridgeError {}

/// Policy for producer/consumer schema skew.
///
/// A producer built against a newer schema may emit widget or property tags
/// this consumer has never heard of. The handler decides whether that is
/// fatal ([`Strict`], the default) or survivable ([`Lenient`]).
pub trait MismatchHandler {
    fn unknown_widget(&mut self, id: Id, tag: WidgetTag) -> Result<(), BridgeError>;

    fn unknown_property(&mut self, id: Id, tag: PropertyTag) -> Result<(), BridgeError>;
}

/// Fail fast on any unknown tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl MismatchHandler for Strict {
    fn unknown_widget(&mut self, id: Id, tag: WidgetTag) -> Result<(), BridgeError> {
        Err(BridgeError::UnknownWidget { id, tag })
    }

    fn unknown_property(&mut self, id: Id, tag: PropertyTag) -> Result<(), BridgeError> {
        Err(BridgeError::UnknownProperty { id, tag })
    }
}

/// Log and keep going.
///
/// An unknown widget leaves the node unregistered; the bridge then drops
/// every later change touching it, so the whole unknown subtree disappears
/// instead of producing cascading not-found errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lenient;

impl MismatchHandler for Lenient {
    fn unknown_widget(&mut self, id: Id, tag: WidgetTag) -> Result<(), BridgeError> {
        warn!(%id, %tag, "skipping unknown widget tag");
        Ok(())
    }

    fn unknown_property(&mut self, id: Id, tag: PropertyTag) -> Result<(), BridgeError> {
        warn!(%id, %tag, "skipping unknown property tag");
        Ok(())
    }
}

/// Applies ordered change batches to one widget tree.
///
/// Owns the id-to-node table. The root children slot (`Id::ROOT` with
/// `ChildrenTag::ROOT`) resolves to the container supplied at construction;
/// every other slot is resolved through the owning node.
///
/// A bridge is single-writer by construction: `apply` takes `&mut self`, so
/// two batches can never interleave. Keep the bridge on the thread with
/// rendering affinity and hand it complete batches.
pub struct Bridge<F: NodeFactory> {
    factory: F,
    root: Box<dyn Children<F::Value>>,
    events: Box<dyn EventSink>,
    mismatch: Box<dyn MismatchHandler>,
    nodes: HashMap<Id, Box<dyn ProtocolNode<Value = F::Value>>>,
    /// Ids whose create was skipped by a lenient mismatch handler. Changes
    /// referencing them are dropped silently.
    skipped: HashSet<Id>,
    on_flush: Option<Box<dyn FnMut()>>,
}

impl<F: NodeFactory> Bridge<F> {
    /// A bridge over `root`, creating nodes with `factory` and forwarding
    /// outbound events to `events`. Mismatch policy defaults to [`Strict`].
    pub fn new(
        factory: F,
        root: impl Children<F::Value> + 'static,
        events: impl EventSink + 'static,
    ) -> Self {
        Self {
            factory,
            root: Box::new(root),
            events: Box::new(events),
            mismatch: Box::new(Strict),
            nodes: HashMap::new(),
            skipped: HashSet::new(),
            on_flush: None,
        }
    }

    /// Replace the mismatch policy.
    pub fn with_mismatch_handler(mut self, handler: impl MismatchHandler + 'static) -> Self {
        self.mismatch = Box::new(handler);
        self
    }

    /// Invoke `flush` once after each applied batch, so a surface can
    /// coalesce an entire batch into one redraw.
    pub fn on_changes_applied(mut self, flush: impl FnMut() + 'static) -> Self {
        self.on_flush = Some(Box::new(flush));
        self
    }

    /// Whether `id` currently maps to a live node.
    pub fn is_registered(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes, excluding the implicit root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Apply `changes` strictly in order.
    ///
    /// Stops at the first failing change, leaving earlier effects in place.
    /// The flush hook runs once per call either way, so a surface never
    /// misses a redraw for mutations that did happen.
    pub fn apply(&mut self, changes: &[Change]) -> Result<(), BridgeError> {
        let mut result = Ok(());
        for change in changes {
            trace!(id = %change.id(), "applying change");
            if let Err(err) = self.apply_change(change) {
                result = Err(err);
                break;
            }
        }
        if let Some(flush) = self.on_flush.as_mut() {
            flush();
        }
        result
    }

    fn apply_change(&mut self, change: &Change) -> Result<(), BridgeError> {
        match change {
            Change::Create(c) => self.create(c),
            Change::Add(c) => self.add(c),
            Change::Move(c) => self.move_children(c),
            Change::Remove(c) => self.remove(c),
            Change::Modifier(c) => self.modifier(c),
            Change::Property(c) => self.property(c),
            Change::Event(event) => {
                // Events never touch the tree; they flow outward.
                self.events.send_event(event.clone());
                Ok(())
            }
        }
    }

    fn create(&mut self, c: &Create) -> Result<(), BridgeError> {
        if c.id == Id::ROOT || self.nodes.contains_key(&c.id) || self.skipped.contains(&c.id) {
            return Err(BridgeError::DuplicateId(c.id));
        }
        match self.factory.create(c.tag) {
            Some(node) => {
                self.nodes.insert(c.id, node);
                Ok(())
            }
            None => {
                self.mismatch.unknown_widget(c.id, c.tag)?;
                self.skipped.insert(c.id);
                Ok(())
            }
        }
    }

    fn add(&mut self, c: &Add) -> Result<(), BridgeError> {
        if self.skipped.contains(&c.id) || self.skipped.contains(&c.child_id) {
            trace!(id = %c.id, child = %c.child_id, "dropping add into skipped subtree");
            return Ok(());
        }
        let child = self
            .nodes
            .get(&c.child_id)
            .ok_or(BridgeError::NodeNotFound(c.child_id))?
            .value();
        let slot = self.children_mut(c.id, c.tag)?;
        slot.insert(c.index, child);
        Ok(())
    }

    fn move_children(&mut self, c: &Move) -> Result<(), BridgeError> {
        if self.skipped.contains(&c.id) {
            return Ok(());
        }
        let slot = self.children_mut(c.id, c.tag)?;
        slot.move_range(c.from_index, c.to_index, c.count);
        Ok(())
    }

    fn remove(&mut self, c: &Remove) -> Result<(), BridgeError> {
        if !self.skipped.contains(&c.id()) {
            let slot = self.children_mut(c.id(), c.tag())?;
            slot.remove_range(c.index(), c.count());
        }
        // Removal destroys the listed nodes; any later reference to one of
        // these ids is a NodeNotFound error.
        for removed in c.removed_ids() {
            self.nodes.remove(removed);
            self.skipped.remove(removed);
        }
        Ok(())
    }

    fn modifier(&mut self, c: &ModifierChange) -> Result<(), BridgeError> {
        if self.skipped.contains(&c.id) {
            return Ok(());
        }
        let node = self
            .nodes
            .get_mut(&c.id)
            .ok_or(BridgeError::NodeNotFound(c.id))?;
        node.set_modifiers(&c.elements);
        Ok(())
    }

    fn property(&mut self, c: &PropertyChange) -> Result<(), BridgeError> {
        if self.skipped.contains(&c.id) {
            trace!(id = %c.id, tag = %c.tag, "dropping property for skipped node");
            return Ok(());
        }
        let node = self
            .nodes
            .get_mut(&c.id)
            .ok_or(BridgeError::NodeNotFound(c.id))?;
        match node.set_property(c.tag, c.value.as_ref()) {
            Ok(()) => Ok(()),
            Err(PropertyError::Unknown(tag)) => self.mismatch.unknown_property(c.id, tag),
            Err(PropertyError::Invalid { tag, reason }) => Err(BridgeError::InvalidProperty {
                id: c.id,
                tag,
                reason,
            }),
        }
    }

    fn children_mut(
        &mut self,
        id: Id,
        tag: ChildrenTag,
    ) -> Result<&mut dyn Children<F::Value>, BridgeError> {
        if id == Id::ROOT {
            return if tag == ChildrenTag::ROOT {
                Ok(self.root.as_mut())
            } else {
                Err(BridgeError::UnknownChildren { id, tag })
            };
        }
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(BridgeError::NodeNotFound(id))?;
        node.children_mut(tag)
            .ok_or(BridgeError::UnknownChildren { id, tag })
    }
}

impl<F: NodeFactory + fmt::Debug> fmt::Debug for Bridge<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("factory", &self.factory)
            .field("nodes", &self.nodes.len())
            .field("skipped", &self.skipped.len())
            .finish_non_exhaustive()
    }
}
