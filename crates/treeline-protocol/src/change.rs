//! The closed set of tree mutations a producer can emit.
//!
//! Every variant carries the [`Id`] of the node it targets. A node must be
//! introduced by [`Create`] before anything else references it, and it is
//! destroyed implicitly when a [`Remove`] detaches it from its parent; there
//! is no explicit destroy message.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tags::{ChildrenTag, EventTag, Id, ModifierTag, PropertyTag, WidgetTag};

/// One unit of the wire protocol.
///
/// Batches are ordered; reordering a batch is not semantics-preserving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Instantiate a new node of kind `tag` under `id`.
    Create(Create),
    /// Attach an existing node to a parent's children slot.
    Add(Add),
    /// Relocate a contiguous run within a children slot.
    Move(Move),
    /// Detach and destroy a contiguous run of children.
    Remove(Remove),
    /// Replace a node's entire layout-modifier element list.
    Modifier(ModifierChange),
    /// Set or unset one tagged property on a node.
    Property(PropertyChange),
    /// An outbound notification toward the producer; never mutates the tree.
    Event(Event),
}

impl Change {
    /// The node this change targets.
    pub fn id(&self) -> Id {
        match self {
            Change::Create(c) => c.id,
            Change::Add(c) => c.id,
            Change::Move(c) => c.id,
            Change::Remove(c) => c.id(),
            Change::Modifier(c) => c.id,
            Change::Property(c) => c.id,
            Change::Event(c) => c.id,
        }
    }
}

/// Contract violations caught when a change is constructed or decoded.
///
/// These are protocol errors, not transient conditions: a malformed change is
/// rejected outright and never partially applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A `Remove` whose `removed_ids` list does not have `count` entries.
    RemovedIdsMismatch { count: usize, actual: usize },
    /// A modifier element array with an arity outside {1, 2}.
    ModifierElementArity { found: usize },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemovedIdsMismatch { count, actual } => {
                write!(f, "remove count {count} != removed ID list size {actual}")
            }
            Self::ModifierElementArity { found } => {
                write!(
                    f,
                    "modifier element array may only have 1 or 2 values, found {found}"
                )
            }
        }
    }
}

impl Error for ProtocolError {}

/// Instantiate a node of kind `tag` and register it under `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Create {
    pub id: Id,
    pub tag: WidgetTag,
}

/// Attach node `child_id` at `index` of the `tag` slot of node `id`.
///
/// `index` is relative to the slot's pre-insert state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Add {
    pub id: Id,
    pub tag: ChildrenTag,
    pub child_id: Id,
    pub index: usize,
}

/// Relocate `count` children of slot `tag` from `from_index` to `to_index`.
///
/// Both indices are relative to the slot's pre-move state. Moving the run
/// closes the gap it leaves and preserves the relative order of the moved
/// children: applying `from=1, to=3, count=1` to `[A,B,C,D,E]` yields
/// `[A,C,B,D,E]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub id: Id,
    pub tag: ChildrenTag,
    pub from_index: usize,
    pub to_index: usize,
    pub count: usize,
}

/// Detach `count` children starting at `index` and destroy them.
///
/// Carries the removed ids so the consumer can deregister exactly the nodes
/// the producer destroyed. Construction enforces `removed_ids.len() == count`,
/// so the fields are private.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Remove {
    id: Id,
    tag: ChildrenTag,
    index: usize,
    count: usize,
    removed_ids: Vec<Id>,
}

impl Remove {
    /// Fails with [`ProtocolError::RemovedIdsMismatch`] unless
    /// `removed_ids.len() == count`.
    pub fn new(
        id: Id,
        tag: ChildrenTag,
        index: usize,
        count: usize,
        removed_ids: Vec<Id>,
    ) -> Result<Self, ProtocolError> {
        if removed_ids.len() != count {
            return Err(ProtocolError::RemovedIdsMismatch {
                count,
                actual: removed_ids.len(),
            });
        }
        Ok(Self {
            id,
            tag,
            index,
            count,
            removed_ids,
        })
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn tag(&self) -> ChildrenTag {
        self.tag
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn removed_ids(&self) -> &[Id] {
        &self.removed_ids
    }
}

/// Replace the entire layout-modifier element list of node `id`.
///
/// Element lists are never merged; an empty list clears all modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierChange {
    pub id: Id,
    pub elements: Vec<ModifierElement>,
}

/// One layout-modifier element: a tag plus an optional payload.
///
/// A value-less element is a marker modifier. An explicit JSON `null` payload
/// is normalized to the marker form, so a marker has exactly one encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierElement {
    tag: ModifierTag,
    value: Option<Value>,
}

impl ModifierElement {
    pub fn new(tag: ModifierTag, value: Option<Value>) -> Self {
        let value = value.filter(|v| !v.is_null());
        Self { tag, value }
    }

    /// A marker element with no payload.
    pub fn marker(tag: ModifierTag) -> Self {
        Self { tag, value: None }
    }

    pub fn tag(&self) -> ModifierTag {
        self.tag
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// Set or unset the `tag` property of node `id`.
///
/// `value: None` means the property is unset; `Some(Value::Null)` is an
/// explicit null payload. The two are distinct and both round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub id: Id,
    pub tag: PropertyTag,
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// A present `value` field always decodes to `Some`, even when it holds JSON
/// `null`. The stock `Option` impl would fold that null into the absent case
/// and erase the unset/explicit-null distinction on decode.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// A user-interaction notification flowing back toward the producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Id,
    pub tag: EventTag,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Value>,
}

impl From<Create> for Change {
    fn from(c: Create) -> Self {
        Change::Create(c)
    }
}

impl From<Add> for Change {
    fn from(c: Add) -> Self {
        Change::Add(c)
    }
}

impl From<Move> for Change {
    fn from(c: Move) -> Self {
        Change::Move(c)
    }
}

impl From<Remove> for Change {
    fn from(c: Remove) -> Self {
        Change::Remove(c)
    }
}

impl From<ModifierChange> for Change {
    fn from(c: ModifierChange) -> Self {
        Change::Modifier(c)
    }
}

impl From<PropertyChange> for Change {
    fn from(c: PropertyChange) -> Self {
        Change::Property(c)
    }
}

impl From<Event> for Change {
    fn from(c: Event) -> Self {
        Change::Event(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_count_must_match_list_size() {
        let err = Remove::new(
            Id::new(1),
            ChildrenTag::new(2),
            3,
            4,
            vec![Id::new(5), Id::new(6), Id::new(7)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ProtocolError::RemovedIdsMismatch {
                count: 4,
                actual: 3
            }
        );
        assert_eq!(err.to_string(), "remove count 4 != removed ID list size 3");
    }

    #[test]
    fn remove_accepts_matching_count() {
        let remove = Remove::new(
            Id::new(1),
            ChildrenTag::new(2),
            0,
            2,
            vec![Id::new(9), Id::new(10)],
        )
        .unwrap();
        assert_eq!(remove.count(), 2);
        assert_eq!(remove.removed_ids(), &[Id::new(9), Id::new(10)]);
    }

    #[test]
    fn present_null_property_value_decodes_to_some() {
        let null: PropertyChange = serde_json::from_str(r#"{"id":1,"tag":2,"value":null}"#).unwrap();
        assert_eq!(null.value, Some(Value::Null));

        let absent: PropertyChange = serde_json::from_str(r#"{"id":1,"tag":2}"#).unwrap();
        assert_eq!(absent.value, None);
        assert_ne!(null, absent);
    }

    #[test]
    fn null_modifier_payload_normalizes_to_marker() {
        let element = ModifierElement::new(ModifierTag::new(5), Some(Value::Null));
        assert_eq!(element, ModifierElement::marker(ModifierTag::new(5)));
        assert!(element.value().is_none());
    }
}
