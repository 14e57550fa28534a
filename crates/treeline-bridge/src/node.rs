//! Capability traits a platform binding implements per widget schema.

use std::error::Error;
use std::fmt;

use serde_json::Value;

use treeline_protocol::{ChildrenTag, Event, PropertyTag, WidgetTag};
use treeline_widget::{Children, Widget};

/// Failure from a node's property setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The node kind has no property with this tag.
    Unknown(PropertyTag),
    /// The tag is known but its payload could not be interpreted.
    Invalid { tag: PropertyTag, reason: String },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(tag) => write!(f, "unknown property tag {tag}"),
            Self::Invalid { tag, reason } => {
                write!(f, "invalid payload for property tag {tag}: {reason}")
            }
        }
    }
}

impl Error for PropertyError {}

/// A node the bridge can drive: tagged property setters plus tagged
/// children-slot accessors on top of the base [`Widget`] contract.
pub trait ProtocolNode: Widget {
    /// Set or unset one tagged property.
    ///
    /// `None` unsets the property; `Some(Value::Null)` is an explicit null
    /// payload, and node implementations that care must distinguish them.
    fn set_property(&mut self, tag: PropertyTag, value: Option<&Value>)
    -> Result<(), PropertyError>;

    /// The children slot for `tag`, or `None` if this node kind has no such
    /// slot.
    fn children_mut(&mut self, tag: ChildrenTag) -> Option<&mut dyn Children<Self::Value>>;
}

/// Instantiates live nodes by widget tag.
///
/// Returning `None` reports an unknown tag; what happens next is decided by
/// the bridge's [`MismatchHandler`](crate::MismatchHandler) policy, so one
/// factory works with both strict and lenient consumers.
pub trait NodeFactory {
    type Value: Clone;

    fn create(&mut self, tag: WidgetTag) -> Option<Box<dyn ProtocolNode<Value = Self::Value>>>;
}

/// Receives outbound [`Event`]s for forwarding to the producer.
pub trait EventSink {
    fn send_event(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn send_event(&mut self, event: Event) {
        self(event)
    }
}
