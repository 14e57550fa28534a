//! Identifier and tag newtypes.
//!
//! Every value here is a plain `u32` on the wire, but the types are distinct
//! on purpose: a [`PropertyTag`] can never be passed where an [`EventTag`] is
//! expected, even though both serialize identically.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one node instance in a tree.
///
/// Ids are assigned by the producer and are opaque to the consumer; the only
/// reserved value is [`Id::ROOT`], the implicit root container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(u32);

impl Id {
    /// The implicit root container. Never created by a `Create` change.
    pub const ROOT: Id = Id(0);

    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! tag_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn value(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

tag_type! {
    /// Identifies a node kind within a widget schema.
    WidgetTag
}

tag_type! {
    /// Identifies one ordered children slot within a node kind.
    ChildrenTag
}

tag_type! {
    /// Identifies a settable property within a node kind.
    PropertyTag
}

tag_type! {
    /// Identifies an event a node kind can emit back to the producer.
    EventTag
}

tag_type! {
    /// Identifies one layout-modifier element kind.
    ModifierTag
}

impl ChildrenTag {
    /// The children slot of the implicit root container.
    pub const ROOT: ChildrenTag = ChildrenTag(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_values_are_stable() {
        // These constants appear in serialized batches and must never change.
        assert_eq!(Id::ROOT.value(), 0);
        assert_eq!(ChildrenTag::ROOT.value(), 1);
    }

    #[test]
    fn tags_serialize_as_bare_numbers() {
        assert_eq!(serde_json::to_string(&WidgetTag::new(7)).unwrap(), "7");
        assert_eq!(
            serde_json::from_str::<PropertyTag>("12").unwrap(),
            PropertyTag::new(12)
        );
    }

    #[test]
    fn negative_id_is_rejected() {
        assert!(serde_json::from_str::<Id>("-1").is_err());
    }
}
