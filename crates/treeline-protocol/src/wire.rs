//! Positional JSON encodings.
//!
//! Object-shaped payloads derive their serde impls next to their type
//! definitions; this module hand-writes the array-shaped ones:
//!
//! - a [`Change`] is `[token, payload]`,
//! - a [`ModifierElement`] is `[tag]` or `[tag, value]`,
//! - a [`Remove`] payload re-validates its count invariant on decode.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::change::{
    Add, Change, Create, Event, ModifierChange, ModifierElement, Move, PropertyChange,
    ProtocolError, Remove,
};
use crate::tags::{ChildrenTag, Id, ModifierTag};

const CHANGE_TOKENS: &[&str] = &[
    "create", "add", "move", "remove", "modifier", "property", "event",
];

impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        match self {
            Change::Create(c) => {
                pair.serialize_element("create")?;
                pair.serialize_element(c)?;
            }
            Change::Add(c) => {
                pair.serialize_element("add")?;
                pair.serialize_element(c)?;
            }
            Change::Move(c) => {
                pair.serialize_element("move")?;
                pair.serialize_element(c)?;
            }
            Change::Remove(c) => {
                pair.serialize_element("remove")?;
                pair.serialize_element(c)?;
            }
            Change::Modifier(c) => {
                pair.serialize_element("modifier")?;
                pair.serialize_element(c)?;
            }
            Change::Property(c) => {
                pair.serialize_element("property")?;
                pair.serialize_element(c)?;
            }
            Change::Event(c) => {
                pair.serialize_element("event")?;
                pair.serialize_element(c)?;
            }
        }
        pair.end()
    }
}

impl<'de> Deserialize<'de> for Change {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ChangeVisitor)
    }
}

struct ChangeVisitor;

impl<'de> Visitor<'de> for ChangeVisitor {
    type Value = Change;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [token, payload] change array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Change, A::Error> {
        let token: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        fn payload<'de, A: SeqAccess<'de>, T: Deserialize<'de>>(
            seq: &mut A,
        ) -> Result<T, A::Error> {
            seq.next_element()?
                .ok_or_else(|| de::Error::custom("change array is missing its payload"))
        }

        let change = match token.as_str() {
            "create" => Change::Create(payload::<A, Create>(&mut seq)?),
            "add" => Change::Add(payload::<A, Add>(&mut seq)?),
            "move" => Change::Move(payload::<A, Move>(&mut seq)?),
            "remove" => Change::Remove(payload::<A, Remove>(&mut seq)?),
            "modifier" => Change::Modifier(payload::<A, ModifierChange>(&mut seq)?),
            "property" => Change::Property(payload::<A, PropertyChange>(&mut seq)?),
            "event" => Change::Event(payload::<A, Event>(&mut seq)?),
            other => return Err(de::Error::unknown_variant(other, CHANGE_TOKENS)),
        };

        if seq.next_element::<IgnoredAny>()?.is_some() {
            return Err(de::Error::custom(
                "change array must have exactly 2 elements",
            ));
        }
        Ok(change)
    }
}

impl Serialize for ModifierElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value() {
            Some(value) => {
                let mut pair = serializer.serialize_tuple(2)?;
                pair.serialize_element(&self.tag())?;
                pair.serialize_element(value)?;
                pair.end()
            }
            None => {
                let mut single = serializer.serialize_tuple(1)?;
                single.serialize_element(&self.tag())?;
                single.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ModifierElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ModifierElementVisitor)
    }
}

struct ModifierElementVisitor;

impl<'de> Visitor<'de> for ModifierElementVisitor {
    type Value = ModifierElement;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a [tag] or [tag, value] modifier element array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ModifierElement, A::Error> {
        let Some(tag) = seq.next_element::<ModifierTag>()? else {
            return Err(de::Error::custom(ProtocolError::ModifierElementArity {
                found: 0,
            }));
        };
        let value = seq.next_element::<Value>()?;

        let mut found = if value.is_some() { 2 } else { 1 };
        while seq.next_element::<IgnoredAny>()?.is_some() {
            found += 1;
        }
        if found > 2 {
            return Err(de::Error::custom(ProtocolError::ModifierElementArity {
                found,
            }));
        }
        Ok(ModifierElement::new(tag, value))
    }
}

// Decoded removes must satisfy the same invariant as constructed ones, so
// deserialization funnels through `Remove::new`.
impl<'de> Deserialize<'de> for Remove {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct RemoveWire {
            id: Id,
            tag: ChildrenTag,
            index: usize,
            count: usize,
            removed_ids: Vec<Id>,
        }

        let wire = RemoveWire::deserialize(deserializer)?;
        Remove::new(wire.id, wire.tag, wire.index, wire.count, wire.removed_ids)
            .map_err(de::Error::custom)
    }
}
