//! Golden tests for the JSON wire format.
//!
//! The encoded strings here are part of the protocol contract: producers and
//! consumers built at different times must agree on them byte for byte.

use serde_json::json;
use treeline_protocol::{
    Add, Change, ChildrenTag, Create, Event, EventTag, Id, ModifierChange, ModifierElement,
    ModifierTag, Move, PropertyChange, PropertyTag, Remove, WidgetTag,
};

fn assert_roundtrip<T>(model: &T, expected: &str)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    assert_eq!(serde_json::to_string(model).unwrap(), expected);
    assert_eq!(&serde_json::from_str::<T>(expected).unwrap(), model);
}

#[test]
fn full_change_batch() {
    let changes = vec![
        Change::Create(Create {
            id: Id::new(1),
            tag: WidgetTag::new(2),
        }),
        Change::Add(Add {
            id: Id::new(1),
            tag: ChildrenTag::new(2),
            child_id: Id::new(3),
            index: 4,
        }),
        Change::Move(Move {
            id: Id::new(1),
            tag: ChildrenTag::new(2),
            from_index: 3,
            to_index: 4,
            count: 5,
        }),
        Change::Remove(
            Remove::new(
                Id::new(1),
                ChildrenTag::new(2),
                3,
                4,
                vec![Id::new(5), Id::new(6), Id::new(7), Id::new(8)],
            )
            .unwrap(),
        ),
        Change::Modifier(ModifierChange {
            id: Id::new(1),
            elements: vec![
                ModifierElement::new(ModifierTag::new(1), Some(json!({}))),
                ModifierElement::new(ModifierTag::new(2), Some(json!(3))),
                ModifierElement::new(ModifierTag::new(3), Some(json!([]))),
                ModifierElement::marker(ModifierTag::new(4)),
                // An explicit null payload normalizes to the marker form.
                ModifierElement::new(ModifierTag::new(5), Some(json!(null))),
            ],
        }),
        Change::Property(PropertyChange {
            id: Id::new(1),
            tag: PropertyTag::new(2),
            value: Some(json!("hello")),
        }),
        Change::Property(PropertyChange {
            id: Id::new(1),
            tag: PropertyTag::new(2),
            value: None,
        }),
        Change::Event(Event {
            id: Id::new(1),
            tag: EventTag::new(2),
            args: vec![json!("Hello"), json!(2)],
        }),
    ];

    let expected = concat!(
        "[",
        r#"["create",{"id":1,"tag":2}],"#,
        r#"["add",{"id":1,"tag":2,"childId":3,"index":4}],"#,
        r#"["move",{"id":1,"tag":2,"fromIndex":3,"toIndex":4,"count":5}],"#,
        r#"["remove",{"id":1,"tag":2,"index":3,"count":4,"removedIds":[5,6,7,8]}],"#,
        r#"["modifier",{"id":1,"elements":[[1,{}],[2,3],[3,[]],[4],[5]]}],"#,
        r#"["property",{"id":1,"tag":2,"value":"hello"}],"#,
        r#"["property",{"id":1,"tag":2}],"#,
        r#"["event",{"id":1,"tag":2,"args":["Hello",2]}]"#,
        "]",
    );
    assert_roundtrip(&changes, expected);
}

#[test]
fn property_value_absent_vs_null() {
    let unset = PropertyChange {
        id: Id::new(1),
        tag: PropertyTag::new(2),
        value: None,
    };
    let null = PropertyChange {
        id: Id::new(1),
        tag: PropertyTag::new(2),
        value: Some(json!(null)),
    };

    assert_roundtrip(&unset, r#"{"id":1,"tag":2}"#);
    assert_roundtrip(&null, r#"{"id":1,"tag":2,"value":null}"#);
    assert_ne!(unset, null);
}

#[test]
fn event_args_empty_and_non_empty() {
    let with_args = Event {
        id: Id::new(1),
        tag: EventTag::new(2),
        args: vec![json!("Hello"), json!(2)],
    };
    assert_roundtrip(&with_args, r#"{"id":1,"tag":2,"args":["Hello",2]}"#);

    let empty = Event {
        id: Id::new(1),
        tag: EventTag::new(2),
        args: vec![],
    };
    assert_roundtrip(&empty, r#"{"id":1,"tag":2}"#);
}

#[test]
fn modifier_element_arities() {
    assert_roundtrip(
        &ModifierElement::marker(ModifierTag::new(1)),
        "[1]",
    );
    assert_roundtrip(
        &ModifierElement::new(ModifierTag::new(1), Some(json!({}))),
        "[1,{}]",
    );
}

#[test]
fn modifier_element_arity_errors() {
    let zero = serde_json::from_str::<ModifierElement>("[]").unwrap_err();
    assert!(
        zero.to_string()
            .contains("modifier element array may only have 1 or 2 values, found 0"),
        "unexpected message: {zero}"
    );

    let three = serde_json::from_str::<ModifierElement>("[1,{},2]").unwrap_err();
    assert!(
        three
            .to_string()
            .contains("modifier element array may only have 1 or 2 values, found 3"),
        "unexpected message: {three}"
    );
}

#[test]
fn null_modifier_payload_decodes_to_marker() {
    let decoded = serde_json::from_str::<ModifierElement>("[7,null]").unwrap();
    assert_eq!(decoded, ModifierElement::marker(ModifierTag::new(7)));
    // Re-encoding produces the canonical single-element form.
    assert_eq!(serde_json::to_string(&decoded).unwrap(), "[7]");
}
