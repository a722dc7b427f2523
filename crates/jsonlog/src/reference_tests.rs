use jsonlog_core::Pointer;

use crate::node::{FieldAddr, Node};
use crate::reference::{FieldCitation, Reference, concat_labels, find_label};
use crate::resolve::resolve;
use crate::test_utils::{TestObject, test_object};
use crate::values::KeyValueList;

fn references(object: &TestObject) -> Vec<(String, FieldAddr)> {
    let subobject = object.subobject.as_ref().unwrap();
    vec![
        ("substruct".into(), FieldAddr::of(&object.substruct)),
        ("subfield1".into(), FieldAddr::of(&object.substruct.subfield1)),
        ("subfield2".into(), FieldAddr::of(&object.embedded.subfield2)),
        ("nested".into(), FieldAddr::of(&object.nested)),
        ("nested.substruct".into(), FieldAddr::of(&object.nested.substruct)),
        ("subfield3".into(), FieldAddr::of(&object.nested.substruct.subfield3)),
        ("unexpanded".into(), FieldAddr::of(&object.unexpanded)),
        ("subfield4".into(), FieldAddr::of(&object.unexpanded.subfield4)),
        ("subfield5".into(), FieldAddr::of(&object.subfield5)),
        ("valuer".into(), FieldAddr::of(&object.valuer)),
        ("subfield6".into(), FieldAddr::of(&object.valuer.subfield6)),
        ("subfield7".into(), FieldAddr::of(&object.valuer.subfield7)),
        ("subobject".into(), FieldAddr::of(&object.subobject)),
        ("subfield8".into(), FieldAddr::of(&subobject.subfield8)),
    ]
}

fn render(object: &TestObject) -> String {
    references(object)
        .into_iter()
        .map(|(name, target)| {
            let reference = Reference::new(object, target);
            format!("{name:<16} {:<28} {}", reference.to_pointer().to_string(), reference.to_label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn pointers_and_labels() {
    let object = test_object();
    insta::assert_snapshot!(render(&object), @r"
    substruct        /substruct                   SUBSTRUCT
    subfield1        /substruct/subfield1         SUBSTRUCT_SUBFIELD1
    subfield2        /subfield2                   SUBFIELD2
    nested           /nested                      NESTED
    nested.substruct /nested/substruct            NESTED
    subfield3        /nested/substruct/subfield3  NESTED_SUBFIELD3
    unexpanded       /unexpanded                  UNEXPANDED
    subfield4        /unexpanded/subfield4        SUBFIELD4
    subfield5        /subfield5                   SUBFIELD5
    valuer           /valuer                      VALUER
    subfield6        /valuer/subfield6            subfield6
    subfield7        /valuer/subfield7            subfield7
    subobject        /subobject                   SUBOBJECT
    subfield8        /subobject/subfield8         SUBOBJECT_SUBFIELD8
    ");
}

#[test]
fn pointers_resolve_to_their_targets() {
    let object = test_object();
    for (name, target) in references(&object) {
        let reference = Reference::new(&object, target);
        let node = resolve(&object, reference.to_pointer()).unwrap();
        assert_eq!(FieldAddr::of_node(node), target, "{name}");
    }
}

#[test]
fn root_reference() {
    let object = test_object();
    let reference = Reference::new(&object, FieldAddr::of(&object));
    assert!(reference.to_pointer().is_root());
    assert_eq!(reference.to_label(), "");
}

#[test]
fn names_are_cached() {
    let object = test_object();
    let reference = Reference::to(&object, &object.subfield5);
    let first = reference.to_pointer() as *const Pointer;
    let second = reference.to_pointer() as *const Pointer;
    assert_eq!(first, second);
}

#[test]
fn preset_labels_are_trusted() {
    let object = test_object();
    let reference = Reference::with_labels(
        &object,
        FieldAddr::of(&object.subfield5),
        Pointer::new(["elsewhere"]),
        "CUSTOM".into(),
    );
    assert_eq!(reference.to_pointer().to_string(), "/elsewhere");
    assert_eq!(reference.to_label(), "CUSTOM");
}

#[test]
#[should_panic(expected = "no pointer")]
fn unreachable_target_panics() {
    let object = test_object();
    let stranger = String::from("stranger");
    Reference::to(&object, &stranger).to_pointer();
}

#[test]
#[should_panic(expected = "no label")]
fn hidden_field_is_unreachable() {
    let object = test_object();
    Reference::to(&object, &object.hidden).to_label();
}

#[test]
fn labels_of_absent_values() {
    let object = TestObject::default();
    assert_eq!(find_label(&object, FieldAddr::of(&object.subobject)).as_deref(), Some("SUBOBJECT"));
    assert_eq!(find_label(&object, FieldAddr::of(&object.subfield5)).as_deref(), Some("SUBFIELD5"));
}

#[test]
fn display_and_serialize() {
    let object = test_object();
    let reference = Reference::to(&object, &object.substruct.subfield1);
    assert_eq!(reference.to_string(), "SUBSTRUCT_SUBFIELD1");
    assert_eq!(
        serde_json::to_string(&reference).unwrap(),
        r#""/substruct/subfield1""#
    );
}

#[test]
fn value_resolves_target() {
    let object = test_object();
    let reference = Reference::to(&object, &object.nested.substruct.subfield3);
    assert_eq!(reference.value().display(), "subfield3");
}

#[test]
fn citation_round_trip() {
    let object = test_object();
    let citation = Reference::to(&object, &object.subfield5).cite();
    assert_eq!(citation.label(), "SUBFIELD5");

    let json = serde_json::to_string(&citation).unwrap();
    assert_eq!(json, r#""/subfield5""#);

    let restored: FieldCitation = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.label(), "");
    let bound = restored.bind(&object).unwrap();
    assert_eq!(bound.target(), FieldAddr::of(&object.subfield5));
    assert_eq!(bound.to_label(), "SUBFIELD5");
}

#[test]
fn bound_citation_keeps_pointer_and_recomputes_label() {
    let object = test_object();
    let citation = FieldCitation::new(Pointer::new(["subfield5"]), "STALE");
    let bound = citation.bind(&object).unwrap();
    assert_eq!(bound.to_pointer(), citation.pointer());
    assert_eq!(bound.to_label(), "SUBFIELD5");
}

#[test]
fn citation_bind_fails_on_missing_field() {
    let object = test_object();
    let citation = FieldCitation::new(Pointer::new(["missing"]), "MISSING");
    assert!(citation.bind(&object).is_err());
}

#[derive(Debug, Default)]
struct Environment {
    variables: KeyValueList,
    items: Vec<Item>,
}

#[derive(Debug, Default)]
struct Item {
    name: String,
}

crate::impl_record!(Item {
    name: ("name", "name"),
});

crate::impl_record!(Environment {
    variables: ("variables", "env"),
    items: ("items", "items"),
});

#[test]
fn map_entries_use_hooks() {
    let environment = Environment {
        variables: [("PATH", "/bin"), ("HOME", "/root")].into_iter().collect(),
        items: Vec::new(),
    };
    let home = &environment.variables.entries()[1].value;
    let reference = Reference::to(&environment, home);
    assert_eq!(reference.to_pointer().to_string(), "/variables/HOME");
    assert_eq!(reference.to_label(), "HOME");
    assert_eq!(
        FieldAddr::of_node(resolve(&environment, reference.to_pointer()).unwrap()),
        FieldAddr::of(home)
    );
}

#[test]
fn sequence_elements_are_indexed() {
    let environment = Environment {
        variables: KeyValueList::new(),
        items: vec![
            Item { name: "first".into() },
            Item { name: "second".into() },
        ],
    };
    let reference = Reference::to(&environment, &environment.items[1].name);
    assert_eq!(reference.to_pointer().to_string(), "/items/1/name");
    assert_eq!(reference.to_label(), "NAME_2");

    let element = Reference::to(&environment, &environment.items[0]);
    assert_eq!(element.to_pointer().to_string(), "/items/0");
    assert_eq!(element.to_label(), "ITEMS");
}

#[test]
fn concat_labels_collapses_parts() {
    assert_eq!(concat_labels("", "B"), "B");
    assert_eq!(concat_labels("A", ""), "A");
    assert_eq!(concat_labels("A", "A"), "A");
    assert_eq!(concat_labels("A", "B"), "A_B");
}
