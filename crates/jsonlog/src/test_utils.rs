//! Shared fixtures and snapshot helpers.

use jsonlog_core::Pointer;

use crate::node::{
    EventValue, EventValuer, FieldAddr, Node, Record, RelativeLabelProvider,
    RelativePointerProvider, Shape,
};
use crate::object::ObjectHeader;
use crate::textlog::TextlogEntry;

/// One `KEY: value` line per pair.
pub fn lines(entry: &TextlogEntry) -> String {
    entry
        .iter()
        .map(|pair| format!("{}: {}", pair.key, pair.value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Default)]
pub struct SubStruct {
    pub subfield1: String,
}

crate::impl_record!(SubStruct {
    subfield1: ("subfield1", "subfield1"),
});

#[derive(Debug, Default)]
pub struct Embedded {
    pub subfield2: String,
}

crate::impl_record!(Embedded {
    subfield2: ("subfield2", "subfield2"),
});

#[derive(Debug, Default)]
pub struct Inner {
    pub subfield3: String,
}

crate::impl_record!(Inner {
    subfield3: ("subfield3", "subfield3"),
});

/// Expanded field holding an expanded field without a label of its own.
#[derive(Debug, Default)]
pub struct Nested {
    pub substruct: Inner,
}

crate::impl_record!(Nested {
    substruct: ("substruct", ",expand"),
});

/// Record rendered as a single value.
#[derive(Debug, Default)]
pub struct Unexpanded {
    pub subfield4: String,
}

crate::impl_record!(@fields Unexpanded {
    subfield4: ("subfield4", "subfield4"),
});

impl Node for Unexpanded {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self.fields())
    }

    fn display(&self) -> String {
        self.subfield4.clone()
    }
}

/// Record naming its own fields through hooks.
#[derive(Debug, Default)]
pub struct Valuer {
    pub subfield6: String,
    pub subfield7: String,
}

impl Valuer {
    fn own_name(&self, target: FieldAddr) -> Option<&'static str> {
        if target == FieldAddr::of(&self.subfield6) {
            Some("subfield6")
        } else if target == FieldAddr::of(&self.subfield7) {
            Some("subfield7")
        } else {
            None
        }
    }
}

crate::impl_record!(@fields Valuer {
    subfield6: ("subfield6", "subfield6"),
    subfield7: ("subfield7", "subfield7"),
});

impl Node for Valuer {
    fn shape(&self) -> Shape<'_> {
        Shape::Record(self.fields())
    }

    fn display(&self) -> String {
        format!("{} {}", self.subfield6, self.subfield7)
    }

    fn pointer_provider(&self) -> Option<&dyn RelativePointerProvider> {
        Some(self)
    }

    fn label_provider(&self) -> Option<&dyn RelativeLabelProvider> {
        Some(self)
    }

    fn event_valuer(&self) -> Option<&dyn EventValuer> {
        Some(self)
    }
}

impl RelativePointerProvider for Valuer {
    fn relative_pointer(&self, target: FieldAddr) -> Option<Pointer> {
        self.own_name(target).map(|name| Pointer::new([name]))
    }
}

impl RelativeLabelProvider for Valuer {
    fn relative_label(&self, target: FieldAddr) -> Option<String> {
        self.own_name(target).map(str::to_owned)
    }
}

impl EventValuer for Valuer {
    fn event_values(&self) -> Vec<EventValue> {
        [("subfield6", &self.subfield6), ("subfield7", &self.subfield7)]
            .into_iter()
            .map(|(name, value)| EventValue {
                field: FieldAddr::of(value),
                value: value.clone(),
                label: name.to_owned(),
                pointer: Pointer::new([name]),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct SubObject {
    pub subfield8: String,
}

crate::impl_record!(SubObject {
    subfield8: ("subfield8", "subfield8"),
});

/// Object exercising every way a field can be reached.
#[derive(Debug, Default)]
pub struct TestObject {
    pub header: ObjectHeader,
    pub substruct: SubStruct,
    pub embedded: Embedded,
    pub nested: Nested,
    pub unexpanded: Unexpanded,
    pub subfield5: String,
    pub valuer: Valuer,
    pub subobject: Option<Box<SubObject>>,
    pub hidden: String,
}

crate::impl_record!(TestObject {
    header: embed,
    substruct: ("substruct", "substruct,expand"),
    embedded: embed,
    nested: ("nested", "nested,expand"),
    unexpanded: ("unexpanded", "unexpanded"),
    subfield5: ("subfield5", "subfield5"),
    valuer: ("valuer", "valuer"),
    subobject: ("subobject", "subobject,expand"),
    hidden: ("-", "-"),
});

pub fn test_object() -> TestObject {
    TestObject {
        header: ObjectHeader::new("test").with_summary("summary"),
        substruct: SubStruct {
            subfield1: "subfield1".into(),
        },
        embedded: Embedded {
            subfield2: "subfield2".into(),
        },
        nested: Nested {
            substruct: Inner {
                subfield3: "subfield3".into(),
            },
        },
        unexpanded: Unexpanded {
            subfield4: "subfield4".into(),
        },
        subfield5: "subfield5".into(),
        valuer: Valuer {
            subfield6: "subfield6".into(),
            subfield7: "subfield7".into(),
        },
        subobject: Some(Box::new(SubObject {
            subfield8: "subfield8".into(),
        })),
        hidden: "hidden".into(),
    }
}
