//! Per-type field metadata and the `impl_record!` macro generating it.

use super::Node;

/// Text-log modifier: splice the field's own fields under its label.
pub const MODIFIER_EXPAND: &str = "expand";
/// Text-log modifier: skip the field when its value is empty.
pub const MODIFIER_OMITEMPTY: &str = "omitempty";
/// Text-log modifier: emit the field even though it has no label.
pub const MODIFIER_EXPLICIT: &str = "explicit";

/// Static metadata of one declared record field.
///
/// `textlog` holds the raw tag `label,modifier,...`. A label of `-` hides
/// the field from the text log; a JSON name of `""` or `-` hides it from
/// pointers and labels. Embedded fields serialize into their parent and
/// contribute neither a pointer segment nor a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub ident: &'static str,
    pub json: &'static str,
    pub textlog: &'static str,
    pub embed: bool,
}

impl FieldDescriptor {
    pub const fn new(ident: &'static str, json: &'static str, textlog: &'static str) -> Self {
        Self {
            ident,
            json,
            textlog,
            embed: false,
        }
    }

    pub const fn embedded(ident: &'static str) -> Self {
        Self {
            ident,
            json: "",
            textlog: "",
            embed: true,
        }
    }

    /// Upper-cased label, the first segment of the text-log tag.
    pub fn label(&self) -> String {
        self.raw_label().to_uppercase()
    }

    fn raw_label(&self) -> &'static str {
        self.textlog.split_once(',').map_or(self.textlog, |(label, _)| label)
    }

    /// Modifiers following the label, in declaration order.
    pub fn modifiers(&self) -> Vec<&'static str> {
        match self.textlog.split_once(',') {
            Some((_, rest)) => rest.split(',').collect(),
            None => Vec::new(),
        }
    }

    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers().contains(&modifier)
    }

    pub fn is_expand(&self) -> bool {
        self.has_modifier(MODIFIER_EXPAND)
    }

    /// Hidden from the text log and the event flattener.
    pub fn is_textlog_hidden(&self) -> bool {
        self.raw_label() == "-"
    }

    /// Takes part in pointer and label computation.
    pub fn is_addressable(&self) -> bool {
        self.embed || !(self.json.is_empty() || self.json == "-")
    }
}

/// One declared field of a record value.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    pub descriptor: &'static FieldDescriptor,
    pub value: &'a dyn Node,
}

/// Types with a declared field table.
///
/// Usually implemented through [`impl_record!`](crate::impl_record).
pub trait Record {
    fn descriptors() -> &'static [FieldDescriptor]
    where
        Self: Sized;

    /// Field values paired with their descriptors, in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Declare the field table of a record type.
///
/// Each field is either `name: ("json name", "textlog tag")` or
/// `name: embed`. The first form generates [`Record`] and a default
/// [`Node`] implementation; prefix the type with `@fields` to generate only
/// [`Record`] and write `Node` by hand (for types with hooks or custom
/// rendering).
///
/// ```
/// use jsonlog::{ObjectHeader, impl_record};
///
/// #[derive(Default)]
/// struct Process {
///     header: ObjectHeader,
///     pid: u32,
///     image: String,
/// }
///
/// impl_record!(Process {
///     header: embed,
///     pid: ("pid", "pid"),
///     image: ("image", "image,omitempty"),
/// });
/// ```
#[macro_export]
macro_rules! impl_record {
    (@descriptor $field:ident, embed) => {
        $crate::FieldDescriptor::embedded(stringify!($field))
    };
    (@descriptor $field:ident, ($json:literal, $textlog:literal)) => {
        $crate::FieldDescriptor::new(stringify!($field), $json, $textlog)
    };
    (@fields $ty:ty { $($field:ident : $kind:tt),* $(,)? }) => {
        impl $crate::Record for $ty {
            fn descriptors() -> &'static [$crate::FieldDescriptor] {
                static DESCRIPTORS: &[$crate::FieldDescriptor] = &[
                    $($crate::impl_record!(@descriptor $field, $kind)),*
                ];
                DESCRIPTORS
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                let values: ::std::vec::Vec<&dyn $crate::Node> =
                    vec![$(&self.$field as &dyn $crate::Node),*];
                <Self as $crate::Record>::descriptors()
                    .iter()
                    .zip(values)
                    .map(|(descriptor, value)| $crate::Field { descriptor, value })
                    .collect()
            }
        }
    };
    ($ty:ty { $($body:tt)* }) => {
        $crate::impl_record!(@fields $ty { $($body)* });

        impl $crate::Node for $ty {
            fn shape(&self) -> $crate::Shape<'_> {
                $crate::Shape::Record($crate::Record::fields(self))
            }

            fn display(&self) -> ::std::string::String {
                $crate::TextlogFormatter::new().format(self).to_string()
            }
        }
    };
}
