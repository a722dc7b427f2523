//! Flattening a log object into its rendered leaf fields.

use jsonlog_core::Pointer;

use crate::node::{FieldAddr, MODIFIER_OMITEMPTY, Node, Shape, unwrap_node};
use crate::reference::{Reference, concat_labels};

/// A leaf field of an object together with its rendered value.
#[derive(Debug)]
pub struct ReferencedField<'a> {
    pub reference: Reference<'a>,
    pub value: String,
}

/// Every leaf field of an object, in declaration order.
pub type Event<'a> = Vec<ReferencedField<'a>>;

/// Collect the labelled leaf fields of `object`.
///
/// Expanded and embedded records are descended into; any other labelled
/// field is one value rendered with its generic rendering. Nodes with an
/// [`EventValuer`](crate::EventValuer) list their own values. Pointers and
/// labels are computed during the walk and preset on each reference.
pub fn create_event(object: &dyn Node) -> Event<'_> {
    let mut fields = Vec::new();
    if let Some(node) = unwrap_node(object) {
        walk(object, node, "", &Pointer::root(), &mut fields);
    }
    fields
}

fn walk<'a>(
    root: &'a dyn Node,
    node: &'a dyn Node,
    label_prefix: &str,
    pointer_prefix: &Pointer,
    out: &mut Event<'a>,
) {
    let Shape::Record(fields) = node.shape() else {
        return;
    };
    for field in fields {
        let d = field.descriptor;
        if d.is_textlog_hidden() || (!d.embed && d.json == "-") {
            continue;
        }
        let label = d.label();
        let pointer = if d.json.is_empty() {
            pointer_prefix.clone()
        } else {
            pointer_prefix.clone().append([d.json])
        };
        let field_label = concat_labels(label_prefix, &label);
        let subfield_prefix = if d.is_expand() {
            field_label.as_str()
        } else if d.embed {
            label_prefix
        } else {
            ""
        };

        let Some(value) = unwrap_node(field.value) else {
            continue;
        };
        if let Some(valuer) = value.event_valuer() {
            for event_value in valuer.event_values() {
                out.push(ReferencedField {
                    reference: Reference::with_labels(
                        root,
                        event_value.field,
                        pointer.clone().append(event_value.pointer.iter().cloned()),
                        concat_labels(subfield_prefix, &event_value.label),
                    ),
                    value: event_value.value,
                });
            }
            continue;
        }

        let is_record = matches!(value.shape(), Shape::Record(_));
        if is_record && (d.embed || d.is_expand()) {
            walk(root, value, subfield_prefix, &pointer, out);
        } else if !label.is_empty() {
            if d.has_modifier(MODIFIER_OMITEMPTY) && value.is_empty_value() {
                continue;
            }
            out.push(ReferencedField {
                reference: Reference::with_labels(root, FieldAddr::of_node(value), pointer, field_label),
                value: value.display(),
            });
        }
    }
}
