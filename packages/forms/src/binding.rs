//! Per-field view of a form for the renderer.

use crate::schema::{FieldKind, FieldName};
use crate::state::FormState;

/// Everything an input widget needs to draw one field.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBinding {
    pub name: FieldName,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: &'static str,
    pub value: String,
    pub error: Option<String>,
}

impl FieldBinding {
    pub fn input_type(&self) -> &'static str {
        self.kind.input_type()
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

impl FormState {
    /// Bindings for every field of the active schema, in schema order.
    pub fn bindings(&self) -> Vec<FieldBinding> {
        self.schema()
            .fields()
            .iter()
            .map(|spec| FieldBinding {
                name: spec.name,
                label: spec.label,
                kind: spec.constraint.kind,
                placeholder: spec.placeholder,
                value: self.value(spec.name).unwrap_or_default().to_string(),
                error: self.field_error(spec.name).map(ToString::to_string),
            })
            .collect()
    }
}
