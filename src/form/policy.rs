//! Field to widget mapping

use crate::domain::descriptor::{FieldDescriptor, FieldLabel, FieldVariant};
use crate::domain::widget::{FieldRender, WidgetCategory, WidgetKind, WidgetSpec};

/// Decide how a single field is rendered.
///
/// Repeated fields are rejected before the variant is looked at. Required
/// fields start enabled with no toggle; everything else starts disabled,
/// prefilled with the declared default and paired with a toggle.
pub fn widget_for(field: &FieldDescriptor) -> FieldRender {
    if field.label == FieldLabel::Repeated {
        return unsupported(field, format!("Repeated field {} not supported.", field.name));
    }

    let Some(variant) = &field.variant else {
        return unsupported(field, format!("Field {} has no variant.", field.name));
    };

    let category = match category_for(variant) {
        Some(category) => category,
        None => {
            return unsupported(field, format!("Unsupported variant: {}", variant));
        }
    };

    let required = field.label == FieldLabel::Required;
    FieldRender::Widget(WidgetSpec {
        field_name: field.name.clone(),
        label: field.name.clone(),
        kind: if required {
            WidgetKind::Text
        } else {
            WidgetKind::DisabledText
        },
        category,
        initially_enabled: required,
        default_value: field.default_value.clone(),
        toggle: !required,
    })
}

/// Widget bucket for a variant, `None` when the variant has no widget
pub fn category_for(variant: &FieldVariant) -> Option<WidgetCategory> {
    match variant {
        FieldVariant::String => Some(WidgetCategory::String),
        FieldVariant::Bytes => Some(WidgetCategory::Bytes),
        FieldVariant::Int32
        | FieldVariant::Uint32
        | FieldVariant::Int64
        | FieldVariant::Uint64
        | FieldVariant::Sint32
        | FieldVariant::Sint64 => Some(WidgetCategory::Int),
        FieldVariant::Double
        | FieldVariant::Float
        | FieldVariant::Bool
        | FieldVariant::Message
        | FieldVariant::Enum
        | FieldVariant::Other(_) => None,
    }
}

fn unsupported(field: &FieldDescriptor, message: String) -> FieldRender {
    FieldRender::Unsupported {
        field_name: field.name.clone(),
        message,
    }
}
