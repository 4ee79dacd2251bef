//! Render instructions derived from descriptors

use serde::{Deserialize, Serialize};

/// How a widget is presented when the form first appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetKind {
    Text,
    DisabledText,
}

/// Value bucket of a text widget. All buckets render as a single-line input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    String,
    Bytes,
    Int,
}

impl WidgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetCategory::String => "string",
            WidgetCategory::Bytes => "bytes",
            WidgetCategory::Int => "int",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub field_name: String,
    pub label: String,
    pub kind: WidgetKind,
    pub category: WidgetCategory,
    pub initially_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Whether an enable toggle accompanies the input
    pub toggle: bool,
}

/// One entry of a rendered form, in field declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldRender {
    Widget(WidgetSpec),
    Unsupported { field_name: String, message: String },
}

impl FieldRender {
    pub fn field_name(&self) -> &str {
        match self {
            FieldRender::Widget(spec) => &spec.field_name,
            FieldRender::Unsupported { field_name, .. } => field_name,
        }
    }

    pub fn as_widget(&self) -> Option<&WidgetSpec> {
        match self {
            FieldRender::Widget(spec) => Some(spec),
            FieldRender::Unsupported { .. } => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FieldRender::Unsupported { .. })
    }
}

/// Result of rendering a method form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "fields", rename_all = "snake_case")]
pub enum FormOutcome {
    Fields(Vec<FieldRender>),
    /// The method takes the void message; no form is needed
    Empty,
}

impl FormOutcome {
    pub fn fields(&self) -> &[FieldRender] {
        match self {
            FormOutcome::Fields(fields) => fields,
            FormOutcome::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FormOutcome::Empty)
    }
}
