//! File-set descriptor types
//!
//! Read-only snapshot of the JSON file set served by a protorpc service at
//! `<service_path>/form/file_set`. Every collection keeps document order; the
//! resolver relies on that for first-match-wins lookups.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// File Set
// ============================================================================

/// A collection of file descriptors (the whole schema document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "FileSetRepr")]
pub struct FileSet {
    pub files: Vec<FileDescriptor>,
}

/// Accepts both `{"files": [...]}` and a bare array of files
#[derive(Deserialize)]
#[serde(untagged)]
enum FileSetRepr {
    Wrapped {
        #[serde(default)]
        files: Vec<FileDescriptor>,
    },
    Bare(Vec<FileDescriptor>),
}

impl From<FileSetRepr> for FileSet {
    fn from(repr: FileSetRepr) -> Self {
        match repr {
            FileSetRepr::Wrapped { files } | FileSetRepr::Bare(files) => Self { files },
        }
    }
}

impl FileSet {
    pub fn new(files: Vec<FileDescriptor>) -> Self {
        Self { files }
    }

    /// Parse a file set from its JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Files, Messages, Services
// ============================================================================

/// Description of one "file" unit: a package and the definitions it owns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    #[serde(default)]
    pub package: String,
    /// `None` when the file declares no message collection at all
    #[serde(
        default,
        rename = "message_types",
        alias = "messageTypes",
        alias = "messages",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_types: Option<Vec<MessageDescriptor>>,
    #[serde(
        default,
        rename = "service_types",
        alias = "serviceTypes",
        alias = "services",
        skip_serializing_if = "Option::is_none"
    )]
    pub service_types: Option<Vec<ServiceDescriptor>>,
    #[serde(
        default,
        rename = "enum_types",
        alias = "enumTypes",
        alias = "enums",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_types: Option<Vec<EnumDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(
        default,
        rename = "enum_types",
        alias = "enumTypes",
        alias = "enums",
        skip_serializing_if = "Option::is_none"
    )]
    pub enum_types: Option<Vec<EnumDescriptor>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    #[serde(default)]
    pub name: String,
    /// Fully qualified name of the request message
    #[serde(default, alias = "requestType")]
    pub request_type: String,
    #[serde(default, alias = "responseType")]
    pub response_type: String,
}

/// Enum definitions are carried through parsing; no widget renders them yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub values: Vec<EnumValueDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDescriptor {
    pub name: String,
    pub number: i64,
}

// ============================================================================
// Fields
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<i64>,
    #[serde(default)]
    pub label: FieldLabel,
    /// Absent when the descriptor leaves the variant unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<FieldVariant>,
    /// Message or enum type for MESSAGE/ENUM fields
    #[serde(default, alias = "typeName", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Text representation of the declared default
    #[serde(
        default,
        alias = "default",
        alias = "defaultValue",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, variant: FieldVariant, label: FieldLabel) -> Self {
        Self {
            name: name.into(),
            number: None,
            label,
            variant: Some(variant),
            type_name: None,
            default_value: None,
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }
}

/// Field cardinality
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldLabel {
    #[default]
    Optional,
    Required,
    Repeated,
}

/// Wire variant of a field
///
/// Unknown spellings are kept verbatim in `Other` so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldVariant {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Bool,
    String,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sint32,
    Sint64,
    Other(String),
}

impl FieldVariant {
    /// Wire spelling, e.g. "INT64"
    pub fn as_str(&self) -> &str {
        match self {
            FieldVariant::Double => "DOUBLE",
            FieldVariant::Float => "FLOAT",
            FieldVariant::Int64 => "INT64",
            FieldVariant::Uint64 => "UINT64",
            FieldVariant::Int32 => "INT32",
            FieldVariant::Bool => "BOOL",
            FieldVariant::String => "STRING",
            FieldVariant::Message => "MESSAGE",
            FieldVariant::Bytes => "BYTES",
            FieldVariant::Uint32 => "UINT32",
            FieldVariant::Enum => "ENUM",
            FieldVariant::Sint32 => "SINT32",
            FieldVariant::Sint64 => "SINT64",
            FieldVariant::Other(s) => s,
        }
    }
}

impl From<String> for FieldVariant {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DOUBLE" => FieldVariant::Double,
            "FLOAT" => FieldVariant::Float,
            "INT64" => FieldVariant::Int64,
            "UINT64" => FieldVariant::Uint64,
            "INT32" => FieldVariant::Int32,
            "BOOL" => FieldVariant::Bool,
            "STRING" => FieldVariant::String,
            "MESSAGE" => FieldVariant::Message,
            "BYTES" => FieldVariant::Bytes,
            "UINT32" => FieldVariant::Uint32,
            "ENUM" => FieldVariant::Enum,
            "SINT32" => FieldVariant::Sint32,
            "SINT64" => FieldVariant::Sint64,
            _ => FieldVariant::Other(s),
        }
    }
}

impl From<FieldVariant> for String {
    fn from(variant: FieldVariant) -> Self {
        variant.as_str().to_string()
    }
}

impl fmt::Display for FieldVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
