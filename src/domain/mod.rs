pub mod descriptor;
pub mod error;
pub mod widget;

pub use descriptor::{
    EnumDescriptor, EnumValueDescriptor, FieldDescriptor, FieldLabel, FieldVariant, FileDescriptor,
    FileSet, MessageDescriptor, MethodDescriptor, ServiceDescriptor,
};
pub use error::{FormError, FormResult, LookupKind};
pub use widget::{FieldRender, FormOutcome, WidgetCategory, WidgetKind, WidgetSpec};
