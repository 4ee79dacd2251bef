//! Descriptor-driven form generation
//!
//! Builds the request form for one method of a protorpc service:
//! - `resolver`: resolves services, methods and messages by fully qualified name
//! - `policy`: maps each field to a text widget or an unsupported marker
//! - `builder`: drives both and returns the ordered render instructions

pub mod builder;
pub mod policy;
pub mod resolver;

pub use builder::{build_form, FormBuilder, FormSettings, VOID_MESSAGE_TYPE};
pub use policy::widget_for;
pub use resolver::{get_method, list_methods, MethodEntry, PackageMatch, SchemaIndex};
