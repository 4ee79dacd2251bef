//! Form construction for a single service method

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::policy::widget_for;
use super::resolver::{get_method, PackageMatch, SchemaIndex};
use crate::domain::descriptor::{FileSet, MessageDescriptor};
use crate::domain::error::FormResult;
use crate::domain::widget::{FieldRender, FormOutcome};

/// Request type that needs no form
pub const VOID_MESSAGE_TYPE: &str = "protorpc.message_types.VoidMessage";

fn default_void_message_type() -> String {
    VOID_MESSAGE_TYPE.to_string()
}

/// Settings injected into the form builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Fully qualified name of the void request message
    #[serde(default = "default_void_message_type")]
    pub void_message_type: String,
    #[serde(default)]
    pub package_match: PackageMatch,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            void_message_type: default_void_message_type(),
            package_match: PackageMatch::default(),
        }
    }
}

/// One render instruction per field, in declaration order
pub fn build_form(request_message: &MessageDescriptor) -> Vec<FieldRender> {
    request_message.fields.iter().map(widget_for).collect()
}

#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    settings: FormSettings,
}

impl FormBuilder {
    pub fn new(settings: FormSettings) -> Self {
        Self { settings }
    }

    pub fn index<'a>(&self, schema: &'a FileSet) -> SchemaIndex<'a> {
        SchemaIndex::with_package_match(schema, self.settings.package_match)
    }

    /// Resolve `service_name`/`method_name` and build the request form.
    ///
    /// Any failed lookup aborts the render. A void request yields
    /// `FormOutcome::Empty`.
    pub fn render_method_form(
        &self,
        schema: &FileSet,
        service_name: &str,
        method_name: &str,
    ) -> FormResult<FormOutcome> {
        let index = self.index(schema);
        let service = index.find_service(service_name)?;
        let method = get_method(service, method_name)?;

        if method.request_type == self.settings.void_message_type {
            debug!(service_name, method_name, "void request, no form needed");
            return Ok(FormOutcome::Empty);
        }

        let request_message = index.find_message(&method.request_type)?;
        let fields = build_form(request_message);
        info!(
            service_name,
            method_name,
            request_type = %method.request_type,
            fields = fields.len(),
            unsupported = fields.iter().filter(|f| f.is_unsupported()).count(),
            "built method form"
        );

        Ok(FormOutcome::Fields(fields))
    }
}
