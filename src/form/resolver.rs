//! Name resolution against a file set
//!
//! Resolves fully qualified names (`<package>.<local-name>`) by walking the
//! descriptor tree directly. There is no prebuilt index: every lookup is a
//! linear scan in document order, and the first match wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::descriptor::{
    FileDescriptor, FileSet, MessageDescriptor, MethodDescriptor, ServiceDescriptor,
};
use crate::domain::error::{FormError, FormResult, LookupKind};

/// Separator between package and local name
const NAME_SEPARATOR: char = '.';

// ============================================================================
// Package Matching
// ============================================================================

/// Rule deciding whether a file's package owns a fully qualified name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageMatch {
    /// Plain string prefix. `"foo"` owns `"foobar.X"`.
    #[default]
    Prefix,
    /// Prefix followed immediately by a separator. `"foo"` owns `"foo.X"` only.
    Boundary,
}

impl PackageMatch {
    pub fn matches(&self, package: &str, name: &str) -> bool {
        match self {
            PackageMatch::Prefix => name.starts_with(package),
            PackageMatch::Boundary => name
                .strip_prefix(package)
                .is_some_and(|rest| rest.starts_with(NAME_SEPARATOR)),
        }
    }
}

// ============================================================================
// Schema Index
// ============================================================================

/// Borrowed view over a file set that resolves descriptors by name
#[derive(Debug, Clone, Copy)]
pub struct SchemaIndex<'a> {
    schema: &'a FileSet,
    package_match: PackageMatch,
}

impl<'a> SchemaIndex<'a> {
    pub fn new(schema: &'a FileSet) -> Self {
        Self::with_package_match(schema, PackageMatch::default())
    }

    pub fn with_package_match(schema: &'a FileSet, package_match: PackageMatch) -> Self {
        Self {
            schema,
            package_match,
        }
    }

    /// First file, in document order, whose package owns `name`
    pub fn find_file_descriptor(&self, name: &str) -> FormResult<&'a FileDescriptor> {
        self.schema
            .files
            .iter()
            .find(|file| self.package_match.matches(&file.package, name))
            .ok_or_else(|| FormError::not_found(LookupKind::File, name))
    }

    pub fn find_message(&self, name: &str) -> FormResult<&'a MessageDescriptor> {
        let file = self.find_file_descriptor(name)?;
        let local_name = local_name(&file.package, name);
        debug!(name, local_name, package = %file.package, "resolving message");

        file.message_types
            .as_deref()
            .and_then(|messages| messages.iter().find(|m| m.name == local_name))
            .ok_or_else(|| FormError::not_found(LookupKind::Message, name))
    }

    pub fn find_service(&self, name: &str) -> FormResult<&'a ServiceDescriptor> {
        let file = self.find_file_descriptor(name)?;
        let local_name = local_name(&file.package, name);
        debug!(name, local_name, package = %file.package, "resolving service");

        file.service_types
            .as_deref()
            .and_then(|services| services.iter().find(|s| s.name == local_name))
            .ok_or_else(|| FormError::not_found(LookupKind::Service, name))
    }
}

/// Method of `service` named exactly `name`
pub fn get_method<'s>(service: &'s ServiceDescriptor, name: &str) -> FormResult<&'s MethodDescriptor> {
    service
        .methods
        .iter()
        .find(|method| method.name == name)
        .ok_or_else(|| FormError::not_found(LookupKind::Method, name))
}

/// Strip the package and the separator that follows it.
///
/// Under prefix matching the character after the package may not be a
/// separator (`"foo"` vs `"foobar.X"`); exactly one character is still dropped.
fn local_name<'n>(package: &str, name: &'n str) -> &'n str {
    let rest = &name[package.len()..];
    let mut chars = rest.chars();
    chars.next();
    chars.as_str()
}

// ============================================================================
// Catalogue
// ============================================================================

/// One invocable method in a file set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    /// Fully qualified service name
    pub service: String,
    pub method: String,
    pub request_type: String,
    pub response_type: String,
}

/// Every service method in the file set, in document order
pub fn list_methods(schema: &FileSet) -> Vec<MethodEntry> {
    schema
        .files
        .iter()
        .flat_map(|file| {
            file.service_types
                .iter()
                .flatten()
                .map(move |service| (file, service))
        })
        .flat_map(|(file, service)| {
            let service_name = qualify(&file.package, &service.name);
            service.methods.iter().map(move |method| MethodEntry {
                service: service_name.clone(),
                method: method.name.clone(),
                request_type: method.request_type.clone(),
                response_type: method.response_type.clone(),
            })
        })
        .collect()
}

fn qualify(package: &str, local_name: &str) -> String {
    if package.is_empty() {
        local_name.to_string()
    } else {
        format!("{}{}{}", package, NAME_SEPARATOR, local_name)
    }
}

// ============================================================================
// Tests
// ============================================================================
