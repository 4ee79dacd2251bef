//! HTML rendering of method forms
//!
//! Turns render instructions into an HTML form using Tera templates. Toggle
//! state is presentation-only: it never reaches the descriptors or the
//! widget specs, it only decides the `disabled` attribute at render time.

use serde::Serialize;
use std::collections::HashSet;
use tera::{Context, Tera};

use crate::domain::widget::{FieldRender, FormOutcome, WidgetSpec};
use crate::form::MethodEntry;

/// Toggle value that enables an optional field
pub const TOGGLE_ON: &str = "on";

/// Whether a widget is enabled given the state of its toggle.
///
/// Widgets without a toggle keep their initial state. For toggled widgets
/// only `"on"` enables; any other state, or none, disables.
pub fn field_enabled(spec: &WidgetSpec, toggle_state: Option<&str>) -> bool {
    if !spec.toggle {
        return spec.initially_enabled;
    }
    toggle_state == Some(TOGGLE_ON)
}

const FORM_TEMPLATE: &str = r#"<form action="{{ action }}" method="POST" class="protoform">
  <input type="hidden" name="response_format" value="text/plain">
{%- for field in fields %}
{%- if field.message %}
  <p class="warning">{{ field.message }}</p>
{%- else %}
  <div class="field field-{{ field.category }}">
    <label for="field-{{ field.name }}">{{ field.label }}</label>
{%- if field.toggle %}
    <input type="checkbox" class="toggle" data-field="{{ field.name }}"{% if field.enabled %} checked{% endif %}>
{%- endif %}
    <input type="text" id="field-{{ field.name }}" name="{{ field.name }}" value="{{ field.value }}"{% if not field.enabled %} disabled{% endif %}>
  </div>
{%- endif %}
{%- endfor %}
  <input type="submit" value="Send Request">
</form>
"#;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{{ title }}</title>
</head>
<body>
  <h1>{{ title }}</h1>
{%- if error %}
  <p class="error">{{ error }}</p>
{%- else %}
  {{ body | safe }}
{%- endif %}
  <script>
    document.querySelectorAll("input.toggle").forEach(function (toggle) {
      toggle.addEventListener("change", function () {
        toggle.form.elements[toggle.dataset.field].disabled = !toggle.checked;
      });
    });
  </script>
</body>
</html>
"#;

const METHODS_TEMPLATE: &str = r#"<ul class="methods">
{%- for entry in entries %}
  <li><a href="{{ entry.href }}">{{ entry.service }}.{{ entry.method }}</a> ({{ entry.request_type }})</li>
{%- endfor %}
</ul>
"#;

/// Template view of one field
#[derive(Debug, Serialize)]
struct FieldView<'a> {
    name: &'a str,
    label: &'a str,
    category: &'a str,
    value: &'a str,
    enabled: bool,
    toggle: bool,
    message: Option<&'a str>,
}

impl<'a> FieldView<'a> {
    fn new(render: &'a FieldRender, toggles_on: &HashSet<String>) -> Self {
        match render {
            FieldRender::Widget(spec) => {
                let state = toggles_on.contains(&spec.field_name).then_some(TOGGLE_ON);
                FieldView {
                    name: &spec.field_name,
                    label: &spec.label,
                    category: spec.category.as_str(),
                    value: spec.default_value.as_deref().unwrap_or_default(),
                    enabled: field_enabled(spec, state),
                    toggle: spec.toggle,
                    message: None,
                }
            }
            FieldRender::Unsupported {
                field_name,
                message,
            } => FieldView {
                name: field_name,
                label: field_name,
                category: "",
                value: "",
                enabled: false,
                toggle: false,
                message: Some(message),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct EntryView<'a> {
    service: &'a str,
    method: &'a str,
    request_type: &'a str,
    href: String,
}

pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("form.html", FORM_TEMPLATE),
            ("page.html", PAGE_TEMPLATE),
            ("methods.html", METHODS_TEMPLATE),
        ])?;
        Ok(Self { tera })
    }

    /// Render the `<form>` element for a method.
    ///
    /// `action` is the URL the form posts to. Fields named in `toggles_on`
    /// have their toggle switched on. A void request renders a form with
    /// only the submit button.
    pub fn render_form(
        &self,
        action: &str,
        outcome: &FormOutcome,
        toggles_on: &HashSet<String>,
    ) -> Result<String, tera::Error> {
        let fields: Vec<FieldView> = outcome
            .fields()
            .iter()
            .map(|render| FieldView::new(render, toggles_on))
            .collect();

        let mut context = Context::new();
        context.insert("action", action);
        context.insert("fields", &fields);
        self.tera.render("form.html", &context)
    }

    /// Wrap a rendered body in a full page
    pub fn render_page(&self, title: &str, body: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("body", body);
        context.insert("error", &Option::<String>::None);
        self.tera.render("page.html", &context)
    }

    /// A page carrying a single error message in place of the form
    pub fn render_error_page(&self, title: &str, message: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("body", "");
        context.insert("error", message);
        self.tera.render("page.html", &context)
    }

    /// Links to the form of every method; `link` maps an entry to its URL
    pub fn render_methods<F>(&self, entries: &[MethodEntry], link: F) -> Result<String, tera::Error>
    where
        F: Fn(&MethodEntry) -> String,
    {
        let entries: Vec<EntryView> = entries
            .iter()
            .map(|entry| EntryView {
                service: &entry.service,
                method: &entry.method,
                request_type: &entry.request_type,
                href: link(entry),
            })
            .collect();

        let mut context = Context::new();
        context.insert("entries", &entries);
        self.tera.render("methods.html", &context)
    }
}

/// URL a method form posts to: `<service_path>.<method>`
pub fn method_action(service_path: &str, method_name: &str) -> String {
    format!("{}.{}", service_path.trim_end_matches('/'), method_name)
}
