//! Message templates rendered with `minijinja`.
//!
//! Every template has a built-in body. A templates directory may override any
//! of them with a `<name>.md` file; missing files keep the built-in body.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use minijinja::Environment;
use serde_json::Value;
use std::collections::HashMap;
use std::io;

use crate::sync::ports::{MessageRenderer, RenderError, TemplateName};

const MISSING_LABELS: &str = include_str!("builtin/missing_labels.md");
const PROBLEM_CREATED: &str = include_str!("builtin/problem_created.md");
const FEATURE_CREATED: &str = include_str!("builtin/feature_created.md");
const PR_STATUS_CHANGED: &str = include_str!("builtin/pr_status_changed.md");

/// Template bodies keyed by name.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    bodies: HashMap<TemplateName, String>,
}

impl TemplateCatalog {
    /// Creates a catalog holding only the built-in bodies.
    #[must_use]
    pub fn builtin() -> Self {
        let bodies = TemplateName::ALL
            .into_iter()
            .map(|name| (name, builtin_body(name).to_owned()))
            .collect();
        Self { bodies }
    }

    /// Creates a catalog whose built-in bodies are replaced by any
    /// `<name>.md` file found in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Load`] when the directory cannot be opened or an
    /// existing override cannot be read as UTF-8 text.
    pub fn with_overrides(dir: &Utf8Path) -> Result<Self, RenderError> {
        let root = Dir::open_ambient_dir(dir, ambient_authority()).map_err(|err| {
            RenderError::Load {
                name: dir.to_string(),
                reason: err.to_string(),
            }
        })?;
        let mut catalog = Self::builtin();
        for name in TemplateName::ALL {
            let file_name = format!("{name}.md");
            match root.read_to_string(&file_name) {
                Ok(body) => {
                    tracing::debug!(template = %name, "using template override");
                    catalog.bodies.insert(name, body);
                }
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => {
                    return Err(RenderError::Load {
                        name: file_name,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(catalog)
    }

    /// Returns the body registered for a template.
    #[must_use]
    pub fn body(&self, template: TemplateName) -> Option<&str> {
        self.bodies.get(&template).map(String::as_str)
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MessageRenderer for TemplateCatalog {
    fn render(&self, template: TemplateName, data: &Value) -> Result<String, RenderError> {
        let body = self
            .body(template)
            .ok_or(RenderError::UnknownTemplate(template))?;
        Environment::new()
            .render_str(body, data)
            .map_err(|err| RenderError::Render {
                template,
                reason: err.to_string(),
            })
    }
}

const fn builtin_body(name: TemplateName) -> &'static str {
    match name {
        TemplateName::MissingLabels => MISSING_LABELS,
        TemplateName::ProblemCreated => PROBLEM_CREATED,
        TemplateName::FeatureCreated => FEATURE_CREATED,
        TemplateName::PrStatusChanged => PR_STATUS_CHANGED,
    }
}
