//! Template rendering for generated Go statements.
//!
//! Every piece of emitted text goes through a named handlebars template.
//! The synthesizer only picks a [`TemplateId`] and builds the data context;
//! this module turns the pair into text.
//!
//! The registry runs in strict mode, so a context missing a field the
//! template uses is reported as [`GeneratorError::TemplateRender`] rather
//! than rendered as an empty string. Output is never HTML-escaped.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::errors::GeneratorError;

/// Templates known to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TemplateId {
    /// Direct (optionally dereferencing) assignment.
    Simple,
    /// Assignment from the value's own `Publicize` method.
    Delegate,
    /// Allocation of an inline struct followed by its field copies.
    Object,
    /// Nil check around an optional field copy.
    Guard,
    /// Allocation of a slice and a loop over its elements.
    Array,
    /// Allocation of a map and a loop over its entries.
    Map,
    /// A complete `Publicize` method.
    Method,
}

impl TemplateId {
    /// Template source for this id.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Simple => {
                "{{tabs depth}}{{target}} {{#if init}}:{{/if}}= {{#if dereference}}*{{/if}}{{source}}"
            }
            Self::Delegate => "{{tabs depth}}{{target}} {{#if init}}:{{/if}}= {{source}}.Publicize()",
            Self::Object => {
                "{{tabs depth}}{{target}} {{#if init}}:{{/if}}= &{{type_def}}{}{{#if fields}}\n{{fields}}{{/if}}"
            }
            Self::Guard => "{{tabs depth}}if {{source}} != nil {\n{{body}}\n{{tabs depth}}}",
            Self::Array => concat!(
                "{{tabs depth}}{{target}} {{#if init}}:{{/if}}= make({{type_ref}}, len({{source}}))\n",
                "{{tabs depth}}for {{index}}, {{elem}} := range {{source}} {\n",
                "{{body}}\n",
                "{{tabs depth}}}"
            ),
            Self::Map => concat!(
                "{{tabs depth}}{{target}} {{#if init}}:{{/if}}= make({{type_ref}}, len({{source}}))\n",
                "{{tabs depth}}for {{key}}, {{value}} := range {{source}} {\n",
                "{{key_body}}\n",
                "{{value_body}}\n",
                "{{tabs depth}}\t{{target}}[{{pub_key}}] = {{pub_value}}\n",
                "{{tabs depth}}}"
            ),
            Self::Method => concat!(
                "// Publicize creates {{public}} from {{private}}\n",
                "func (ut *{{private}}) Publicize() *{{public}} {\n",
                "\tvar pub {{public}}\n",
                "{{#if fields}}{{fields}}\n{{/if}}",
                "\treturn &pub\n",
                "}"
            ),
        }
    }
}

/// Renders [`TemplateId`] templates against serializable contexts.
///
/// ## Examples
///
/// ```
/// use serde_json::json;
/// use tailor_gen::render::{TemplateId, TemplateRenderer};
///
/// let renderer = TemplateRenderer::new().unwrap();
/// let text = renderer
///     .render(
///         TemplateId::Simple,
///         &json!({"depth": 1, "target": "pub.Name", "source": "ut.Name", "init": false, "dereference": true}),
///     )
///     .unwrap();
/// assert_eq!(text, "\tpub.Name = *ut.Name");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with every built-in template registered.
    pub fn new() -> Result<Self, GeneratorError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("tabs", Box::new(tabs_helper));

        let mut renderer = Self { handlebars };
        for id in TemplateId::iter() {
            renderer.register(id, id.source())?;
        }
        Ok(renderer)
    }

    /// Replaces the template registered for `id`.
    pub fn with_template(mut self, id: TemplateId, source: &str) -> Result<Self, GeneratorError> {
        self.register(id, source)?;
        Ok(self)
    }

    /// Renders the template `id` with `data` as its context.
    pub fn render<T: Serialize>(&self, id: TemplateId, data: &T) -> Result<String, GeneratorError> {
        self.handlebars
            .render(&id.to_string(), data)
            .map_err(|e| GeneratorError::TemplateRender {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }

    fn register(&mut self, id: TemplateId, source: &str) -> Result<(), GeneratorError> {
        self.handlebars
            .register_template_string(&id.to_string(), source)
            .map_err(|e| GeneratorError::TemplateRegistration {
                id: id.to_string(),
                reason: e.to_string(),
            })
    }
}

// Handlebars helpers

fn tabs_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let depth = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    out.write(&"\t".repeat(depth as usize))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn simple(init: bool, dereference: bool) -> serde_json::Value {
        json!({
            "depth": 0,
            "target": "pub.ID",
            "source": "ut.ID",
            "init": init,
            "dereference": dereference,
        })
    }

    #[test]
    fn template_ids_are_snake_case() {
        assert_eq!(TemplateId::Simple.to_string(), "simple");
        assert_eq!(TemplateId::iter().count(), 7);
    }

    #[test]
    fn simple_assignment_forms() {
        let r = TemplateRenderer::new().unwrap();
        assert_eq!(r.render(TemplateId::Simple, &simple(false, false)).unwrap(), "pub.ID = ut.ID");
        assert_eq!(r.render(TemplateId::Simple, &simple(true, false)).unwrap(), "pub.ID := ut.ID");
        assert_eq!(r.render(TemplateId::Simple, &simple(false, true)).unwrap(), "pub.ID = *ut.ID");
    }

    #[test]
    fn output_is_not_html_escaped() {
        let r = TemplateRenderer::new().unwrap();
        let text = r
            .render(
                TemplateId::Delegate,
                &json!({"depth": 2, "target": "m[k0]", "source": "v0", "init": false}),
            )
            .unwrap();
        assert_eq!(text, "\t\tm[k0] = v0.Publicize()");
    }

    #[test]
    fn guard_wraps_body() {
        let r = TemplateRenderer::new().unwrap();
        let text = r
            .render(
                TemplateId::Guard,
                &json!({"depth": 1, "source": "ut.Name", "body": "\t\tpub.Name = ut.Name"}),
            )
            .unwrap();
        assert_eq!(text, "\tif ut.Name != nil {\n\t\tpub.Name = ut.Name\n\t}");
    }

    #[test]
    fn missing_context_field_is_a_render_error() {
        let r = TemplateRenderer::new().unwrap();
        let err = r
            .render(TemplateId::Simple, &json!({"depth": 0, "target": "x"}))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateRender { ref id, .. } if id == "simple"));
    }

    #[test]
    fn malformed_template_is_a_registration_error() {
        let err = TemplateRenderer::new()
            .unwrap()
            .with_template(TemplateId::Guard, "{{#if source}}unclosed")
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateRegistration { ref id, .. } if id == "guard"));
    }
}
