//! Type-directed synthesis of publicize code.
//!
//! [`Publicizer::publicize`] walks a schema node and emits the Go statements
//! that copy a value of the private representation (`source`) into the
//! public one (`target`). Dispatch is on the structural shape of the node:
//!
//! - primitives are assigned, dereferenced when the private side holds a
//!   pointer to a required value;
//! - named object types call their own generated `Publicize` method;
//! - inline objects, and aliases of them, are allocated and copied field by
//!   field, optional fields behind a nil check;
//! - arrays and maps are allocated with the runtime length of the source and
//!   filled by a loop whose variables are suffixed with the nesting depth.
//!
//! The publicizer only decides which template to render and with what
//! context. All text comes out of [`TemplateRenderer`].

use serde::Serialize;
use serde_json::{Value, json};
use tailor_define::classify::{as_inline_object, has_own_method, is_primitive, shape};
use tailor_define::{AttributeExpr, DataType, Object, TypeRegistry};
use tracing::debug;

use crate::errors::GeneratorError;
use crate::gotype::{type_def, type_ref};
use crate::naming::exported_name;
use crate::render::{TemplateId, TemplateRenderer};

/// Nesting depth past which synthesis gives up.
///
/// Only a schema that loops back on itself through anonymous arrays or maps
/// gets this deep.
pub const MAX_DEPTH: usize = 64;

/// Render context shared by every publicize template.
#[derive(Debug, Clone, Serialize)]
pub struct PublicizeContext {
    pub source: String,
    pub target: String,
    pub depth: usize,
    /// Dereference the source (private pointer to a required value).
    pub dereference: bool,
    /// First assignment of `target`, rendered in `:=` form.
    pub init: bool,
}

impl PublicizeContext {
    /// Context data for a template, with template-specific fields merged in.
    fn data(&self, id: TemplateId, extras: Value) -> Result<Value, GeneratorError> {
        let mut data = serde_json::to_value(self).map_err(|e| GeneratorError::TemplateRender {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        if let (Value::Object(base), Value::Object(extras)) = (&mut data, extras) {
            base.extend(extras);
        }
        Ok(data)
    }
}

/// Emits publicize code for schema nodes of one type registry.
///
/// ## Examples
///
/// ```
/// use tailor_define::{AttributeExpr, DataType, Primitive, TypeRegistry};
/// use tailor_gen::publicizer::Publicizer;
///
/// let registry = TypeRegistry::new();
/// let publicizer = Publicizer::new(&registry).unwrap();
/// let att = AttributeExpr::from(DataType::array_of(Primitive::String));
///
/// let code = publicizer.publicize(&att, "ut.Tags", "pub.Tags", false, 0, false).unwrap();
/// assert_eq!(
///     code,
///     "pub.Tags = make([]string, len(ut.Tags))\nfor i0, elem0 := range ut.Tags {\n\tpub.Tags[i0] = elem0\n}"
/// );
/// ```
#[derive(Debug)]
pub struct Publicizer<'a> {
    renderer: TemplateRenderer,
    registry: &'a TypeRegistry,
}

impl<'a> Publicizer<'a> {
    pub fn new(registry: &'a TypeRegistry) -> Result<Self, GeneratorError> {
        Ok(Self::with_renderer(registry, TemplateRenderer::new()?))
    }

    pub fn with_renderer(registry: &'a TypeRegistry, renderer: TemplateRenderer) -> Self {
        Self { renderer, registry }
    }

    /// Emits the statements copying `source` into `target`.
    ///
    /// Every emitted line is indented by `depth` tabs.
    ///
    /// ## Errors
    ///
    /// - [`GeneratorError::UnresolvableReference`] for dangling or cyclic
    ///   references.
    /// - [`GeneratorError::TemplateRender`] when a template fails.
    /// - [`GeneratorError::RecursionLimit`] when nesting exceeds
    ///   [`MAX_DEPTH`].
    pub fn publicize(
        &self,
        att: &AttributeExpr,
        source: &str,
        target: &str,
        dereference: bool,
        depth: usize,
        init: bool,
    ) -> Result<String, GeneratorError> {
        if depth > MAX_DEPTH {
            return Err(GeneratorError::RecursionLimit {
                target: target.to_string(),
                depth: MAX_DEPTH,
            });
        }
        let ctx = PublicizeContext {
            source: source.to_string(),
            target: target.to_string(),
            depth,
            dereference,
            init,
        };

        let data_type = &att.data_type;
        match shape(data_type, self.registry)? {
            DataType::Primitive(_) => {
                debug!(var = target, depth, dispatch = "primitive", "publicizing");
                self.render(TemplateId::Simple, &ctx, json!({}))
            }
            DataType::Object(_) if has_own_method(data_type, self.registry) => {
                debug!(var = target, depth, dispatch = "delegate", "publicizing");
                self.render(TemplateId::Delegate, &ctx, json!({}))
            }
            DataType::Object(fields) => {
                debug!(var = target, depth, dispatch = "object", fields = fields.len(), "publicizing");
                let (fields, required) = as_inline_object(data_type, &att.required, self.registry)
                    .unwrap_or((fields, &[] as &[String]));
                self.publicize_object(att, fields, required, &ctx)
            }
            DataType::Array(array) => {
                debug!(var = target, depth, dispatch = "array", "publicizing");
                self.publicize_array(att, &array.elem, &ctx)
            }
            DataType::Map(map) => {
                debug!(var = target, depth, dispatch = "map", "publicizing");
                self.publicize_map(att, &map.key, &map.elem, &ctx)
            }
            // shape() unwraps every named variant, so this arm is never taken.
            other @ (DataType::UserType(_) | DataType::MediaType(_) | DataType::Reference(_)) => {
                Err(GeneratorError::UnsupportedType {
                    target: target.to_string(),
                    type_name: other.name().unwrap_or_default().to_string(),
                })
            }
        }
    }

    /// Emits one copy per field of `object`, in declaration order.
    ///
    /// Optional fields are guarded by a nil check on the source field.
    /// Required primitive fields are dereferenced.
    pub fn publicize_fields(
        &self,
        object: &Object,
        required: &[String],
        source: &str,
        target: &str,
        depth: usize,
    ) -> Result<String, GeneratorError> {
        let mut parts = Vec::with_capacity(object.len());
        for (name, field) in object {
            let field_name = exported_name(name, true);
            let field_source = format!("{source}.{field_name}");
            let field_target = format!("{target}.{field_name}");
            let part = if required.iter().any(|r| r == name) {
                let deref = is_primitive(&field.data_type, self.registry);
                self.publicize(field, &field_source, &field_target, deref, depth, false)?
            } else {
                let body =
                    self.publicize(field, &field_source, &field_target, false, depth + 1, false)?;
                let guard = PublicizeContext {
                    source: field_source,
                    target: field_target,
                    depth,
                    dereference: false,
                    init: false,
                };
                self.render(TemplateId::Guard, &guard, json!({ "body": body }))?
            };
            parts.push(part);
        }
        Ok(parts.join("\n"))
    }

    /// Emits the complete `Publicize` method of a named object type.
    ///
    /// The method converts the private struct (`name` unexported) to the
    /// public one (`name` exported).
    pub fn publicize_method(
        &self,
        name: &str,
        attribute: &AttributeExpr,
    ) -> Result<String, GeneratorError> {
        let DataType::Object(object) = &attribute.data_type else {
            return Err(GeneratorError::UnsupportedType {
                target: name.to_string(),
                type_name: attribute.data_type.name().unwrap_or("non-object").to_string(),
            });
        };
        let fields = self.publicize_fields(object, &attribute.required, "ut", "pub", 1)?;
        let data = json!({
            "private": exported_name(name, false),
            "public": exported_name(name, true),
            "fields": fields,
        });
        self.renderer.render(TemplateId::Method, &data)
    }

    fn publicize_object(
        &self,
        att: &AttributeExpr,
        fields: &Object,
        required: &[String],
        ctx: &PublicizeContext,
    ) -> Result<String, GeneratorError> {
        let body = self.publicize_fields(fields, required, &ctx.source, &ctx.target, ctx.depth)?;
        let extras = json!({
            "type_def": type_def(att, self.registry, ctx.depth)?,
            "fields": body,
        });
        self.render(TemplateId::Object, ctx, extras)
    }

    fn publicize_array(
        &self,
        att: &AttributeExpr,
        elem: &AttributeExpr,
        ctx: &PublicizeContext,
    ) -> Result<String, GeneratorError> {
        let index = format!("i{}", ctx.depth);
        let elem_var = format!("elem{}", ctx.depth);
        let elem_target = format!("{}[{}]", ctx.target, index);
        let elem_ctx = PublicizeContext {
            source: elem_var.clone(),
            target: elem_target,
            depth: ctx.depth + 1,
            dereference: false,
            init: false,
        };
        // Primitive elements are copied as is, without dispatching on them.
        let body = if is_primitive(&elem.data_type, self.registry) {
            self.render(TemplateId::Simple, &elem_ctx, json!({}))?
        } else {
            self.publicize(
                elem,
                &elem_ctx.source,
                &elem_ctx.target,
                false,
                elem_ctx.depth,
                false,
            )?
        };
        let extras = json!({
            "type_ref": type_ref(att, self.registry, ctx.depth)?,
            "index": index,
            "elem": elem_var,
            "body": body,
        });
        self.render(TemplateId::Array, ctx, extras)
    }

    fn publicize_map(
        &self,
        att: &AttributeExpr,
        key: &AttributeExpr,
        elem: &AttributeExpr,
        ctx: &PublicizeContext,
    ) -> Result<String, GeneratorError> {
        if is_primitive(&key.data_type, self.registry) && is_primitive(&elem.data_type, self.registry)
        {
            return self.render(TemplateId::Simple, ctx, json!({}));
        }
        let depth = ctx.depth;
        let key_var = format!("k{depth}");
        let value_var = format!("v{depth}");
        let pub_key = format!("pubk{depth}");
        let pub_value = format!("pubv{depth}");
        let key_body = self.publicize(key, &key_var, &pub_key, false, depth + 1, true)?;
        let value_body = self.publicize(elem, &value_var, &pub_value, false, depth + 1, true)?;
        let extras = json!({
            "type_ref": type_ref(att, self.registry, depth)?,
            "key": key_var,
            "value": value_var,
            "key_body": key_body,
            "value_body": value_body,
            "pub_key": pub_key,
            "pub_value": pub_value,
        });
        self.render(TemplateId::Map, ctx, extras)
    }

    fn render(
        &self,
        id: TemplateId,
        ctx: &PublicizeContext,
        extras: Value,
    ) -> Result<String, GeneratorError> {
        let data = ctx.data(id, extras)?;
        self.renderer.render(id, &data)
    }
}
