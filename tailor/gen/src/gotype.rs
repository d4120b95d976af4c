//! Go type expressions for schema nodes.
//!
//! The publicizer needs type expressions when it allocates values: the
//! element type of a `make([]T, n)`, or the anonymous struct of an inline
//! object. Types with their own `Publicize` method render as pointers to
//! their exported name. Every other object, including aliases of inline
//! objects, renders as an anonymous struct whose optional primitive fields
//! are pointers.

use tailor_define::classify::{as_inline_object, has_own_method, is_primitive, resolve};
use tailor_define::{AttributeExpr, DataType, EvalError, Object, Primitive, TypeRegistry};

use crate::errors::GeneratorError;
use crate::naming::exported_name;

/// Go spelling of a primitive type.
pub fn primitive_name(p: Primitive) -> &'static str {
    match p {
        Primitive::Boolean => "bool",
        Primitive::Integer => "int",
        Primitive::Number => "float64",
        Primitive::String => "string",
        Primitive::DateTime => "time.Time",
        Primitive::Uuid => "uuid.UUID",
        Primitive::Bytes => "[]byte",
        Primitive::Any => "interface{}",
    }
}

/// Renders a reference to the type of `att`, e.g. `[]*Bottle` or
/// `map[string]int`.
///
/// `depth` is the indentation level of the line the reference appears on,
/// used when an inline struct has to be spelled out.
///
/// ## Examples
///
/// ```
/// use tailor_define::{AttributeExpr, DataType, Primitive, TypeRegistry};
/// use tailor_gen::gotype::type_ref;
///
/// let att = AttributeExpr::from(DataType::map_of(Primitive::String, DataType::array_of(Primitive::Integer)));
/// assert_eq!(type_ref(&att, &TypeRegistry::new(), 0).unwrap(), "map[string][]int");
/// ```
pub fn type_ref(
    att: &AttributeExpr,
    registry: &TypeRegistry,
    depth: usize,
) -> Result<String, GeneratorError> {
    let mut visiting = Vec::new();
    go_type(&att.data_type, &att.required, registry, depth, &mut visiting)
}

/// Renders the definition of an object copied inline (an anonymous struct),
/// or the type reference for anything else.
pub fn type_def(
    att: &AttributeExpr,
    registry: &TypeRegistry,
    depth: usize,
) -> Result<String, GeneratorError> {
    match as_inline_object(&att.data_type, &att.required, registry) {
        Some((fields, required)) => {
            let mut visiting = Vec::new();
            struct_def(fields, required, registry, depth, &mut visiting)
        }
        None => type_ref(att, registry, depth),
    }
}

fn go_type(
    data_type: &DataType,
    required: &[String],
    registry: &TypeRegistry,
    depth: usize,
    visiting: &mut Vec<String>,
) -> Result<String, GeneratorError> {
    let name = match data_type {
        DataType::Primitive(p) => return Ok(primitive_name(*p).to_string()),
        DataType::Object(fields) => {
            return Ok(format!("*{}", struct_def(fields, required, registry, depth, visiting)?));
        }
        DataType::Array(array) => {
            let elem = go_type(&array.elem.data_type, &array.elem.required, registry, depth, visiting)?;
            return Ok(format!("[]{elem}"));
        }
        DataType::Map(map) => {
            let key = go_type(&map.key.data_type, &map.key.required, registry, depth, visiting)?;
            let elem = go_type(&map.elem.data_type, &map.elem.required, registry, depth, visiting)?;
            return Ok(format!("map[{key}]{elem}"));
        }
        DataType::UserType(ut) => ut.name.as_str(),
        DataType::MediaType(mt) => mt.name.as_str(),
        DataType::Reference(name) => name.as_str(),
    };

    if has_own_method(data_type, registry) {
        let owner = resolve(data_type, registry)?.name().unwrap_or(name);
        return Ok(format!("*{}", exported_name(owner, true)));
    }
    if visiting.iter().any(|v| v == name) {
        return Err(EvalError::UnresolvableReference {
            name: name.to_string(),
            reason: "type is defined in terms of itself".to_string(),
        }
        .into());
    }

    visiting.push(name.to_string());
    let rendered = match as_inline_object(data_type, required, registry) {
        Some((fields, required)) => {
            format!("*{}", struct_def(fields, required, registry, depth, visiting)?)
        }
        None => {
            let (target, required) = match data_type {
                DataType::UserType(ut) => (&ut.attribute.data_type, ut.attribute.required.as_slice()),
                DataType::MediaType(mt) => (&mt.attribute.data_type, mt.attribute.required.as_slice()),
                _ => (resolve(data_type, registry)?, &[] as &[String]),
            };
            go_type(target, required, registry, depth, visiting)?
        }
    };
    visiting.pop();
    Ok(rendered)
}

fn struct_def(
    fields: &Object,
    required: &[String],
    registry: &TypeRegistry,
    depth: usize,
    visiting: &mut Vec<String>,
) -> Result<String, GeneratorError> {
    let indent = "\t".repeat(depth + 1);
    let mut lines = vec!["struct {".to_string()];
    for (name, field) in fields {
        let is_required = required.iter().any(|r| r == name);
        let mut ty = go_type(
            &field.data_type,
            &field.required,
            registry,
            depth + 1,
            visiting,
        )?;
        if !is_required && is_primitive(&field.data_type, registry) {
            ty.insert(0, '*');
        }
        let omit = if is_required { "" } else { ",omitempty" };
        lines.push(format!(
            "{indent}{} {ty} `form:\"{name}{omit}\" json:\"{name}{omit}\"`",
            exported_name(name, true)
        ));
    }
    lines.push(format!("{}}}", "\t".repeat(depth)));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_define::UserTypeExpr;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry.register_user_type(UserTypeExpr::new(
            "bottle",
            AttributeExpr::object([("name", AttributeExpr::from(Primitive::String))]),
        ));
        registry.register_alias("Tags", DataType::array_of(Primitive::String));
        registry.register_alias(
            "Inline",
            AttributeExpr::object([("a", AttributeExpr::from(Primitive::Integer))]).data_type,
        );
        registry.register_alias("Nested", DataType::array_of(DataType::reference("Nested")));
        registry
    }

    #[test]
    fn primitives_use_go_names() {
        let reg = TypeRegistry::new();
        let att = AttributeExpr::from(Primitive::Number);
        assert_eq!(type_ref(&att, &reg, 0).unwrap(), "float64");
        assert_eq!(primitive_name(Primitive::Any), "interface{}");
    }

    #[test]
    fn named_types_are_pointers_to_exported_names() {
        let reg = registry();
        let att = AttributeExpr::from(DataType::array_of(DataType::reference("bottle")));
        assert_eq!(type_ref(&att, &reg, 0).unwrap(), "[]*Bottle");
    }

    #[test]
    fn aliases_render_their_target() {
        let reg = registry();
        let tags = AttributeExpr::from(DataType::reference("Tags"));
        assert_eq!(type_ref(&tags, &reg, 0).unwrap(), "[]string");
        let inline = AttributeExpr::from(DataType::reference("Inline"));
        assert_eq!(
            type_ref(&inline, &reg, 0).unwrap(),
            "*struct {\n\tA *int `form:\"a,omitempty\" json:\"a,omitempty\"`\n}"
        );
        assert_eq!(
            type_def(&inline, &reg, 0).unwrap(),
            "struct {\n\tA *int `form:\"a,omitempty\" json:\"a,omitempty\"`\n}"
        );
    }

    #[test]
    fn named_type_wrapping_an_alias_renders_the_alias_shape() {
        let mut reg = registry();
        reg.register_user_type(UserTypeExpr::new(
            "Wrapper",
            AttributeExpr::from(DataType::reference("Inline")),
        ));
        let att = AttributeExpr::from(DataType::array_of(DataType::reference("Wrapper")));
        assert_eq!(
            type_ref(&att, &reg, 0).unwrap(),
            "[]*struct {\n\tA *int `form:\"a,omitempty\" json:\"a,omitempty\"`\n}"
        );
    }

    #[test]
    fn self_referencing_alias_is_an_error() {
        let reg = registry();
        let att = AttributeExpr::from(DataType::reference("Nested"));
        assert!(matches!(
            type_ref(&att, &reg, 0),
            Err(GeneratorError::UnresolvableReference(_))
        ));
    }

    #[test]
    fn inline_struct_marks_optional_primitives_as_pointers() {
        let reg = registry();
        let att = AttributeExpr::object([
            ("id", AttributeExpr::from(Primitive::Integer)),
            ("name", AttributeExpr::from(Primitive::String)),
            ("bottle", AttributeExpr::from(DataType::reference("bottle"))),
        ])
        .require(["id"]);

        let def = type_def(&att, &reg, 1).unwrap();
        assert_eq!(
            def,
            "struct {\n\
             \t\tID int `form:\"id\" json:\"id\"`\n\
             \t\tName *string `form:\"name,omitempty\" json:\"name,omitempty\"`\n\
             \t\tBottle *Bottle `form:\"bottle,omitempty\" json:\"bottle,omitempty\"`\n\
             \t}"
        );
        assert!(type_ref(&att, &reg, 1).unwrap().starts_with("*struct {"));
    }
}
