//! Structural classification of schema nodes.
//!
//! Named types are unwrapped to the structural shape they describe before a
//! predicate is applied. Unwrapping is iterative: every reference name
//! visited is recorded, and visiting one twice is reported as a cycle
//! instead of looping.

use std::collections::HashSet;

use crate::errors::EvalError;
use crate::types::{ArrayType, DataType, MapType, Object, TypeRegistry};

/// Follows [`DataType::Reference`] links until a non-reference type is
/// reached.
///
/// ## Errors
///
/// Returns [`EvalError::UnresolvableReference`] for a name missing from the
/// registry or a reference chain that loops back on itself.
pub fn resolve<'a>(
    data_type: &'a DataType,
    registry: &'a TypeRegistry,
) -> Result<&'a DataType, EvalError> {
    let mut current = data_type;
    let mut seen: HashSet<&'a str> = HashSet::new();
    while let DataType::Reference(name) = current {
        if !seen.insert(name.as_str()) {
            return Err(EvalError::UnresolvableReference {
                name: name.clone(),
                reason: "reference cycle".to_string(),
            });
        }
        current = registry
            .get(name)
            .ok_or_else(|| EvalError::UnresolvableReference {
                name: name.clone(),
                reason: "no type with this name is registered".to_string(),
            })?;
    }
    Ok(current)
}

/// Unwraps references and named types down to the structural type they
/// describe (primitive, object, array or map).
pub fn shape<'a>(
    data_type: &'a DataType,
    registry: &'a TypeRegistry,
) -> Result<&'a DataType, EvalError> {
    let mut current = data_type;
    let mut seen: HashSet<&'a str> = HashSet::new();
    loop {
        current = match current {
            DataType::Reference(_) => resolve(current, registry)?,
            DataType::UserType(ut) => {
                enter(&mut seen, &ut.name)?;
                &ut.attribute.data_type
            }
            DataType::MediaType(mt) => {
                enter(&mut seen, &mt.name)?;
                &mt.attribute.data_type
            }
            structural => return Ok(structural),
        };
    }
}

fn enter<'a>(seen: &mut HashSet<&'a str>, name: &'a str) -> Result<(), EvalError> {
    if seen.insert(name) {
        Ok(())
    } else {
        Err(EvalError::UnresolvableReference {
            name: name.to_string(),
            reason: "type is defined in terms of itself".to_string(),
        })
    }
}

pub fn is_primitive(data_type: &DataType, registry: &TypeRegistry) -> bool {
    matches!(shape(data_type, registry), Ok(DataType::Primitive(_)))
}

pub fn is_object(data_type: &DataType, registry: &TypeRegistry) -> bool {
    as_object(data_type, registry).is_some()
}

pub fn is_array(data_type: &DataType, registry: &TypeRegistry) -> bool {
    as_array(data_type, registry).is_some()
}

pub fn is_map(data_type: &DataType, registry: &TypeRegistry) -> bool {
    as_map(data_type, registry).is_some()
}

pub fn as_object<'a>(data_type: &'a DataType, registry: &'a TypeRegistry) -> Option<&'a Object> {
    match shape(data_type, registry) {
        Ok(DataType::Object(fields)) => Some(fields),
        _ => None,
    }
}

pub fn as_array<'a>(data_type: &'a DataType, registry: &'a TypeRegistry) -> Option<&'a ArrayType> {
    match shape(data_type, registry) {
        Ok(DataType::Array(array)) => Some(array),
        _ => None,
    }
}

pub fn as_map<'a>(data_type: &'a DataType, registry: &'a TypeRegistry) -> Option<&'a MapType> {
    match shape(data_type, registry) {
        Ok(DataType::Map(map)) => Some(map),
        _ => None,
    }
}

/// Returns true when values of this type have their own generated
/// `Publicize` method: the type is, or references, a user or media type
/// whose attribute is declared as an object.
///
/// Aliases of inline objects and named types wrapping another reference
/// have no method of their own; their values are copied field by field.
pub fn has_own_method(data_type: &DataType, registry: &TypeRegistry) -> bool {
    let named = match data_type {
        DataType::Reference(_) => match resolve(data_type, registry) {
            Ok(named) => named,
            Err(_) => return false,
        },
        other => other,
    };
    match named {
        DataType::UserType(ut) => matches!(ut.attribute.data_type, DataType::Object(_)),
        DataType::MediaType(mt) => matches!(mt.attribute.data_type, DataType::Object(_)),
        _ => false,
    }
}

/// Returns the fields and required list of an object that is copied inline,
/// following aliases and named types without a method of their own.
///
/// Returns `None` when the type has its own method or is not an object. An
/// object reached through an alias has no required list.
pub fn as_inline_object<'a>(
    data_type: &'a DataType,
    required: &'a [String],
    registry: &'a TypeRegistry,
) -> Option<(&'a Object, &'a [String])> {
    let mut current = (data_type, required);
    let mut seen: HashSet<&'a str> = HashSet::new();
    loop {
        let (dt, required) = current;
        current = match dt {
            DataType::Object(fields) => return Some((fields, required)),
            _ if has_own_method(dt, registry) => return None,
            DataType::Reference(_) => (resolve(dt, registry).ok()?, &[] as &[String]),
            DataType::UserType(ut) => {
                enter(&mut seen, &ut.name).ok()?;
                (&ut.attribute.data_type, ut.attribute.required.as_slice())
            }
            DataType::MediaType(mt) => {
                enter(&mut seen, &mt.name).ok()?;
                (&mt.attribute.data_type, mt.attribute.required.as_slice())
            }
            _ => return None,
        };
    }
}
