//! Structural type descriptions consumed by the code generator.
//!
//! A schema is a tree of [`AttributeExpr`] nodes, each carrying a
//! [`DataType`]. Named types ([`UserTypeExpr`], [`MediaTypeExpr`]) are shared
//! through `Arc` so that duplicating a response never deep-copies a type
//! definition. Recursive schemas refer back to a named type with
//! [`DataType::Reference`], which is resolved through a [`TypeRegistry`].

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use strum::{Display, EnumIter, EnumString};

/// Built-in scalar kinds.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use tailor_define::Primitive;
///
/// assert_eq!(Primitive::from_str("string").unwrap(), Primitive::String);
/// assert_eq!(Primitive::DateTime.to_string(), "datetime");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Integer,
    Number,
    String,
    DateTime,
    Uuid,
    Bytes,
    Any,
}

/// Ordered field map of an object type.
///
/// Declaration order is preserved so that generated code is deterministic.
pub type Object = IndexMap<String, AttributeExpr>;

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    /// A scalar value.
    Primitive(Primitive),
    /// An anonymous (inline) object.
    Object(Object),
    /// A sequence of elements.
    Array(Box<ArrayType>),
    /// A key/value mapping.
    Map(Box<MapType>),
    /// A named type with its own generated transformation method.
    UserType(Arc<UserTypeExpr>),
    /// A named type that also renders as an HTTP media type.
    MediaType(Arc<MediaTypeExpr>),
    /// A by-name reference to a type registered in a [`TypeRegistry`].
    Reference(String),
}

impl DataType {
    /// Shorthand for an array of the given element type.
    pub fn array_of(elem: impl Into<AttributeExpr>) -> Self {
        Self::Array(Box::new(ArrayType { elem: elem.into() }))
    }

    /// Shorthand for a map from `key` to `elem`.
    pub fn map_of(key: impl Into<AttributeExpr>, elem: impl Into<AttributeExpr>) -> Self {
        Self::Map(Box::new(MapType {
            key: key.into(),
            elem: elem.into(),
        }))
    }

    /// Shorthand for a reference to a registered type.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Returns the name of the type if it is named (user type, media type or
    /// reference).
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::UserType(ut) => Some(&ut.name),
            Self::MediaType(mt) => Some(&mt.name),
            Self::Reference(name) => Some(name),
            _ => None,
        }
    }
}

impl From<Primitive> for DataType {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<Arc<UserTypeExpr>> for DataType {
    fn from(ut: Arc<UserTypeExpr>) -> Self {
        Self::UserType(ut)
    }
}

impl From<Arc<MediaTypeExpr>> for DataType {
    fn from(mt: Arc<MediaTypeExpr>) -> Self {
        Self::MediaType(mt)
    }
}

/// Element type of an array.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayType {
    pub elem: AttributeExpr,
}

/// Key and element types of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: AttributeExpr,
    pub elem: AttributeExpr,
}

/// A schema node: a type plus the metadata attached to it.
///
/// When the type is an object, `required` lists the fields that must be
/// present. Any other field is optional and is represented by a pointer in
/// both the private and the public generated structs.
///
/// ## Examples
///
/// ```
/// use tailor_define::{AttributeExpr, DataType, Primitive};
///
/// let att = AttributeExpr::object([
///     ("name", AttributeExpr::from(Primitive::String)),
///     ("vintage", AttributeExpr::from(Primitive::Integer)),
/// ])
/// .require(["name"]);
///
/// assert!(att.is_required("name"));
/// assert!(!att.is_required("vintage"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeExpr {
    pub data_type: DataType,
    pub description: Option<String>,
    pub required: Vec<String>,
}

impl AttributeExpr {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            description: None,
            required: Vec::new(),
        }
    }

    /// Creates an inline object attribute from `(name, attribute)` pairs.
    pub fn object<I, N>(fields: I) -> Self
    where
        I: IntoIterator<Item = (N, AttributeExpr)>,
        N: Into<String>,
    {
        Self::new(DataType::Object(
            fields.into_iter().map(|(n, a)| (n.into(), a)).collect(),
        ))
    }

    /// Marks the given fields as required.
    pub fn require<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.required.contains(&name) {
                self.required.push(name);
            }
        }
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|r| r == field)
    }

    /// Returns the fields of an inline object type.
    pub fn fields(&self) -> Option<&Object> {
        match &self.data_type {
            DataType::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Default for AttributeExpr {
    fn default() -> Self {
        Self::new(DataType::Object(Object::new()))
    }
}

impl From<DataType> for AttributeExpr {
    fn from(data_type: DataType) -> Self {
        Self::new(data_type)
    }
}

impl From<Primitive> for AttributeExpr {
    fn from(p: Primitive) -> Self {
        Self::new(DataType::Primitive(p))
    }
}

/// A named type defined in the design.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTypeExpr {
    pub name: String,
    pub attribute: AttributeExpr,
}

impl UserTypeExpr {
    pub fn new(name: impl Into<String>, attribute: AttributeExpr) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            attribute,
        })
    }
}

/// A named type that describes an HTTP response body, identified by its
/// media type identifier (e.g. `application/vnd.bottle`).
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTypeExpr {
    pub name: String,
    pub identifier: String,
    pub attribute: AttributeExpr,
}

impl MediaTypeExpr {
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        attribute: AttributeExpr,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            identifier: identifier.into(),
            attribute,
        })
    }
}

/// Named types known to the design, keyed by type name.
///
/// Iteration is in name order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, DataType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_user_type(&mut self, ut: Arc<UserTypeExpr>) {
        self.types.insert(ut.name.clone(), DataType::UserType(ut));
    }

    pub fn register_media_type(&mut self, mt: Arc<MediaTypeExpr>) {
        self.types.insert(mt.name.clone(), DataType::MediaType(mt));
    }

    /// Registers an alias. The aliased type may itself be a reference.
    pub fn register_alias(&mut self, name: impl Into<String>, data_type: DataType) {
        self.types.insert(name.into(), data_type);
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    /// Finds a registered media type by its identifier.
    pub fn media_type_by_identifier(&self, identifier: &str) -> Option<&Arc<MediaTypeExpr>> {
        self.types.values().find_map(|dt| match dt {
            DataType::MediaType(mt) if mt.identifier == identifier => Some(mt),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn primitive_display_is_lowercase() {
        assert_eq!(Primitive::Boolean.to_string(), "boolean");
        assert_eq!(Primitive::Uuid.to_string(), "uuid");
        assert!(Primitive::from_str("String").is_err());
        assert_eq!(Primitive::iter().count(), 8);
    }

    #[test]
    fn require_ignores_duplicates() {
        let att = AttributeExpr::object([("a", AttributeExpr::from(Primitive::String))])
            .require(["a", "a"]);
        assert_eq!(att.required, vec!["a".to_string()]);
    }

    #[test]
    fn registry_finds_media_type_by_identifier() {
        let mut registry = TypeRegistry::new();
        let bottle = MediaTypeExpr::new(
            "BottleMedia",
            "application/vnd.bottle",
            AttributeExpr::default(),
        );
        registry.register_media_type(bottle.clone());
        registry.register_user_type(UserTypeExpr::new("Account", AttributeExpr::default()));

        let found = registry
            .media_type_by_identifier("application/vnd.bottle")
            .expect("media type should be registered");
        assert_eq!(found.name, "BottleMedia");
        assert!(registry.media_type_by_identifier("text/plain").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn registry_iterates_in_name_order() {
        let mut registry = TypeRegistry::new();
        registry.register_alias("Zeta", DataType::Primitive(Primitive::String));
        registry.register_alias("Alpha", DataType::Primitive(Primitive::Integer));
        let names: Vec<_> = registry.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
