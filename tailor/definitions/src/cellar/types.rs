//! Cellar payload types.

use std::sync::Arc;

use tailor_define::{AttributeExpr, DataType, MediaTypeExpr, Primitive, TypeRegistry, UserTypeExpr};

/// Media type identifier of [`bottle_media`].
pub const BOTTLE_MEDIA_TYPE: &str = "application/vnd.bottle";

/// Media type identifier of the account resource.
pub const ACCOUNT_MEDIA_TYPE: &str = "application/vnd.account";

/// The owner of a cellar.
pub fn account() -> Arc<UserTypeExpr> {
    UserTypeExpr::new(
        "Account",
        AttributeExpr::object([
            ("id", AttributeExpr::from(Primitive::Integer)),
            ("name", AttributeExpr::from(Primitive::String)),
            ("created_at", AttributeExpr::from(Primitive::DateTime)),
            (
                "labels",
                AttributeExpr::from(DataType::map_of(Primitive::String, Primitive::String)),
            ),
        ])
        .require(["id", "name"]),
    )
}

/// A wine category. Categories nest, so the type refers to itself by name.
pub fn category() -> Arc<UserTypeExpr> {
    UserTypeExpr::new(
        "Category",
        AttributeExpr::object([
            ("name", AttributeExpr::from(Primitive::String)),
            (
                "subcategories",
                AttributeExpr::from(DataType::array_of(DataType::reference("Category"))),
            ),
        ])
        .require(["name"]),
    )
}

/// The bottle representation returned by the bottle resource.
pub fn bottle_media() -> Arc<MediaTypeExpr> {
    let origin = AttributeExpr::object([
        ("country", AttributeExpr::from(Primitive::String)),
        ("region", AttributeExpr::from(Primitive::String)),
    ])
    .require(["country"]);

    MediaTypeExpr::new(
        "BottleMedia",
        BOTTLE_MEDIA_TYPE,
        AttributeExpr::object([
            ("id", AttributeExpr::from(Primitive::Integer)),
            ("name", AttributeExpr::from(Primitive::String)),
            ("vintage", AttributeExpr::from(Primitive::Integer)),
            ("account", AttributeExpr::from(DataType::reference("Account"))),
            ("category", AttributeExpr::from(DataType::reference("Category"))),
            ("origin", origin),
            (
                "ratings",
                AttributeExpr::from(DataType::array_of(Primitive::Integer)),
            ),
            (
                "reviewers",
                AttributeExpr::from(DataType::map_of(
                    Primitive::String,
                    DataType::reference("Account"),
                )),
            ),
        ])
        .require(["id", "name", "account"]),
    )
}

/// Every named type of the cellar design.
pub fn cellar_types() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_user_type(account());
    registry.register_user_type(category());
    registry.register_media_type(bottle_media());
    registry.register_alias("BottleCollection", DataType::array_of(DataType::reference("BottleMedia")));
    registry
}
