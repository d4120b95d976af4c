//! Shared fixtures for tailor-gen unit tests.

use std::sync::Arc;

use tailor_define::{AttributeExpr, DataType, MediaTypeExpr, Primitive, TypeRegistry, UserTypeExpr};

/// `Account` user type with a required `id` and an optional `name`.
pub fn account_type() -> Arc<UserTypeExpr> {
    UserTypeExpr::new(
        "Account",
        AttributeExpr::object([
            ("id", AttributeExpr::from(Primitive::Integer)),
            ("name", AttributeExpr::from(Primitive::String)),
        ])
        .require(["id"]),
    )
}

/// `BottleMedia` media type owned by an account.
pub fn bottle_media() -> Arc<MediaTypeExpr> {
    MediaTypeExpr::new(
        "BottleMedia",
        "application/vnd.bottle",
        AttributeExpr::object([
            ("id", AttributeExpr::from(Primitive::Integer)),
            ("name", AttributeExpr::from(Primitive::String)),
            ("account", AttributeExpr::from(DataType::reference("Account"))),
            ("ratings", AttributeExpr::from(DataType::array_of(Primitive::Integer))),
        ])
        .require(["id", "name", "account"]),
    )
}

/// Registry holding [`account_type`] and [`bottle_media`].
pub fn cellar_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_user_type(account_type());
    registry.register_media_type(bottle_media());
    registry
}
