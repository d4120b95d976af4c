//! Cellar design.
//!
//! A small wine cellar API: accounts own bottles, bottles belong to a
//! (recursive) category.
//!
//! ## Resources
//!
//! | Resource | Action | Responses                    |
//! |----------|--------|------------------------------|
//! | account  | show   | OK, NotFound                 |
//! | bottle   | list   | OK                           |
//! | bottle   | show   | OK, NotFoundWithReason       |
//! | bottle   | create | Created (with Location)      |
//! | bottle   | rate   | NoContent, NotFound          |

mod types;

pub use types::*;

use tailor_define::{DataType, Diagnostics, Evaluator, Primitive, ResponseArg, Root, dsl};

/// Evaluates the cellar design.
///
/// ## Examples
///
/// ```rust
/// use tailor_definitions::cellar::{BOTTLE_MEDIA_TYPE, define_cellar};
///
/// let root = define_cellar().unwrap();
/// let show = root.resource("bottle").unwrap().action("show").unwrap();
/// let ok = show.responses.iter().find(|r| r.name == "OK").unwrap();
/// assert_eq!(ok.status, 200);
/// assert_eq!(ok.media_type, BOTTLE_MEDIA_TYPE);
/// ```
pub fn define_cellar() -> Result<Root, Diagnostics> {
    let mut ev = Evaluator::new(Root::with_types(cellar_types()));

    ev.root_response(
        "NotFoundWithReason",
        vec![ResponseArg::block(|ev| {
            ev.status(404);
            ev.description("The resource does not exist");
            ev.headers(dsl(|ev| ev.header("X-Reason", Primitive::String)));
        })],
    );

    ev.resource(
        "account",
        dsl(|ev| {
            ev.default_media(ACCOUNT_MEDIA_TYPE);
            ev.action(
                "show",
                dsl(|ev| {
                    ev.response("OK", vec![DataType::reference("Account").into()]);
                    ev.response("NotFound", vec![]);
                }),
            );
        }),
    );

    let bottle = bottle_media();
    ev.resource(
        "bottle",
        dsl(move |ev| {
            ev.default_media(bottle.clone());
            ev.action(
                "list",
                dsl(|ev| {
                    ev.response(
                        "OK",
                        vec![
                            DataType::reference("BottleCollection").into(),
                            ResponseArg::block(|ev| ev.media("application/vnd.bottle+collection")),
                        ],
                    );
                }),
            );
            ev.action(
                "show",
                dsl(move |ev| {
                    ev.response("OK", vec![bottle.into()]);
                    ev.response("NotFoundWithReason", vec![]);
                }),
            );
            ev.action(
                "create",
                dsl(|ev| {
                    ev.response(
                        "Created",
                        vec![ResponseArg::block(|ev| {
                            ev.headers(dsl(|ev| ev.header("Location", Primitive::String)));
                        })],
                    );
                }),
            );
            ev.action(
                "rate",
                dsl(|ev| {
                    ev.response("NoContent", vec![]);
                    ev.response("NotFound", vec![]);
                }),
            );
        }),
    );

    ev.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tailor_define::ResponseScope;

    #[test]
    fn cellar_evaluates_cleanly() {
        let root = define_cellar().unwrap();
        assert_eq!(root.resources.len(), 2);
        assert_eq!(root.resource("bottle").unwrap().actions.len(), 4);
        assert_eq!(root.types.len(), 4);
    }

    #[test]
    fn account_show_inherits_resource_media_type() {
        let root = define_cellar().unwrap();
        let show = root.resource("account").unwrap().action("show").unwrap();
        let ok = show.response("OK").unwrap();
        assert_eq!(ok.media_type, ACCOUNT_MEDIA_TYPE);
        assert_eq!(ok.body_type, Some(DataType::reference("Account")));
        assert!(!ok.standard);
        let not_found = show.response("NotFound").unwrap();
        assert_eq!(not_found.status, 404);
        assert!(not_found.standard);
        assert!(not_found.media_type.is_empty());
    }

    #[test]
    fn user_response_is_duplicated_into_scope() {
        let root = define_cellar().unwrap();
        let show = root.resource("bottle").unwrap().action("show").unwrap();
        let reason = show.response("NotFoundWithReason").unwrap();
        assert_eq!(reason.status, 404);
        assert_eq!(reason.header_names(), vec!["X-Reason"]);
        assert!(reason.parent.is_some());
        assert!(root.response("NotFoundWithReason").unwrap().parent.is_none());
    }

    #[test]
    fn list_overrides_media_type_in_block() {
        let root = define_cellar().unwrap();
        let list = root.resource("bottle").unwrap().action("list").unwrap();
        let ok = list.response("OK").unwrap();
        assert_eq!(ok.media_type, "application/vnd.bottle+collection");
        assert_eq!(ok.body_type, Some(DataType::reference("BottleCollection")));
    }

    #[test]
    fn created_carries_location_header() {
        let root = define_cellar().unwrap();
        let create = root.resource("bottle").unwrap().action("create").unwrap();
        let created = create.response("Created").unwrap();
        assert_eq!(created.status, 201);
        assert_eq!(created.header_names(), vec!["Location"]);
        assert!(created.media_type.is_empty());
    }
}
