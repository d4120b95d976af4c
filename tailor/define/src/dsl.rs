//! Design DSL operations.
//!
//! Every operation is a method on [`Evaluator`] that applies to the
//! definition on top of the evaluation stack:
//!
//! | Operation                  | Valid in             |
//! |----------------------------|----------------------|
//! | [`resource`]               | design root          |
//! | [`root_response`]          | design root          |
//! | [`action`]                 | resource             |
//! | [`default_media`]          | resource             |
//! | [`response`]               | resource, action     |
//! | [`status`], [`media`]      | response             |
//! | [`description`]            | response             |
//! | [`headers`]                | response             |
//! | [`header`]                 | headers              |
//!
//! [`resource`]: Evaluator::resource
//! [`root_response`]: Evaluator::root_response
//! [`action`]: Evaluator::action
//! [`default_media`]: Evaluator::default_media
//! [`response`]: Evaluator::response
//! [`status`]: Evaluator::status
//! [`media`]: Evaluator::media
//! [`description`]: Evaluator::description
//! [`headers`]: Evaluator::headers
//! [`header`]: Evaluator::header

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::classify::resolve;
use crate::errors::EvalError;
use crate::eval::{Definition, Dsl, Evaluator};
use crate::expr::{ActionExpr, ResourceExpr, ResponseExpr};
use crate::types::{AttributeExpr, DataType, MediaTypeExpr};

/// One positional argument of [`Evaluator::response`].
pub enum ResponseArg {
    /// A response template parameter. Template parameters are not
    /// supported, so any of these fails the definition.
    Str(String),
    /// The response body type.
    Type(DataType),
    /// A media type identifier used as the body type token.
    Media(String),
    /// The configuration block. Only valid as the last argument.
    Dsl(Dsl),
}

impl ResponseArg {
    pub fn block(block: impl FnOnce(&mut Evaluator) + 'static) -> Self {
        Self::Dsl(Box::new(block))
    }

    pub fn media(identifier: impl Into<String>) -> Self {
        Self::Media(identifier.into())
    }

    fn is_body_token(&self) -> bool {
        matches!(self, Self::Type(_) | Self::Media(_))
    }
}

impl fmt::Debug for ResponseArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Type(dt) => match dt.name() {
                Some(name) => write!(f, "type {}", name),
                None => write!(f, "anonymous type"),
            },
            Self::Media(id) => write!(f, "media {:?}", id),
            Self::Dsl(_) => write!(f, "DSL block"),
        }
    }
}

impl From<&str> for ResponseArg {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<DataType> for ResponseArg {
    fn from(dt: DataType) -> Self {
        Self::Type(dt)
    }
}

impl From<Arc<MediaTypeExpr>> for ResponseArg {
    fn from(mt: Arc<MediaTypeExpr>) -> Self {
        Self::Type(DataType::MediaType(mt))
    }
}

impl From<Dsl> for ResponseArg {
    fn from(block: Dsl) -> Self {
        Self::Dsl(block)
    }
}

/// Media type given by identifier or by definition.
#[derive(Debug, Clone)]
pub enum MediaArg {
    Identifier(String),
    Type(Arc<MediaTypeExpr>),
}

impl MediaArg {
    pub fn identifier(&self) -> &str {
        match self {
            Self::Identifier(id) => id,
            Self::Type(mt) => &mt.identifier,
        }
    }
}

impl From<&str> for MediaArg {
    fn from(s: &str) -> Self {
        Self::Identifier(s.to_string())
    }
}

impl From<String> for MediaArg {
    fn from(s: String) -> Self {
        Self::Identifier(s)
    }
}

impl From<Arc<MediaTypeExpr>> for MediaArg {
    fn from(mt: Arc<MediaTypeExpr>) -> Self {
        Self::Type(mt)
    }
}

enum BodyToken {
    Type(DataType),
    Media(String),
}

struct ResponseArgs {
    block: Option<Dsl>,
    body: Option<BodyToken>,
}

/// Splits positional arguments into block, body token and template
/// parameters, from the right: the block must be last, the body token
/// first, and anything in between is a template parameter.
fn parse_response_args(name: &str, mut args: Vec<ResponseArg>) -> Result<ResponseArgs, EvalError> {
    let block = match args.pop() {
        Some(ResponseArg::Dsl(block)) => Some(block),
        Some(other) => {
            args.push(other);
            None
        }
        None => None,
    };

    let body = if args.first().is_some_and(ResponseArg::is_body_token) {
        match args.remove(0) {
            ResponseArg::Type(dt) => Some(BodyToken::Type(dt)),
            ResponseArg::Media(id) => Some(BodyToken::Media(id)),
            _ => None,
        }
    } else {
        None
    };

    let mut params = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            ResponseArg::Str(s) => params.push(s),
            other => {
                return Err(EvalError::InvalidTemplateArgument {
                    response: name.to_string(),
                    reason: format!(
                        "invalid response template parameter {:?}, must be a string",
                        other
                    ),
                });
            }
        }
    }
    if !params.is_empty() {
        return Err(EvalError::InvalidTemplateArgument {
            response: name.to_string(),
            reason: format!(
                "no response template named {:?} accepts parameters {:?}",
                name, params
            ),
        });
    }

    Ok(ResponseArgs { block, body })
}

impl Evaluator {
    /// Defines a response in the active resource or action.
    ///
    /// The response starts as a copy of the user-defined response with the
    /// same name, or of the built-in default response with that name, or as
    /// an empty response. The configuration block (if any) then runs against
    /// it, and the body token (if any) sets its body type. A 200 response
    /// left without a media type inherits the resource's default media type
    /// when the resource block completes.
    ///
    /// Failures are reported as diagnostics and leave the scope untouched.
    ///
    /// ## Examples
    ///
    /// ```
    /// use tailor_define::prelude::*;
    ///
    /// let bottle = MediaTypeExpr::new("BottleMedia", "application/vnd.bottle", AttributeExpr::default());
    /// let mut types = TypeRegistry::new();
    /// types.register_media_type(bottle.clone());
    ///
    /// let mut ev = Evaluator::new(Root::with_types(types));
    /// ev.resource("bottle", dsl(move |ev| {
    ///     ev.action("create", dsl(move |ev| {
    ///         ev.response("OK", vec![bottle.into()]);
    ///         ev.response("Created", vec![ResponseArg::block(|ev| ev.status(201))]);
    ///     }));
    /// }));
    ///
    /// let root = ev.finish().unwrap();
    /// let create = root.resource("bottle").unwrap().action("create").unwrap();
    /// assert_eq!(create.responses[0].media_type, "application/vnd.bottle");
    /// assert_eq!(create.responses[1].status, 201);
    /// ```
    pub fn response(&mut self, name: impl Into<String>, args: Vec<ResponseArg>) {
        let name = name.into();
        let Some(scope) = self.current().and_then(Definition::as_scope) else {
            self.incompatible("response", "resource or action");
            return;
        };
        if scope.is_defined(&name) {
            self.report_error(EvalError::DuplicateDefinition {
                kind: "response",
                name,
            });
            return;
        }

        let Some(mut resp) = self.build_response(&name, args) else {
            return;
        };

        if let Some(scope) = self.stack.last_mut().and_then(Definition::as_scope_mut) {
            resp.parent = Some(scope.scope_ref());
            debug!(
                response = %resp.name,
                status = resp.status,
                media_type = %resp.media_type,
                "defined response"
            );
            scope.responses_mut().push(resp);
        }
    }

    /// Defines a design-level response that scopes can reuse by name.
    pub fn root_response(&mut self, name: impl Into<String>, args: Vec<ResponseArg>) {
        let name = name.into();
        if self.current().is_some() {
            self.incompatible("root_response", "design root");
            return;
        }
        if self.root.response(&name).is_some() {
            self.report_error(EvalError::DuplicateDefinition {
                kind: "response",
                name,
            });
            return;
        }
        if let Some(resp) = self.build_response(&name, args) {
            self.root.responses.push(resp);
        }
    }

    fn build_response(&mut self, name: &str, args: Vec<ResponseArg>) -> Option<ResponseExpr> {
        let args = match parse_response_args(name, args) {
            Ok(args) => args,
            Err(err) => {
                self.report_error(err);
                return None;
            }
        };

        let mut resp = if let Some(user) = self.root.response(name) {
            user.dup()
        } else if let Some(standard) = self.root.default_response(name) {
            let mut resp = standard.dup();
            resp.standard = true;
            resp
        } else {
            ResponseExpr::new(name)
        };

        if let Some(block) = args.block {
            match self.execute(block, Definition::Response(resp)) {
                Some((Definition::Response(configured), true)) => resp = configured,
                _ => return None,
            }
            resp.standard = false;
        }

        match args.body {
            Some(BodyToken::Type(dt)) => {
                match resolve(&dt, &self.root.types) {
                    Ok(DataType::MediaType(mt)) => resp.media_type = mt.identifier.clone(),
                    Ok(_) => {}
                    Err(err) => {
                        self.report_error(err);
                        return None;
                    }
                }
                resp.body_type = Some(dt);
                resp.standard = false;
            }
            Some(BodyToken::Media(identifier)) => {
                resp.body_type = self
                    .root
                    .types
                    .media_type_by_identifier(&identifier)
                    .cloned()
                    .map(DataType::MediaType);
                resp.media_type = identifier;
                resp.standard = false;
            }
            None => {}
        }

        Some(resp)
    }

    /// Sets the status code of the active response.
    pub fn status(&mut self, code: u16) {
        match self.stack.last_mut() {
            Some(Definition::Response(resp)) => resp.status = code,
            _ => self.incompatible("status", "response"),
        }
    }

    /// Sets the media type identifier of the active response.
    pub fn media(&mut self, media: impl Into<MediaArg>) {
        let media = media.into();
        match self.stack.last_mut() {
            Some(Definition::Response(resp)) => resp.media_type = media.identifier().to_string(),
            _ => self.incompatible("media", "response"),
        }
    }

    /// Sets the description of the active response.
    pub fn description(&mut self, text: impl Into<String>) {
        match self.stack.last_mut() {
            Some(Definition::Response(resp)) => resp.description = Some(text.into()),
            _ => self.incompatible("description", "response"),
        }
    }

    /// Runs `block` to declare the headers of the active response.
    pub fn headers(&mut self, block: Dsl) {
        let headers = match self.stack.last_mut() {
            Some(Definition::Response(resp)) => std::mem::take(&mut resp.headers),
            _ => {
                self.incompatible("headers", "response");
                return;
            }
        };
        // On failure the response is discarded anyway, so the headers are
        // not restored.
        if let Some((Definition::Headers(headers), _)) =
            self.execute(block, Definition::Headers(headers))
            && let Some(Definition::Response(resp)) = self.stack.last_mut()
        {
            resp.headers = headers;
        }
    }

    /// Declares a header of the active headers block.
    pub fn header(&mut self, name: impl Into<String>, data_type: impl Into<DataType>) {
        let name = name.into();
        let result = match self.stack.last_mut() {
            Some(Definition::Headers(AttributeExpr {
                data_type: DataType::Object(fields),
                ..
            })) => {
                if fields.contains_key(&name) {
                    Err(EvalError::DuplicateDefinition {
                        kind: "header",
                        name,
                    })
                } else {
                    fields.insert(name, AttributeExpr::new(data_type.into()));
                    Ok(())
                }
            }
            _ => {
                self.incompatible("header", "headers");
                return;
            }
        };
        if let Err(err) = result {
            self.report_error(err);
        }
    }

    /// Defines a resource at the design root.
    pub fn resource(&mut self, name: impl Into<String>, block: Dsl) {
        let name = name.into();
        if self.current().is_some() {
            self.incompatible("resource", "design root");
            return;
        }
        if self.root.resource(&name).is_some() {
            self.report_error(EvalError::DuplicateDefinition {
                kind: "resource",
                name,
            });
            return;
        }
        if let Some((Definition::Resource(mut resource), _)) =
            self.execute(block, Definition::Resource(ResourceExpr::new(name)))
        {
            resource.fill_default_media();
            self.root.resources.push(resource);
        }
    }

    /// Defines an action of the active resource.
    pub fn action(&mut self, name: impl Into<String>, block: Dsl) {
        let name = name.into();
        let resource = match self.current() {
            Some(Definition::Resource(r)) => {
                if r.action(&name).is_some() {
                    self.report_error(EvalError::DuplicateDefinition {
                        kind: "action",
                        name,
                    });
                    return;
                }
                r.name.clone()
            }
            _ => {
                self.incompatible("action", "resource");
                return;
            }
        };
        if let Some((Definition::Action(action), _)) =
            self.execute(block, Definition::Action(ActionExpr::new(name, resource)))
            && let Some(Definition::Resource(r)) = self.stack.last_mut()
        {
            r.actions.push(action);
        }
    }

    /// Sets the default media type of the active resource.
    pub fn default_media(&mut self, media: impl Into<MediaArg>) {
        let media = media.into();
        match self.stack.last_mut() {
            Some(Definition::Resource(r)) => r.media_type = media.identifier().to_string(),
            _ => self.incompatible("default_media", "resource"),
        }
    }
}
