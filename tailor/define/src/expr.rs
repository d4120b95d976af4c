//! Design expressions: responses, the scopes that own them, and the root.

use std::collections::HashMap;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::types::{AttributeExpr, DataType, TypeRegistry};

/// Status codes with a built-in default response.
///
/// Each default response carries only its status code. Using the name in a
/// scope (e.g. `response("NotFound", vec![])`) duplicates it.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use tailor_define::StandardResponse;
///
/// assert_eq!(StandardResponse::Ok.to_string(), "OK");
/// assert_eq!(StandardResponse::from_str("NotFound").unwrap().status(), 404);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum StandardResponse {
    Continue,
    SwitchingProtocols,
    #[strum(serialize = "OK")]
    Ok,
    Created,
    Accepted,
    NonAuthoritativeInfo,
    NoContent,
    ResetContent,
    PartialContent,
    MultipleChoices,
    MovedPermanently,
    Found,
    SeeOther,
    NotModified,
    UseProxy,
    TemporaryRedirect,
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthRequired,
    RequestTimeout,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    RequestEntityTooLarge,
    RequestURITooLong,
    UnsupportedMediaType,
    RequestedRangeNotSatisfiable,
    ExpectationFailed,
    Teapot,
    UnprocessableEntity,
    InternalServerError,
    NotImplemented,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
    HTTPVersionNotSupported,
}

impl StandardResponse {
    pub fn status(&self) -> u16 {
        match self {
            Self::Continue => 100,
            Self::SwitchingProtocols => 101,
            Self::Ok => 200,
            Self::Created => 201,
            Self::Accepted => 202,
            Self::NonAuthoritativeInfo => 203,
            Self::NoContent => 204,
            Self::ResetContent => 205,
            Self::PartialContent => 206,
            Self::MultipleChoices => 300,
            Self::MovedPermanently => 301,
            Self::Found => 302,
            Self::SeeOther => 303,
            Self::NotModified => 304,
            Self::UseProxy => 305,
            Self::TemporaryRedirect => 307,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::PaymentRequired => 402,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::NotAcceptable => 406,
            Self::ProxyAuthRequired => 407,
            Self::RequestTimeout => 408,
            Self::Conflict => 409,
            Self::Gone => 410,
            Self::LengthRequired => 411,
            Self::PreconditionFailed => 412,
            Self::RequestEntityTooLarge => 413,
            Self::RequestURITooLong => 414,
            Self::UnsupportedMediaType => 415,
            Self::RequestedRangeNotSatisfiable => 416,
            Self::ExpectationFailed => 417,
            Self::Teapot => 418,
            Self::UnprocessableEntity => 422,
            Self::InternalServerError => 500,
            Self::NotImplemented => 501,
            Self::BadGateway => 502,
            Self::ServiceUnavailable => 503,
            Self::GatewayTimeout => 504,
            Self::HTTPVersionNotSupported => 505,
        }
    }
}

/// Identifies the scope a response is attached to.
///
/// This is a lookup key, not an owning pointer: scopes own their responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeRef {
    Resource(String),
    Action { resource: String, action: String },
}

/// One named HTTP response definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseExpr {
    /// Unique within the owning scope.
    pub name: String,
    pub status: u16,
    /// Media type identifier; empty when unset.
    pub media_type: String,
    /// Overrides the body type implied by the media type.
    pub body_type: Option<DataType>,
    /// Header attributes, an object keyed by header name.
    pub headers: AttributeExpr,
    pub description: Option<String>,
    /// True when derived unmodified from a built-in default response.
    pub standard: bool,
    pub parent: Option<ScopeRef>,
}

impl ResponseExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: 0,
            media_type: String::new(),
            body_type: None,
            headers: AttributeExpr::default(),
            description: None,
            standard: false,
            parent: None,
        }
    }

    /// Copies the response so that later changes to the copy never affect
    /// the original. The copy is detached from any scope.
    pub fn dup(&self) -> Self {
        Self {
            name: self.name.clone(),
            status: self.status,
            media_type: self.media_type.clone(),
            body_type: self.body_type.clone(),
            headers: self.headers.clone(),
            description: self.description.clone(),
            standard: self.standard,
            parent: None,
        }
    }

    /// Names of the declared headers in declaration order.
    pub fn header_names(&self) -> Vec<&str> {
        self.headers
            .fields()
            .map(|f| f.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// A definition that owns responses.
pub trait ResponseScope {
    fn responses(&self) -> &[ResponseExpr];

    fn responses_mut(&mut self) -> &mut Vec<ResponseExpr>;

    fn scope_ref(&self) -> ScopeRef;

    fn response(&self, name: &str) -> Option<&ResponseExpr> {
        self.responses().iter().find(|r| r.name == name)
    }

    fn is_defined(&self, name: &str) -> bool {
        self.response(name).is_some()
    }
}

/// A single operation of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionExpr {
    pub name: String,
    /// Name of the resource this action belongs to.
    pub resource: String,
    pub responses: Vec<ResponseExpr>,
}

impl ActionExpr {
    pub fn new(name: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            responses: Vec::new(),
        }
    }
}

impl ResponseScope for ActionExpr {
    fn responses(&self) -> &[ResponseExpr] {
        &self.responses
    }

    fn responses_mut(&mut self) -> &mut Vec<ResponseExpr> {
        &mut self.responses
    }

    fn scope_ref(&self) -> ScopeRef {
        ScopeRef::Action {
            resource: self.resource.clone(),
            action: self.name.clone(),
        }
    }
}

/// A group of actions sharing a default media type.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceExpr {
    pub name: String,
    /// Default media type identifier; empty when unset.
    pub media_type: String,
    pub actions: Vec<ActionExpr>,
    pub responses: Vec<ResponseExpr>,
}

impl ResourceExpr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type: String::new(),
            actions: Vec::new(),
            responses: Vec::new(),
        }
    }

    pub fn action(&self, name: &str) -> Option<&ActionExpr> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Gives every 200 response of the resource and its actions that has no
    /// media type the resource's default media type.
    ///
    /// Runs once the resource block has completed, so the position of
    /// `default_media` within the block does not matter.
    pub fn fill_default_media(&mut self) {
        if self.media_type.is_empty() {
            return;
        }
        let action_responses = self.actions.iter_mut().flat_map(|a| a.responses.iter_mut());
        for resp in self.responses.iter_mut().chain(action_responses) {
            if resp.status == 200 && resp.media_type.is_empty() {
                resp.media_type = self.media_type.clone();
            }
        }
    }
}

impl ResponseScope for ResourceExpr {
    fn responses(&self) -> &[ResponseExpr] {
        &self.responses
    }

    fn responses_mut(&mut self) -> &mut Vec<ResponseExpr> {
        &mut self.responses
    }

    fn scope_ref(&self) -> ScopeRef {
        ScopeRef::Resource(self.name.clone())
    }
}

/// The design root: named types, user-defined responses, the built-in
/// default responses and every resource.
#[derive(Debug, Clone)]
pub struct Root {
    pub types: TypeRegistry,
    /// Responses defined at the design level, duplicated into scopes that
    /// use the same name.
    pub responses: Vec<ResponseExpr>,
    pub resources: Vec<ResourceExpr>,
    default_responses: HashMap<String, ResponseExpr>,
}

impl Root {
    pub fn new() -> Self {
        Self::with_types(TypeRegistry::new())
    }

    pub fn with_types(types: TypeRegistry) -> Self {
        let default_responses = StandardResponse::iter()
            .map(|s| {
                let mut resp = ResponseExpr::new(s.to_string());
                resp.status = s.status();
                (resp.name.clone(), resp)
            })
            .collect();
        Self {
            types,
            responses: Vec::new(),
            resources: Vec::new(),
            default_responses,
        }
    }

    /// Looks up a user-defined response.
    pub fn response(&self, name: &str) -> Option<&ResponseExpr> {
        self.responses.iter().find(|r| r.name == name)
    }

    /// Looks up a built-in default response.
    pub fn default_response(&self, name: &str) -> Option<&ResponseExpr> {
        self.default_responses.get(name)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceExpr> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Finds the response attached to the given scope.
    pub fn scope_response(&self, scope: &ScopeRef, name: &str) -> Option<&ResponseExpr> {
        match scope {
            ScopeRef::Resource(resource) => self.resource(resource)?.response(name),
            ScopeRef::Action { resource, action } => {
                self.resource(resource)?.action(action)?.response(name)
            }
        }
    }
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}
