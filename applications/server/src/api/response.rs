/// Success half of the response envelope
use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

/// Header set on responses served from the cache
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// `{status: "success", message?, data?}`
#[derive(Debug, Serialize)]
pub struct Envelope {
    #[serde(skip)]
    code: StatusCode,
    #[serde(skip)]
    from_cache: bool,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl Envelope {
    /// 200 with data
    pub fn ok(data: Value) -> Self {
        Self {
            code: StatusCode::OK,
            from_cache: false,
            status: "success",
            message: None,
            data: Some(data),
        }
    }

    /// 201 with a message and data
    pub fn created(message: impl Into<String>, data: Value) -> Self {
        Self {
            code: StatusCode::CREATED,
            from_cache: false,
            status: "success",
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// 200 with only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK,
            from_cache: false,
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the status code
    pub fn with_code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    /// Mark the payload as served from the cache
    pub fn cached(mut self, from_cache: bool) -> Self {
        self.from_cache = from_cache;
        self
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let mut response = (self.code, Json(&self)).into_response();
        if self.from_cache {
            response
                .headers_mut()
                .insert(DATA_SOURCE_HEADER, HeaderValue::from_static("cache"));
        }
        response
    }
}
