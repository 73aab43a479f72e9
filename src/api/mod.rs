//! Proxy API Bindings
//!
//! Same-origin `fetch` calls to the server's `/tasks` proxy, organized by
//! resource.

mod tasks;

use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub use tasks::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// A request against the proxy; `body` is JSON when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn get(path: String) -> Self {
        Self { method: Method::Get, path, body: None }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
}

fn js_error(value: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", value))
}

/// Send `req` and return the raw response, whatever its status.
async fn send(req: &ApiRequest) -> Result<Response, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    if let Some(body) = &req.body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(&req.path, &opts).map_err(js_error)?;
    if req.body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    value.dyn_into::<Response>().map_err(js_error)
}

/// Send `req`; only the status code matters to the caller.
pub async fn send_for_status(req: &ApiRequest) -> Result<u16, ApiError> {
    Ok(send(req).await?.status())
}

/// Send `req` and decode a successful JSON body.
pub async fn fetch_json<T: DeserializeOwned>(req: &ApiRequest) -> Result<T, ApiError> {
    let response = send(req).await?;
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }
    let promise = response.json().map_err(|e| ApiError::Decode(format!("{:?}", e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Decode(format!("{:?}", e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
