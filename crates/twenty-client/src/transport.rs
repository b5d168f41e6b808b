//! The transport contract every higher layer talks through.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::request::{RequestMethod, RequestOptions};

/// Sends one request and returns the decoded JSON body.
///
/// `path` is relative to the REST root (for example `people/<id>` or
/// `metadata/objects`). Failures carry the HTTP status when there is one,
/// see [`Error::status`](crate::Error::status). An empty response body
/// decodes to `Value::Null`.
pub trait Transport: Send + Sync {
    fn request(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value>> + Send;
}

impl<T: Transport> Transport for &T {
    fn request(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value>> + Send {
        (**self).request(method, path, options)
    }
}

impl<T: Transport> Transport for Arc<T> {
    fn request(
        &self,
        method: RequestMethod,
        path: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<Value>> + Send {
        (**self).request(method, path, options)
    }
}
