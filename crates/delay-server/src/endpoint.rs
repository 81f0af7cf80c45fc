//! The HTTP side of the delay handler.

use axum::extract::{Query, Request};
use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use delay_server_core::ServerError;
use delay_server_handler::{DelayParams, DelayService};
use futures::future::{self, BoxFuture};
use std::task::{Context, Poll};
use tower::Service;

/// Turns HTTP requests into [`DelayParams`] and the handler's answer back
/// into a response.
///
/// `OPTIONS` requests are answered right away with an empty `200`, before
/// the query string is even looked at.
#[derive(Clone, Debug)]
pub struct DelayEndpoint {
    handler: DelayService,
}

impl DelayEndpoint {
    /// Wraps a configured handler.
    pub fn new(handler: DelayService) -> Self {
        Self { handler }
    }
}

impl Service<Request> for DelayEndpoint {
    type Response = Response;
    type Error = ServerError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.handler.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if request.method() == Method::OPTIONS {
            return Box::pin(future::ready(Ok(StatusCode::OK.into_response())));
        }

        let params = DelayParams::from_pairs(query_pairs(request.uri()));
        let clone = self.handler.clone();
        let mut handler = std::mem::replace(&mut self.handler, clone);

        Box::pin(async move {
            let page = handler.call(params).await?;
            Ok(Html(page).into_response())
        })
    }
}

/// Decoded query pairs, in order. A query string that cannot be decoded
/// yields no pairs, so every parameter takes its default.
fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default()
}

/// Renders a request-ending error as a plain-text response.
pub async fn render_error(err: ServerError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::X_CONTENT_TYPE_OPTIONS, "nosniff")],
        err.to_string(),
    )
        .into_response()
}
