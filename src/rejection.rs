use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::time::Duration;

pub const REJECTION_BODY: &str = "Too many requests have received. Request refused.";

// What a refused caller sees: fixed status, fixed body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rejection {
    pub status: StatusCode,
    pub body: &'static str,
}

impl Rejection {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            body: REJECTION_BODY,
        }
    }

    pub fn respond(&self, retry_after: Option<Duration>) -> Response {
        let mut response = (self.status, self.body).into_response();
        if let Some(wait) = retry_after {
            // whole seconds, rounded up, never zero
            let secs = wait.as_secs().saturating_add(u64::from(wait.subsec_nanos() > 0));
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs.max(1)));
        }
        response
    }
}

impl Default for Rejection {
    fn default() -> Self {
        Self::new(StatusCode::TOO_MANY_REQUESTS)
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.respond(None)
    }
}
