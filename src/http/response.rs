//! Dispatch outcome to HTTP response.
//!
//! # Responsibilities
//! - Write a document's text form with status 200
//! - Turn a dispatch failure into a `{"error": message}` document
//! - Reject non-GET methods with an empty body
//!
//! # Status Codes
//! - 200: handler result (including the null document)
//! - 404: no route matched under the `not_found` policy
//! - 405: any method other than GET
//! - 500: every other dispatch failure

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::dispatch::DispatchError;
use crate::document::{Document, Field};

const APPLICATION_JSON: &str = "application/json";

/// Single-field error document carrying `message`.
pub fn error_document(message: &str) -> Document {
    Document::object(vec![Field::new("error", Document::string(message))])
        .unwrap_or_else(|_| Document::string(message))
}

/// Response whose body is the text form of `document`.
pub fn document_response(status: StatusCode, document: &Document) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON))],
        document.to_text(),
    )
        .into_response()
}

/// Status code a dispatch failure maps to.
pub fn error_status(error: &DispatchError) -> StatusCode {
    if error.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn dispatch_response(result: Result<Document, DispatchError>) -> Response {
    match result {
        Ok(document) => document_response(StatusCode::OK, &document),
        Err(e) => document_response(error_status(&e), &error_document(&e.to_string())),
    }
}

/// Transport-level rejection for anything but GET.
pub fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, HeaderValue::from_static("GET"))],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_error_document_shape() {
        let document = error_document("boom");
        assert_eq!(document.to_text(), "{\n  \"error\": \"boom\"\n}");
    }

    #[test]
    fn test_error_status() {
        let miss = DispatchError::NotFound {
            path: "/x".to_string(),
        };
        assert_eq!(error_status(&miss), StatusCode::NOT_FOUND);
        assert_eq!(
            error_status(&DispatchError::handler("nope")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_success_response() {
        let response = dispatch_response(Ok(Document::Null));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            APPLICATION_JSON
        );
        assert_eq!(body_text(response).await, "null");
    }

    #[tokio::test]
    async fn test_failure_response() {
        let response = dispatch_response(Err(DispatchError::handler("nope")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert!(body.starts_with("{\n  \"error\": "));
        assert!(body.contains("nope"));
    }

    #[tokio::test]
    async fn test_method_not_allowed_has_no_body() {
        let response = method_not_allowed();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
        assert!(body_text(response).await.is_empty());
    }
}
