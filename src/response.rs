//! Status code translation.
//!
//! Every operation passes its response through [`translate`] (or
//! [`translate_lookup`] for single-entity reads) together with the status it
//! accepts and the documentation section of its endpoint. These are pure
//! functions of their inputs: no I/O, no retries.

use reqwest::StatusCode;

use crate::error::ZendeskError;
use crate::transport::HttpResponse;

/// Which statuses count as success for an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Any 2xx status.
    Success,
    /// Exactly this status; other 2xx codes are failures.
    Exactly(StatusCode),
}

impl Expected {
    /// Shorthand for `Expected::Exactly(StatusCode::OK)`.
    pub const OK: Expected = Expected::Exactly(StatusCode::OK);

    /// Returns true if `status` satisfies this expectation.
    pub fn accepts(self, status: StatusCode) -> bool {
        match self {
            Expected::Success => status.is_success(),
            Expected::Exactly(code) => status == code,
        }
    }

    fn declared(self) -> Option<StatusCode> {
        match self {
            Expected::Success => None,
            Expected::Exactly(code) => Some(code),
        }
    }
}

/// Checks a response against the operation's expected status.
///
/// # Errors
///
/// Returns `ZendeskError::Request` carrying the actual status, the declared
/// expected status, the body and the documentation link when the status is
/// not accepted.
pub fn translate(
    response: HttpResponse,
    expected: Expected,
    help_docs: &str,
) -> Result<HttpResponse, ZendeskError> {
    if expected.accepts(response.status) {
        return Ok(response);
    }

    Err(ZendeskError::request(
        response.status,
        expected.declared(),
        response.body,
        help_docs,
    ))
}

/// Like [`translate`], but a 404 becomes `Ok(None)`.
///
/// Used by single-entity lookups so callers can tell a missing entity apart
/// from a failed call.
///
/// # Errors
///
/// Same as [`translate`] for every status other than 404.
pub fn translate_lookup(
    response: HttpResponse,
    expected: Expected,
    help_docs: &str,
) -> Result<Option<HttpResponse>, ZendeskError> {
    if response.status == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    translate(response, expected, help_docs).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DOCS: &str = "support/job_statuses#show-job-status";

    fn response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::from_u16(status).unwrap(), "body")
    }

    #[test]
    fn test_any_2xx_is_success_by_default() {
        for status in [200, 201, 202, 204] {
            assert!(translate(response(status), Expected::Success, DOCS).is_ok());
        }
    }

    #[test]
    fn test_exact_expectation_rejects_other_2xx() {
        let err = translate(response(204), Expected::OK, DOCS).unwrap_err();
        match err {
            ZendeskError::Request {
                status,
                expected,
                body,
                help_docs,
            } => {
                assert_eq!(status, StatusCode::NO_CONTENT);
                assert_eq!(expected, Some(StatusCode::OK));
                assert_eq!(body, "body");
                assert!(help_docs.ends_with(DOCS));
            }
            other => panic!("expected Request error, got {:?}", other),
        }
    }

    #[test]
    fn test_exact_expectation_accepts_match() {
        let ok = translate(response(200), Expected::OK, DOCS).unwrap();
        assert_eq!(ok.status, StatusCode::OK);
    }

    #[test]
    fn test_server_error_carries_status_and_docs() {
        let err = translate(response(500), Expected::Success, DOCS).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(
            err.help_docs(),
            Some("https://developer.zendesk.com/rest_api/docs/support/job_statuses#show-job-status")
        );
    }

    #[test]
    fn test_lookup_404_is_absence() {
        let result = translate_lookup(response(404), Expected::Success, DOCS).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_lookup_500_is_error() {
        let err = translate_lookup(response(500), Expected::Success, DOCS).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_non_lookup_404_is_error() {
        let err = translate(response(404), Expected::Success, DOCS).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
