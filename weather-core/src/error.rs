use thiserror::Error;

/// Failures surfaced by a [`WeatherSource`](crate::source::WeatherSource).
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SourceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of [`SearchAndWeatherController`](crate::controller::SearchAndWeatherController) calls.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The label was not produced by the most recent place search.
    #[error("unknown place selection '{0}'")]
    UnknownSelection(String),

    /// The body was valid JSON but not the shape the formatter reads.
    #[error("unexpected {endpoint} payload: {reason}")]
    UnexpectedPayload {
        endpoint: &'static str,
        reason: String,
    },
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("Unauthorized"), "Unauthorized");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert!(cut.len() <= 203);
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = SourceError::HttpStatus { status: 503, body: String::new() };
        assert_eq!(err.status(), Some(503));

        let parse = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        assert_eq!(SourceError::from(parse).status(), None);
    }
}
