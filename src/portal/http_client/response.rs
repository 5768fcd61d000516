//! HTTP response wrapper.

use std::collections::HashMap;

use reqwest::{Response, StatusCode};

/// HTTP response with headers pre-extracted into a plain map.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub(crate) response: Response,
}

impl HttpResponse {
    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }

    /// Get the Content-Length header.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get("content-length")
            .and_then(|s| s.parse().ok())
    }

    /// Get the filename from the Content-Disposition header.
    pub fn content_disposition_filename(&self) -> Option<String> {
        self.headers
            .get("content-disposition")
            .and_then(|h| parse_content_disposition_filename(h))
    }

    /// Get response body as bytes.
    pub async fn bytes(self) -> Result<Vec<u8>, reqwest::Error> {
        self.response.bytes().await.map(|b| b.to_vec())
    }

    /// Get response body as text.
    pub async fn text(self) -> Result<String, reqwest::Error> {
        self.response.text().await
    }

    /// Take the underlying response, for streaming the body.
    pub fn into_inner(self) -> Response {
        self.response
    }
}

/// Parse a filename out of a Content-Disposition header value.
/// Handles both `filename="name.pdf"` and RFC 5987 `filename*=UTF-8''name.pdf`.
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    // filename*= takes precedence when present
    if let Some(start) = header.find("filename*=") {
        let rest = &header[start + 10..];
        if let Some(sep) = rest.find("''") {
            let encoded = rest[sep + 2..].split([';', ' ']).next()?;
            if let Ok(decoded) = urlencoding::decode(encoded) {
                let filename = decoded.trim().to_string();
                if !filename.is_empty() {
                    return Some(filename);
                }
            }
        }
    }

    if let Some(start) = header.find("filename=") {
        let rest = &header[start + 9..];
        let filename = if let Some(quoted) = rest.strip_prefix('"') {
            quoted.split('"').next()
        } else {
            rest.split([';', ' ']).next()
        };

        if let Some(name) = filename {
            let name = name.trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_quoted() {
        let header = r#"attachment; filename="relazione.pdf""#;
        assert_eq!(
            parse_content_disposition_filename(header),
            Some("relazione.pdf".to_string())
        );
    }

    #[test]
    fn test_filename_unquoted() {
        let header = "attachment; filename=relazione.pdf";
        assert_eq!(
            parse_content_disposition_filename(header),
            Some("relazione.pdf".to_string())
        );
    }

    #[test]
    fn test_filename_rfc5987() {
        let header = "attachment; filename*=UTF-8''studio%20impatto.pdf";
        assert_eq!(
            parse_content_disposition_filename(header),
            Some("studio impatto.pdf".to_string())
        );
    }

    #[test]
    fn test_filename_rfc5987_precedence() {
        let header = r#"attachment; filename="fallback.pdf"; filename*=UTF-8''preferred.pdf"#;
        assert_eq!(
            parse_content_disposition_filename(header),
            Some("preferred.pdf".to_string())
        );
    }

    #[test]
    fn test_filename_absent() {
        assert_eq!(parse_content_disposition_filename("attachment"), None);
        assert_eq!(parse_content_disposition_filename("inline"), None);
    }
}
