use axum::http::HeaderMap;
use uuid::Uuid;

use backend_domain::{AccountId, RuntimeConfig, StaffIdentity};

use crate::error::HttpError;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Token gate plus staff attribution. Session issuance lives outside this
/// service; the operator identity arrives as headers set by the gateway.
pub fn authenticate(
    config: &RuntimeConfig,
    headers: &HeaderMap,
) -> Result<StaffIdentity, HttpError> {
    if !authorize(config, headers) {
        return Err(HttpError::Unauthorized);
    }
    let account_id = headers
        .get("x-staff-id")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or_else(|| {
            HttpError::BadRequest("missing or invalid x-staff-id header".to_string())
        })?;
    let name = headers
        .get("x-staff-name")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("staff")
        .to_string();
    Ok(StaffIdentity {
        account_id: AccountId(account_id),
        name,
    })
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn config(token: Option<&str>) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: token.map(ToString::to_string),
            roster_dir: ".".to_string(),
            default_page_limit: 100,
            max_page_limit: 1000,
            max_body_bytes: 1024,
            request_timeout_seconds: 5,
        }
    }

    #[test]
    fn authorize_accepts_matching_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer secret"));
        assert!(authorize(&config(Some("secret")), &headers));
        assert!(!authorize(&config(Some("other")), &headers));
    }

    #[test]
    fn authorize_is_open_when_no_token_configured() {
        assert!(authorize(&config(None), &HeaderMap::new()));
    }

    #[test]
    fn authenticate_requires_staff_id() {
        let err = authenticate(&config(None), &HeaderMap::new()).expect_err("no staff id");
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[test]
    fn authenticate_reads_staff_identity() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-staff-id",
            HeaderValue::from_static("01234567-89ab-cdef-0123-456789abcdef"),
        );
        headers.insert("x-staff-name", HeaderValue::from_static("front desk"));
        let staff = authenticate(&config(None), &headers).expect("identity");
        assert_eq!(staff.name, "front desk");
    }

    #[test]
    fn authenticate_defaults_missing_name() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-staff-id",
            HeaderValue::from_static("01234567-89ab-cdef-0123-456789abcdef"),
        );
        let staff = authenticate(&config(None), &headers).expect("identity");
        assert_eq!(staff.name, "staff");
    }
}
