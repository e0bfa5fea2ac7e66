//! # Custom Axum Extractors
//!
//! Caller identity plus JSON, query and path extractors whose rejections use
//! the API error body instead of axum's plain-text defaults.

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use tracing::debug;

use crate::constants::USER_ID_HEADER;
use crate::web::error::ApiError;

#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: serde::Serialize> axum::response::IntoResponse for ApiJson<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Identity installed by an upstream authenticator; wins over `X-User-Id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerClaims {
    pub sub: String,
}

/// The user on whose behalf the request runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<CallerClaims>() {
            if !claims.sub.trim().is_empty() {
                return Ok(Self(claims.sub.clone()));
            }
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Missing caller identity"))?;

        debug!(user_id = %user_id, "Resolved caller identity from header");
        Ok(Self(user_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CallerId, ApiError> {
        let (mut parts, _) = request.into_parts();
        CallerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_caller_from_header() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "user-a")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.unwrap().as_str(), "user-a");
    }

    #[tokio::test]
    async fn test_claims_take_precedence() {
        let mut request = Request::builder()
            .header(USER_ID_HEADER, "user-a")
            .body(())
            .unwrap();
        request.extensions_mut().insert(CallerClaims {
            sub: "user-b".into(),
        });
        assert_eq!(extract(request).await.unwrap().as_str(), "user-b");
    }

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "  ")
            .body(())
            .unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { .. }));
    }
}
