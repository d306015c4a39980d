use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Attach the front user named by the gateway's `user_id_header`.
///
/// The header is trusted as-is, so it must only be configured behind a
/// gateway that strips it from client requests. Without the header the
/// request passes through and [`CurrentUser`] rejects it as token-empty.
pub async fn gateway_identity(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let header = state.settings.user_id_header.as_str();
    if header.is_empty() {
        return next.run(request).await;
    }

    if let Some(value) = request.headers().get(header) {
        let Some(id) = parse_user_id(value.as_bytes()) else {
            tracing::debug!("Rejected {} header {:?}", header, value);
            return ApiError::TokenInvalid.into_response();
        };
        request.extensions_mut().insert(CurrentUser { id });
    }

    next.run(request).await
}

fn parse_user_id(raw: &[u8]) -> Option<u32> {
    std::str::from_utf8(raw)
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_positive_integers() {
        assert_eq!(parse_user_id(b"42"), Some(42));
        assert_eq!(parse_user_id(b" 7 "), Some(7));
        assert_eq!(parse_user_id(b"0"), None);
        assert_eq!(parse_user_id(b"-3"), None);
        assert_eq!(parse_user_id(b"abc"), None);
        assert_eq!(parse_user_id(&[0xff, 0xfe]), None);
    }
}
