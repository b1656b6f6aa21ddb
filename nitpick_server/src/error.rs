use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use nitpick_core::Error as NitpickError;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        (status, self.to_string()).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        let err = &self.0;
        for cause in err.chain() {
            if let Some(err) = cause.downcast_ref::<timeline_client::Error>() {
                match err {
                    timeline_client::Error::NotFound(_) => return StatusCode::NOT_FOUND,
                    timeline_client::Error::NetworkError(_) => return StatusCode::BAD_GATEWAY,
                    _ => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
            if let Some(err) = cause.downcast_ref::<NitpickError>() {
                match err {
                    NitpickError::InvalidSetting(_) => return StatusCode::BAD_REQUEST,
                    NitpickError::CacheUnavailable(_) => return StatusCode::SERVICE_UNAVAILABLE,
                    NitpickError::Timeout(_) => return StatusCode::GATEWAY_TIMEOUT,
                    NitpickError::Upstream(_) => return StatusCode::BAD_GATEWAY,
                    _ => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = ServerError::from(NitpickError::InvalidSetting("feedStrategy".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err = ServerError::from(NitpickError::CacheUnavailable("panicked".to_string()));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let err = ServerError::from(anyhow::anyhow!("something else"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
