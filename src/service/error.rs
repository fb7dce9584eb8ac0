use thiserror::Error;

use crate::{error::HttpError, service::room_filters::FilterError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Room {0} not found")]
    RoomNotFound(String),

    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Auth(String),

    #[error("Auth service unavailable: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::RoomNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::InvalidFilter(_)
            | ServiceError::Validation(_)
            | ServiceError::Auth(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Storage(_) | ServiceError::Upstream(_) => {
                HttpError::bad_gateway(error.to_string())
            }

            ServiceError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}


#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn each_failure_maps_to_its_status() {
        let cases = [
            (ServiceError::RoomNotFound("mock-99".to_string()), StatusCode::NOT_FOUND),
            (ServiceError::Validation("too many".to_string()), StatusCode::BAD_REQUEST),
            (ServiceError::Auth("bad credentials".to_string()), StatusCode::BAD_REQUEST),
            (ServiceError::Storage("bucket down".to_string()), StatusCode::BAD_GATEWAY),
            (
                ServiceError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(HttpError::from(error).status, status);
        }
    }
}
