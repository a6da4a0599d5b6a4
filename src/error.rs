use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Причина отказа валидации манифеста. Текст ошибки уходит клиенту как `details`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("File must contain a header and at least one data row.")]
    EmptyManifest,

    #[error("File must contain 'Booking_ID' and 'Seats' headers.")]
    MissingHeaders,

    #[error("Line {line} has an invalid Booking ID or no seats listed in the correct columns.")]
    InvalidBookingRow { line: usize },

    #[error("Line {line} has an invalid seat format: \"{token}\".")]
    InvalidSeatFormat { line: usize, token: String },

    #[error(
        "Line {line} has an invalid seat number: {token}. Seat numbers must be between 1 and 20."
    )]
    InvalidSeatNumber { line: usize, token: String },

    #[error("Line {line} has a duplicate seat assignment: \"{token}\" is assigned more than once.")]
    DuplicateSeat { line: usize, token: String },
}

/// Отказ валидации вместе с исходным текстом файла.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    #[source]
    pub reason: ManifestError,
    pub file_content: String,
}

impl ValidationError {
    pub fn new(reason: ManifestError, file_content: &str) -> Self {
        Self {
            reason,
            file_content: file_content.to_string(),
        }
    }
}

/// Ошибки HTTP-слоя.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No file uploaded.")]
    MissingFile,

    #[error("File is too large.")]
    TooLarge,

    /// Причина только логируется, клиент получает общий текст.
    #[error("An unexpected error occurred.")]
    Internal {
        file_content: String,
        cause: anyhow::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "details": err.reason.to_string(),
                    "fileContent": err.file_content,
                })),
            )
                .into_response(),
            AppError::MissingFile => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "details": "No file uploaded." })),
            )
                .into_response(),
            AppError::TooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "details": "File is too large." })),
            )
                .into_response(),
            AppError::Internal { file_content, cause } => {
                tracing::error!("Error during processing: {:?}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "details": "An unexpected error occurred.",
                        "fileContent": file_content,
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn body_json(resp: Response) -> Value {
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn messages_carry_line_and_token() {
        let err = ManifestError::InvalidSeatFormat { line: 3, token: "E5".into() };
        assert_eq!(err.to_string(), "Line 3 has an invalid seat format: \"E5\".");

        let err = ManifestError::InvalidSeatNumber { line: 2, token: "A21".into() };
        assert_eq!(
            err.to_string(),
            "Line 2 has an invalid seat number: A21. Seat numbers must be between 1 and 20."
        );
    }

    #[test]
    fn duplicate_seat_message() {
        let err = ManifestError::DuplicateSeat { line: 4, token: "a5".into() };
        assert_eq!(
            err.to_string(),
            "Line 4 has a duplicate seat assignment: \"a5\" is assigned more than once."
        );
    }

    #[test]
    fn row_and_header_messages() {
        assert_eq!(
            ManifestError::InvalidBookingRow { line: 2 }.to_string(),
            "Line 2 has an invalid Booking ID or no seats listed in the correct columns."
        );
        assert_eq!(
            ManifestError::EmptyManifest.to_string(),
            "File must contain a header and at least one data row."
        );
    }

    #[test]
    fn validation_error_displays_reason() {
        let err = ValidationError::new(ManifestError::MissingHeaders, "raw");
        assert_eq!(err.to_string(), "File must contain 'Booking_ID' and 'Seats' headers.");
        assert_eq!(err.file_content, "raw");
    }

    #[tokio::test]
    async fn internal_error_hides_cause() {
        let err = AppError::Internal {
            file_content: "Booking_ID Seats\n1 A1".to_string(),
            cause: anyhow::anyhow!("boom"),
        };
        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        assert_eq!(body["details"], "An unexpected error occurred.");
        assert_eq!(body["fileContent"], "Booking_ID Seats\n1 A1");
        assert!(!body.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn missing_file_has_no_content() {
        let resp = AppError::MissingFile.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body, serde_json::json!({ "details": "No file uploaded." }));
    }
}
