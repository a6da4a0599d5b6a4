use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{HeaderValue, Method, StatusCode},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::{config::CorsConfig, error::AppError};

/// Файл манифеста из multipart-формы.
#[derive(Debug, Clone)]
pub struct ManifestUpload {
    pub file_name: Option<String>,
    /// Содержимое файла как UTF-8 (невалидные байты заменяются).
    pub content: String,
}

// Multipart extractor: ищем поле с именем из конфигурации
impl FromRequest<Arc<crate::AppState>> for ManifestUpload {
    type Rejection = AppError;

    async fn from_request(
        req: Request,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await.map_err(|e| {
            warn!("Upload is not a multipart form: {}", e);
            AppError::MissingFile
        })?;

        let field_name = state.config.upload.field_name.as_str();

        while let Some(field) = multipart.next_field().await.map_err(reject_multipart)? {
            if field.name() != Some(field_name) {
                continue;
            }

            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(reject_multipart)?;

            return Ok(ManifestUpload {
                file_name,
                content: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Err(AppError::MissingFile)
    }
}

fn reject_multipart(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeds the size limit");
        return AppError::TooLarge;
    }
    warn!("Failed to read multipart upload: {}", err.body_text());
    AppError::MissingFile
}

/// CORS для фронтенда. Без списка источников разрешено все.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
