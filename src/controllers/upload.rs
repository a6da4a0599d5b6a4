//! upload.rs
//!
//! Загрузка манифеста и выдача порядка посадки.

use axum::{routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::{self, JoinError};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::ManifestUpload,
    models::SequenceEntry,
    services::plan_boarding,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload_manifest))
}

/// Ответ при успешной обработке. `errors` всегда пустой.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub sequence: Vec<SequenceEntry>,
    pub errors: Vec<serde_json::Value>,
    pub file_content: String,
}

// POST /api/upload
async fn upload_manifest(upload: ManifestUpload) -> Result<Json<UploadResponse>, AppError> {
    let span = info_span!(
        "upload",
        upload_id = %Uuid::new_v4(),
        file = upload.file_name.as_deref().unwrap_or("-")
    );

    async move {
        info!("Manifest received: {} bytes", upload.content.len());
        let content = upload.content;

        // Разбор и сортировка - чистый CPU, уводим с async-потока
        let input = content.clone();
        let outcome = task::spawn_blocking(move || plan_boarding(&input)).await;

        match outcome {
            Ok(Ok(plan)) => Ok(Json(UploadResponse {
                sequence: plan.sequence,
                errors: Vec::new(),
                file_content: content,
            })),
            Ok(Err(rejection)) => {
                warn!("Manifest rejected: {}", rejection);
                Err(AppError::Validation(rejection))
            }
            Err(e) => Err(worker_failure(content, e)),
        }
    }
    .instrument(span)
    .await
}

// Упавший или отмененный воркер - внутренняя ошибка, детали только в лог
fn worker_failure(file_content: String, err: JoinError) -> AppError {
    AppError::Internal {
        file_content,
        cause: anyhow::Error::new(err).context("boarding worker failed"),
    }
}
