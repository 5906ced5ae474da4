//! `/api/export` handlers

use crate::error::ApiError;
use crate::routes::blocking;
use crate::state::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use roster_engine::SyncStatus;
use serde::Serialize;

/// Serve the current artifact as an attachment
pub async fn download(State(state): State<AppState>) -> Result<Response, ApiError> {
    let download = blocking(move || state.reader.open()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, download.content_disposition),
        ],
        download.bytes,
    )
        .into_response())
}

#[derive(Debug, Serialize)]
pub struct ArtifactBody {
    pub path: String,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ExportStatusBody {
    #[serde(flatten)]
    pub sync: SyncStatus,
    pub stale: bool,
    pub artifact: Option<ArtifactBody>,
}

/// Synchronization health plus facts about the artifact on disk
pub async fn status(State(state): State<AppState>) -> Result<Json<ExportStatusBody>, ApiError> {
    let sync = state.sync.status();
    let artifact = blocking(move || state.reader.info()).await?;
    Ok(Json(ExportStatusBody {
        stale: sync.is_stale(),
        sync,
        artifact: artifact.map(|info| ArtifactBody {
            path: info.path.display().to_string(),
            size_bytes: info.size_bytes,
            modified_at: info.modified_at,
        }),
    }))
}
