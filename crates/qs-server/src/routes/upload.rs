use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use qs_core::{ShareError, UploadResp};

use super::{map_err, ApiError};
use crate::{state::AppState, storage};

const FILES_FIELD: &str = "files";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::disable())
}

/// Write every `files` part into the served directory, overwriting same-named
/// files. Parts with an empty or unusable name are skipped; a batch with no
/// `files` part at all is a bad request.
async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResp>, ApiError> {
    let mut multipart = multipart.map_err(|e| map_err(ShareError::BadRequest(e.body_text())))?;

    let mut saw_file_part = false;
    let mut accepted = Vec::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| map_err(ShareError::BadRequest(e.body_text())))?
    {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(raw) = field.file_name().map(str::to_string) else {
            continue;
        };
        saw_file_part = true;
        if raw.is_empty() {
            continue;
        }

        let (name, fs_path) = match qs_core::resolve(&state.root, &raw) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!("skipping upload: {e}");
                continue;
            }
        };
        if !storage::writable_target(&fs_path).await.map_err(map_err)? {
            tracing::warn!(file = %name, "skipping upload: target is not a regular file");
            continue;
        }

        let mut file = storage::create_file(&fs_path).await.map_err(map_err)?;
        let mut written: u64 = 0;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| map_err(ShareError::BadRequest(e.body_text())))?
        {
            storage::write_chunk(&mut file, &chunk).await.map_err(map_err)?;
            written += chunk.len() as u64;
        }
        storage::finish_file(file).await.map_err(map_err)?;

        tracing::info!(file = %name, bytes = written, "upload");
        accepted.push(name);
    }

    if !saw_file_part {
        return Err(map_err(ShareError::NoFiles));
    }

    Ok(Json(UploadResp {
        message: "upload complete".into(),
        files: accepted,
    }))
}
