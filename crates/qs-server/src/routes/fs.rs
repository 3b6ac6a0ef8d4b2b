use axum::{
    body::Body,
    extract::{rejection::PathRejection, Path, Query, State},
    http::{header, HeaderValue, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use qs_core::{FileListResp, ShareError};
use tokio_util::io::ReaderStream;

use super::{auth, map_err, ApiError};
use crate::{pages, state::AppState, storage};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/api/files", get(list))
        .route("/download/:filename", get(download))
}

async fn index(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Result<Html<String>, ApiError> {
    // Same lenient parsing as the auth middleware: a malformed query means no token.
    let q = Query::<auth::TokenQuery>::try_from_uri(&uri)
        .map(|Query(q)| q)
        .unwrap_or_default();
    let files = storage::list_files(&state.root).await.map_err(map_err)?;
    let token = auth::presented_token(&jar, q.token.as_deref());
    Ok(Html(pages::index_page(&state.root, &files, token.as_deref())))
}

async fn list(State(state): State<AppState>) -> Result<Json<FileListResp>, ApiError> {
    let files = storage::list_files(&state.root).await.map_err(map_err)?;
    Ok(Json(FileListResp { files }))
}

async fn download(
    State(state): State<AppState>,
    filename: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // A name that does not even decode (e.g. invalid UTF-8) cannot exist here.
    let Path(filename) = filename.map_err(|_| map_err(ShareError::NotFound))?;
    let (name, fs_path) = qs_core::resolve(&state.root, &filename).map_err(map_err)?;
    let (file, len) = storage::open_file(&fs_path).await.map_err(map_err)?;

    tracing::info!(file = %name, bytes = len, "download");

    let mut resp = Body::from_stream(ReaderStream::new(file)).into_response();
    let h = resp.headers_mut();
    h.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
    h.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    if let Ok(v) = HeaderValue::from_str(&content_disposition(&name)) {
        h.insert(header::CONTENT_DISPOSITION, v);
    }
    Ok(resp)
}

/// `attachment` disposition with an ASCII fallback name and the exact name
/// in RFC 5987 form for non-ASCII file names.
fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(name)
    )
}
