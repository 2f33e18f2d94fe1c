//! Static venue images under `images.base_path`, addressed as
//! `/images/{table_name}/{filename}`.

use std::path::{Path as FsPath, PathBuf};

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderValue},
    response::Response,
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, warn};
use uuid::Uuid;
use weddy_core::errors::InterfaceError;

use crate::error::ApiError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const DEFAULT_EXTENSION: &str = "png";
const CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Clone)]
pub struct ImageState {
    base_path: PathBuf,
}

impl ImageState {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self { base_path: base_path.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedImage {
    pub path: PathBuf,
    pub filename: String,
    pub content_type: &'static str,
}

pub fn router(state: ImageState) -> Router {
    Router::new().route("/images/{table_name}/{filename}", get(serve_image)).with_state(state)
}

async fn serve_image(
    State(state): State<ImageState>,
    Path((table_name, filename)): Path<(String, String)>,
    request: Request,
) -> Result<Response, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();
    let image =
        resolve(&state.base_path, &table_name, &filename, &correlation_id).await.map_err(|error| {
            warn!(
                event_name = "venue.image.rejected",
                correlation_id = %correlation_id,
                table_name = %table_name,
                filename = %filename,
                error = %error,
                "image request rejected"
            );
            ApiError(error)
        })?;

    debug!(
        event_name = "venue.image.served",
        correlation_id = %correlation_id,
        path = %image.path.display(),
        "serving image"
    );

    let response = match ServeFile::new(&image.path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };
    let mut response = response.map(Body::new);

    if response.status().is_success() {
        let headers = response.headers_mut();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(image.content_type));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL));
        let disposition = HeaderValue::from_str(&format!("inline; filename={}", image.filename))
            .unwrap_or_else(|_| HeaderValue::from_static("inline"));
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}

/// Maps a request onto a file under `base_path`, rejecting anything that
/// would resolve outside it.
pub async fn resolve(
    base_path: &FsPath,
    table_name: &str,
    filename: &str,
    correlation_id: &str,
) -> Result<ResolvedImage, InterfaceError> {
    if !is_safe_segment(table_name) || !is_safe_segment(filename) {
        return Err(InterfaceError::Forbidden {
            message: "Access denied".to_string(),
            correlation_id: correlation_id.to_string(),
        });
    }

    let filename = normalized_filename(filename);
    let candidate = base_path.join(table_name).join(&filename);

    let is_file = tokio::fs::metadata(&candidate).await.map(|meta| meta.is_file()).unwrap_or(false);
    if !is_file {
        return Err(InterfaceError::NotFound {
            message: format!("Image not found: {table_name}/{filename}"),
            correlation_id: correlation_id.to_string(),
        });
    }

    // Unreachable while every allowed extension has a content type.
    let Some(content_type) = extension(&filename).and_then(|ext| content_type(&ext)) else {
        return Err(InterfaceError::BadRequest {
            message: "File is not an image".to_string(),
            correlation_id: correlation_id.to_string(),
        });
    };

    let canonical_base = tokio::fs::canonicalize(base_path).await.map_err(|error| {
        InterfaceError::Internal {
            message: format!("image root cannot be canonicalized: {error}"),
            correlation_id: correlation_id.to_string(),
        }
    })?;
    let canonical_file = tokio::fs::canonicalize(&candidate).await.map_err(|_| {
        InterfaceError::NotFound {
            message: format!("Image not found: {table_name}/{filename}"),
            correlation_id: correlation_id.to_string(),
        }
    })?;

    if !canonical_file.starts_with(&canonical_base) {
        return Err(InterfaceError::Forbidden {
            message: "Access denied".to_string(),
            correlation_id: correlation_id.to_string(),
        });
    }

    Ok(ResolvedImage { path: canonical_file, filename, content_type })
}

/// Appends `.png` unless the name already ends in an allowed image extension.
pub fn normalized_filename(filename: &str) -> String {
    match extension(filename) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => filename.to_string(),
        _ => format!("{filename}.{DEFAULT_EXTENSION}"),
    }
}

pub fn content_type(extension: &str) -> Option<&'static str> {
    match extension {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn extension(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    (!stem.is_empty() && !ext.is_empty()).then(|| ext.to_ascii_lowercase())
}

fn is_safe_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment.contains("..")
        && !segment.contains(['/', '\\', '\0'])
}
