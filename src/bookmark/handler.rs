//! HTTP handlers for the bookmarks API

use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, OriginalUri, Path, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use super::BookmarkStore;
use super::payload::BookmarkPayload;
use crate::error::ApiError;
use crate::handler::AppState;
use crate::model::Bookmark;
use crate::sanitize::sanitize_bookmark;

/// The bookmark named by the `:id` path segment, looked up once per request.
///
/// Every id-scoped handler takes this extractor, so an unknown id (or one
/// that isn't an integer) is answered with 404 before the handler runs.
pub struct LoadedBookmark(pub Bookmark);

#[async_trait]
impl FromRequestParts<AppState> for LoadedBookmark {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound)?;

        let Ok(id) = raw_id.parse::<i64>() else {
            tracing::info!(id = %raw_id, "bookmark id is not an integer");
            return Err(ApiError::NotFound);
        };

        let store = BookmarkStore::new(state.db.connection());
        match store.get_by_id(id).await? {
            Some(bookmark) => Ok(LoadedBookmark(bookmark)),
            None => {
                tracing::info!(id, "bookmark not found");
                Err(ApiError::NotFound)
            }
        }
    }
}

/// A bookmark request body.
///
/// A missing body, a blank one, or one not sent as JSON reads as `{}`, so the
/// field checks report what is missing. Only a JSON body that fails to parse
/// is rejected here.
pub struct BookmarkBody(pub BookmarkPayload);

#[async_trait]
impl<S> FromRequest<S> for BookmarkBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BookmarkBody(BookmarkPayload::default()));
        }

        let Json(payload) = Json::<BookmarkPayload>::from_bytes(&bytes)?;
        Ok(BookmarkBody(payload))
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Result<Json<Vec<Bookmark>>, ApiError> {
    let store = BookmarkStore::new(state.db.connection());
    let bookmarks = store.list_all().await?;

    tracing::info!(count = bookmarks.len(), "listed bookmarks");
    Ok(Json(bookmarks.into_iter().map(sanitize_bookmark).collect()))
}

pub async fn get_bookmark(LoadedBookmark(bookmark): LoadedBookmark) -> Json<Bookmark> {
    Json(sanitize_bookmark(bookmark))
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    BookmarkBody(payload): BookmarkBody,
) -> Result<Response, ApiError> {
    let new_bookmark = payload.into_new_bookmark()?;

    let store = BookmarkStore::new(state.db.connection());
    let bookmark = store.insert(new_bookmark).await?;
    tracing::info!(id = bookmark.id, "bookmark created");

    let location = format!("{}/{}", uri.path().trim_end_matches('/'), bookmark.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(sanitize_bookmark(bookmark)),
    )
        .into_response())
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    LoadedBookmark(bookmark): LoadedBookmark,
    BookmarkBody(payload): BookmarkBody,
) -> Result<StatusCode, ApiError> {
    let changes = payload.into_changes()?;

    let store = BookmarkStore::new(state.db.connection());
    let affected = store.update_by_id(bookmark.id, changes).await?;
    tracing::info!(id = bookmark.id, affected, "bookmark updated");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_bookmark(
    State(state): State<AppState>,
    LoadedBookmark(bookmark): LoadedBookmark,
) -> Result<StatusCode, ApiError> {
    let store = BookmarkStore::new(state.db.connection());
    store.delete_by_id(bookmark.id).await?;
    tracing::info!(id = bookmark.id, "bookmark deleted");

    Ok(StatusCode::NO_CONTENT)
}
