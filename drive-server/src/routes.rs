use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use core_service::BrowseOutcome;
use tracing::{error, info, instrument};

use crate::error::ApiError;
use crate::render;
use crate::state::AppState;

/// `GET /{*path}`: directory page for folders, redirect for files.
#[instrument(skip(state, uri), fields(path = %uri.path()))]
pub async fn browse(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    let path = urlencoding::decode(uri.path())
        .map_err(|e| ApiError::BadRequest(format!("path is not valid UTF-8: {}", e)))?;

    match state.index.browse(&path).await {
        Ok(BrowseOutcome::Listing(listing)) => Ok(Html(render::listing_page(&listing)).into_response()),
        Ok(BrowseOutcome::Redirect(url)) => {
            let location = HeaderValue::from_str(&url).map_err(|e| {
                error!(error = %e, "Download URL is not a valid header value");
                ApiError::Internal
            })?;
            Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
        }
        Err(err) if err.status_hint() == 404 => {
            info!("Item not found");
            Err(err.into())
        }
        Err(err) => {
            error!(error = %err, "Browse failed");
            Err(err.into())
        }
    }
}
