use axum::{
    body::Body,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor for the content write endpoints
///
/// Any rejection (bad syntax, missing fields, wrong content type) is reported
/// as the generic save failure instead of axum's 4xx responses.
pub struct ContentJson<T>(pub T);

impl<T, S> FromRequest<S> for ContentJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => Err(ApiError::SaveFailed(anyhow::anyhow!(
                "Rejected request body: {}",
                rejection.body_text()
            ))),
        }
    }
}
