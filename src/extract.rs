use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ApiError;

/// JSON body extractor that reports malformed or missing fields as 400
/// instead of axum's default 422.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "rejected request body");
            ApiError::Validation(e.body_text())
        })?;
        Ok(JsonBody(value))
    }
}

/// Path id extractor that reports a non-integer id as 400 with the same
/// JSON error body, instead of axum's plain-text rejection.
#[derive(Debug)]
pub struct PathId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                warn!(error = %e, "rejected path parameter");
                ApiError::Validation(e.body_text())
            })?;
        Ok(PathId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        email: String,
        password: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_a_complete_body() {
        let req = json_request(r#"{"email":"a@b.co","password":"pw"}"#);
        let JsonBody(p) = JsonBody::<Payload>::from_request(req, &())
            .await
            .expect("body should parse");
        assert_eq!(p.email, "a@b.co");
        assert_eq!(p.password, "pw");
    }

    #[tokio::test]
    async fn missing_field_is_a_bad_request() {
        let req = json_request(r#"{"password":"pw"}"#);
        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_body_is_a_bad_request() {
        let req = json_request("");
        let err = JsonBody::<Payload>::from_request(req, &())
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod path_id_tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/bookmark/:id",
            get(|PathId(id): PathId| async move { id.to_string() }),
        )
    }

    async fn probe(uri: &str) -> axum::http::Response<Body> {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn integer_ids_parse() {
        let res = probe("/bookmark/42").await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn non_integer_id_is_a_bad_request_with_a_json_body() {
        let res = probe("/bookmark/abc").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = res.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value =
            serde_json::from_slice(&body).expect("error body should be JSON");
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn prefixed_id_is_also_a_bad_request() {
        let res = probe("/bookmark/aa12").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
