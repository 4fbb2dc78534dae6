use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderValue, Request};
use http_body_util::BodyExt;
use kennel_axum::axum;
use kennel_core::errors::{KennelError, KennelResult};
use kennel_core::{KennelApp, KennelService, ServiceCapabilities, ServiceMethodKind};
use serde_json::{json, Value};
use tower::ServiceExt;

struct UnprocessableOnCreate;

#[async_trait::async_trait]
impl KennelService<Value, ()> for UnprocessableOnCreate {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create])
    }

    async fn create(&self, _data: Value, _params: ()) -> KennelResult<Value> {
        Err(KennelError::unprocessable("Invalid")
            .with_errors(json!({"name": ["name must not be empty"]}))
            .into_anyhow())
    }
}

struct BoomOnCreate;

#[async_trait::async_trait]
impl KennelService<Value, ()> for BoomOnCreate {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Create])
    }

    async fn create(&self, _data: Value, _params: ()) -> KennelResult<Value> {
        Err(anyhow::anyhow!("boom"))
    }
}

struct Lookup;

#[async_trait::async_trait]
impl KennelService<Value, ()> for Lookup {
    fn capabilities(&self) -> ServiceCapabilities {
        ServiceCapabilities::from_methods(vec![ServiceMethodKind::Get, ServiceMethodKind::Remove])
    }

    async fn get(&self, id: &str, _params: ()) -> KennelResult<Value> {
        if id == "fido" {
            return Ok(json!({"id": "fido"}));
        }
        Err(KennelError::not_found(format!("Dog not found: {id}")).into_anyhow())
    }

    async fn remove(&self, id: &str, _params: ()) -> KennelResult<Value> {
        Ok(Value::String(id.to_string()))
    }
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn malformed_json_returns_bad_request() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(BoomOnCreate)).into_router();

    let res = router.oneshot(post_json("/dogs", "{\"name\":\"x\"")).await.unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert!(res.headers().get("x-request-id").is_some());
    let body = json_body(res).await;
    assert_eq!(body["name"], "BadRequest");
    assert_eq!(body["code"], 400);
    assert_eq!(body["className"], "bad-request");
    assert!(body.get("errors").is_some());
}

#[tokio::test]
async fn request_id_is_preserved_when_provided() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(BoomOnCreate)).into_router();

    let provided = HeaderValue::from_static("req-test-123");
    let mut req = post_json("/dogs", "{\"name\":\"ok\"}");
    req.headers_mut().insert("x-request-id", provided.clone());

    let res = router.oneshot(req).await.unwrap();

    assert_eq!(res.headers().get("x-request-id").unwrap(), &provided);
}

#[tokio::test]
async fn unprocessable_preserves_422_and_shape() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(UnprocessableOnCreate)).into_router();

    let res = router.oneshot(post_json("/dogs", "{\"name\":\"\"}")).await.unwrap();

    assert_eq!(res.status().as_u16(), 422);
    let body = json_body(res).await;
    assert_eq!(body["name"], "Unprocessable");
    assert_eq!(body["code"], 422);
    assert_eq!(body["className"], "unprocessable");
    assert_eq!(body["errors"], json!({"name": ["name must not be empty"]}));
}

#[tokio::test]
async fn unstructured_error_maps_to_general_error_shape() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(BoomOnCreate)).into_router();

    let res = router.oneshot(post_json("/dogs", "{\"name\":\"ok\"}")).await.unwrap();

    assert_eq!(res.status().as_u16(), 500);
    let body = json_body(res).await;
    assert_eq!(body["name"], "GeneralError");
    assert_eq!(body["code"], 500);
    assert_eq!(body["className"], "general-error");
    assert!(body["message"].as_str().unwrap().contains("boom"));
}

#[tokio::test]
async fn not_found_maps_to_404_and_remove_returns_id() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(Lookup)).into_router();

    let res = router
        .clone()
        .oneshot(Request::builder().method("GET").uri("/dogs/rex").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["className"], "not-found");
    assert_eq!(body["message"], "Dog not found: rex");

    let res = router
        .oneshot(Request::builder().method("DELETE").uri("/dogs/rex").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(json_body(res).await, json!("rex"));
}

#[tokio::test]
async fn methods_outside_capabilities_answer_405() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(Lookup)).into_router();

    let res = router
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/dogs/fido")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 405);
    let body = json_body(res).await;
    assert_eq!(body["className"], "method-not-allowed");

    let res = router
        .oneshot(Request::builder().method("GET").uri("/dogs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 405);
}

#[tokio::test]
async fn unknown_routes_are_json_404() {
    let app: KennelApp<Value, ()> = KennelApp::new();
    let router = axum(app).use_service("/dogs", Arc::new(Lookup)).into_router();

    let res = router
        .oneshot(Request::builder().method("GET").uri("/cats").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["name"], "NotFound");
}
