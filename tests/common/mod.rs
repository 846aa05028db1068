#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookshelf::books::{Book, BookCreate, BookUpdate};
use bookshelf::config::{AuthConfig, PasswordHashConfig};
use bookshelf::store::{BookStore, InMemoryBookStore, InMemoryUserStore, StoreError};
use bookshelf::{AppState, UserAuthService, build_router};

pub const SECRET: &str = "integration-test-secret";

pub fn auth_config() -> AuthConfig {
    let mut cfg = AuthConfig::new(SECRET);
    cfg.password_hash = PasswordHashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    };
    cfg
}

/// Book store double that counts every call before delegating.
#[derive(Default)]
pub struct CountingBookStore {
    inner: InMemoryBookStore,
    calls: AtomicUsize,
}

impl CountingBookStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookStore for CountingBookStore {
    async fn create(&self, data: BookCreate) -> Result<Book, StoreError> {
        self.hit();
        self.inner.create(data).await
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Book>, StoreError> {
        self.hit();
        self.inner.list(skip, limit).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        self.hit();
        self.inner.get(id).await
    }

    async fn update(&self, id: Uuid, data: BookUpdate) -> Result<Option<Book>, StoreError> {
        self.hit();
        self.inner.update(id, data).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.hit();
        self.inner.delete(id).await
    }
}

pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserStore>,
    pub books: Arc<CountingBookStore>,
}

pub fn test_app() -> TestApp {
    let users = Arc::new(InMemoryUserStore::new());
    let books = Arc::new(CountingBookStore::default());
    let auth = UserAuthService::new(users.clone(), &auth_config()).expect("auth service");
    let state = AppState::new(Arc::new(auth), books.clone());
    TestApp {
        router: build_router(Arc::new(state)),
        users,
        books,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn signup(&self, username: &str, password: &str) -> Response<Body> {
        let body = serde_json::json!({ "username": username, "password": password });
        self.send(json_request("POST", "/signup", None, &body)).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response<Body> {
        let form = format!("username={}&password={}", username, password);
        self.send(form_request("/login", &form)).await
    }

    /// Signup + login, returning the access token
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        assert_eq!(self.signup(username, password).await.status(), StatusCode::OK);
        let resp = self.login(username, password).await;
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await["access_token"]
            .as_str()
            .expect("access_token")
            .to_string()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}
