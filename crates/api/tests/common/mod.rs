//! Shared harness: the real router on an ephemeral port over a temp store.

#![allow(dead_code)]

use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use jis_site_api::{build_app, AppConfig, AppState};
use jis_site_core::document::{AdminSeed, JsonFileStore};
use jis_site_core::events::EventBus;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "changeme";

pub struct TestServer {
    pub base: String,
    pub client: Client,
    pub state: AppState,
    pub dir: TempDir,
}

pub async fn spawn() -> TestServer {
    spawn_with(|_| {}).await
}

pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        db_path: dir.path().join("db.json"),
        uploads_path: dir.path().join("uploads"),
        admin_seed: Some(AdminSeed {
            username: ADMIN_USERNAME.into(),
            password: ADMIN_PASSWORD.into(),
        }),
        ..AppConfig::default()
    };
    configure(&mut config);

    let store = JsonFileStore::open_or_init(&config.db_path, config.admin_seed.clone())
        .await
        .unwrap();
    let state = AppState::new(store, config, EventBus::new(64));
    let app = build_app(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}"),
        client: Client::new(),
        state,
        dir,
    }
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub async fn login(&self) -> String {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn post_json(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn put_json(&self, path: &str, token: &str, body: Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let response = self.get(path).send().await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

pub fn text_block(id: &str, text: &str) -> Value {
    json!({ "id": id, "type": "text", "data": { "text": text } })
}
