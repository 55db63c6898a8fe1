#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::net::TcpListener;

use school_news_api::app::{router, AppState};
use school_news_api::auth::JwtKeys;
use school_news_api::config::AppConfig;
use school_news_api::database::{DatabaseManager, MemoryStore, Repositories};

/// An in-process server. `store` is set when it runs on the in-memory adapter.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Option<Arc<MemoryStore>>,
    pub keys: JwtKeys,
    client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_tests()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        let store = Arc::new(MemoryStore::new());
        let mut server = Self::spawn_on(config, Repositories::from_store(store.clone())).await?;
        server.store = Some(store);
        Ok(server)
    }

    /// Runs against the database named by `DATABASE_URL`.
    /// Returns `None` when the variable is unset.
    pub async fn spawn_postgres(mut config: AppConfig) -> Result<Option<Self>> {
        let Some(pool) = postgres_pool(&mut config).await? else {
            return Ok(None);
        };
        Ok(Some(Self::spawn_on(config, Repositories::postgres(pool)).await?))
    }

    pub async fn spawn_on(config: AppConfig, repos: Repositories) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let keys = JwtKeys::new(&config.security.jwt_secret)?;
        let state = AppState::new(repos, keys.clone(), &config);
        let app = router(state, &keys, &config);

        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {port}"))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            store: None,
            keys,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    pub fn memory(&self) -> &MemoryStore {
        self.store.as_deref().expect("server is not backed by the in-memory store")
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/ping")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn get(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.get(self.url(path)).bearer_auth(token)
    }

    pub fn post(&self, path: &str, token: &str, body: Value) -> RequestBuilder {
        self.client.post(self.url(path)).bearer_auth(token).json(&body)
    }

    pub fn put(&self, path: &str, token: &str, body: Value) -> RequestBuilder {
        self.client.put(self.url(path)).bearer_auth(token).json(&body)
    }

    pub fn delete(&self, path: &str, token: &str) -> RequestBuilder {
        self.client.delete(self.url(path)).bearer_auth(token)
    }

    pub fn anonymous(&self) -> &Client {
        &self.client
    }

    pub async fn signup(&self, user_name: &str, password: &str, user_type: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/users"))
            .json(&json!({ "userName": user_name, "password": password, "userType": user_type }))
            .send()
            .await?)
    }

    pub async fn login(&self, user_name: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "userName": user_name, "password": password }))
            .send()
            .await?)
    }

    /// Signs up and logs in, returning the access token.
    pub async fn token_for(&self, user_name: &str, user_type: &str) -> Result<String> {
        let res = self.signup(user_name, "password", user_type).await?;
        anyhow::ensure!(res.status() == StatusCode::NO_CONTENT, "signup failed: {}", res.status());

        let body: Value = self.login(user_name, "password").await?.json().await?;
        body["data"]["accessToken"]
            .as_str()
            .map(str::to_string)
            .context("login response has no accessToken")
    }

    pub async fn admin(&self, user_name: &str) -> Result<String> {
        self.token_for(user_name, "ADMIN").await
    }

    pub async fn student(&self, user_name: &str) -> Result<String> {
        self.token_for(user_name, "STUDENT").await
    }

    pub async fn create_school(&self, token: &str, name: &str, region: &str) -> Result<Response> {
        Ok(self
            .post("/schools", token, json!({ "name": name, "region": region }))
            .send()
            .await?)
    }

    /// Creates a school as `token` and returns its id.
    pub async fn school_id(&self, token: &str, name: &str, region: &str) -> Result<i64> {
        let res = self.create_school(token, name, region).await?;
        anyhow::ensure!(res.status() == StatusCode::NO_CONTENT, "create school failed: {}", res.status());

        let body: Value = self.get("/schools", token).send().await?.json().await?;
        body["data"]["schools"]
            .as_array()
            .into_iter()
            .flatten()
            .find(|s| s["name"] == name && s["region"] == region)
            .and_then(|s| s["id"].as_i64())
            .context("created school not listed")
    }

    pub async fn create_news(&self, token: &str, school_id: i64, title: &str) -> Result<Response> {
        Ok(self
            .post("/news", token, json!({ "schoolID": school_id, "title": title }))
            .send()
            .await?)
    }

    pub async fn subscribe(&self, token: &str, school_id: i64) -> Result<Response> {
        Ok(self
            .post("/subscriptions", token, json!({ "schoolID": school_id }))
            .send()
            .await?)
    }
}

/// Connects to `DATABASE_URL` and applies the migrations, or returns `None`
/// when the variable is unset so the postgres suite is skipped.
pub async fn postgres_pool(config: &mut AppConfig) -> Result<Option<PgPool>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping postgres suite");
        return Ok(None);
    };

    config.database.url = url;
    config.database.min_connections = 1;
    let pool = DatabaseManager::connect(&config.database).await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some(pool))
}

/// A name no earlier run has used, since the database outlives the test.
pub fn unique(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{prefix}-{}-{nanos}", std::process::id())
}

/// Asserts the status and the uniform error envelope, returning the message.
pub async fn expect_error(res: Response, status: StatusCode) -> Result<String> {
    assert_eq!(res.status(), status);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], status.as_u16());
    assert_eq!(body.as_object().map(|o| o.len()), Some(2), "unexpected keys in {body}");
    Ok(body["message"].as_str().unwrap_or_default().to_string())
}

/// Asserts a 200 envelope and returns its `data`.
pub async fn expect_data(res: Response) -> Result<Value> {
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "OK");
    Ok(body["data"].clone())
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .map(|items| items.iter().filter_map(|i| i["id"].as_i64()).collect())
        .unwrap_or_default()
}
