//! Test helpers for integration tests
//!
//! Spawns the full application over in-memory repositories and wraps a
//! reqwest client that never follows redirects, so gate redirects can be
//! asserted directly.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{header, redirect::Policy, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use userbind_api::{create_app, AppState};
use userbind_common::AppConfig;
use userbind_core::{ScoreboardRow, StudentInvite, User};
use userbind_service::testing::{test_context_with_page_size, TestFixture, TEST_PASSWORD};

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub fixture: TestFixture,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the configured page size
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let fixture = test_context_with_page_size(config.invite.page_size);
        let state = AppState::new(fixture.ctx.clone(), config);
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            addr,
            client,
            fixture,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with a bearer token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).bearer_auth(token).send().await?)
    }

    /// Make a GET request carrying the session cookie
    pub async fn get_cookie(&self, path: &str, token: &str) -> Result<Response> {
        Ok(with_session(self.client.get(self.url(path)), token).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with JSON body and a bearer token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: &str,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let request = self.client.post(self.url(path));
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Ok(request.send().await?)
    }

    /// Make a PATCH request with JSON body and a bearer token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        body: &T,
        token: &str,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    /// Seed an account and return it with a fresh access token
    pub async fn user(&self, handle: &str, is_school_student: bool) -> Result<(User, String)> {
        let user = self.fixture.add_user(handle, is_school_student).await;
        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    /// Seed a domain manager and return it with a fresh access token
    pub async fn admin(&self, handle: &str) -> Result<(User, String)> {
        let user = self.fixture.add_admin(handle).await;
        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    /// Issue an access token signed with the server's key
    pub fn token_for(&self, user: &User) -> Result<String> {
        let token = self
            .fixture
            .ctx
            .jwt_service()
            .generate_access_token(user.id, None)?;
        Ok(token)
    }

    /// Insert an invite directly
    pub fn seed_invite(&self, invite: StudentInvite) {
        self.fixture.invites.insert(invite);
    }

    /// Replace the rows of a contest scoreboard
    pub fn seed_scoreboard(&self, contest_id: i64, rows: Vec<ScoreboardRow>) {
        self.fixture.scoreboard.set_rows(contest_id, rows);
    }

    /// The password every seeded account uses
    pub fn password(&self) -> &'static str {
        TEST_PASSWORD
    }
}

fn with_session(request: RequestBuilder, token: &str) -> RequestBuilder {
    request.header(header::COOKIE, format!("sid={token}"))
}

/// Configuration for the in-memory test server
pub fn test_config() -> Result<AppConfig> {
    test_config_with(&[])
}

/// Test configuration with extra keys layered over the defaults
pub fn test_config_with(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let defaults = [
        ("APP_ENV", "development"),
        ("API_PORT", "0"),
        ("DATABASE_URL", "postgres://unused@localhost/userbind_test"),
        ("JWT_SECRET", "test-secret-key-for-fixtures"),
    ];

    let config = AppConfig::from_lookup(|key| {
        overrides
            .iter()
            .chain(defaults.iter())
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    })?;
    Ok(config)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if status != expected_status {
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }

    serde_json::from_str(&body)
        .map_err(|e| anyhow::anyhow!("Failed to parse JSON: {}. Body: {}", e, body))
}

/// Assert response status only
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert a 303 redirect and return its target
pub fn assert_redirect(response: &Response, expected_location: &str) -> Result<()> {
    if response.status() != StatusCode::SEE_OTHER {
        anyhow::bail!("Expected 303 See Other, got {}", response.status());
    }
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if location != expected_location {
        anyhow::bail!("Expected redirect to {expected_location}, got {location}");
    }
    Ok(())
}

/// Assert an error envelope with the given status and code
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
    expected_code: &str,
) -> Result<()> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    let code = body["error"]["code"].as_str().unwrap_or_default();
    if code != expected_code {
        anyhow::bail!("Expected error code {expected_code}, got {code}. Body: {body}");
    }
    Ok(())
}

/// Value of the `sid` cookie set by a response, if any
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| v.strip_prefix("sid="))
        .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
}
