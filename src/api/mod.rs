use crate::storage::{clear_token, load_token, save_token};
use serde::{Deserialize, Serialize};

pub(crate) use reqwest::Method;

/// Discriminator the backend puts in a successful login body.
pub(crate) const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
    /// 2xx response that still did not grant what was asked for.
    Rejected,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    /// Message the backend itself supplied (`error` or `message` field).
    pub detail: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: e.to_string(),
            detail: None,
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            status: None,
            message: e.to_string(),
            detail: None,
        }
    }

    fn rejected(detail: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Rejected,
            status: None,
            message: detail.clone().unwrap_or_else(|| "Login failed".to_string()),
            detail,
        }
    }

    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let detail = server_message(body);
        if status == 401 {
            return Self {
                kind: ApiErrorKind::Unauthorized,
                status: Some(status),
                message: detail.clone().unwrap_or_else(|| "Unauthorized".to_string()),
                detail,
            };
        }

        let message = match &detail {
            Some(d) => format!("Request failed ({status}): {d}"),
            None if body.trim().is_empty() => format!("Request failed ({status})"),
            None => format!("Request failed ({status}): {}", body.trim()),
        };

        Self {
            kind: ApiErrorKind::Http,
            status: Some(status),
            message,
            detail,
        }
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// What to show the user: the backend's own words, else `fallback`.
    pub(crate) fn user_message(&self, fallback: &str) -> String {
        self.detail.clone().unwrap_or_else(|| fallback.to_string())
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

fn server_message(body: &str) -> Option<String> {
    let v: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|k| v.get(*k).and_then(|m| m.as_str()))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// Success bodies are not always JSON (204, plain "OK").
fn parse_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[derive(Clone, Debug)]
pub(crate) struct EnvConfig {
    pub api_url: String,
}

impl EnvConfig {
    pub fn new() -> Self {
        let default_api_url = "http://localhost:5000".to_string();

        // `window.ENV.API_URL` is the documented knob; `api_url` is accepted too.
        if let Some(window) = web_sys::window() {
            if let Some(env) = window.get("ENV") {
                if !env.is_undefined() && env.is_object() {
                    for key in ["API_URL", "api_url"] {
                        if let Ok(api_url) = js_sys::Reflect::get(&env, &key.into()) {
                            if let Some(url_str) = api_url.as_string() {
                                return Self { api_url: url_str };
                            }
                        }
                    }
                }
            }
        }

        Self {
            api_url: default_api_url,
        }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of both `/auth/login` and `/auth/register`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    pub(crate) fn accepted_token(&self) -> Option<&str> {
        if self.message.as_deref() != Some(LOGIN_SUCCESS_MESSAGE) {
            return None;
        }
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// One authenticated JSON round trip. Resource flows are written against
/// this so they can run on a fake backend.
pub(crate) trait Gateway {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<serde_json::Value>;
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    pub fn load_from_storage() -> Self {
        let mut client = Self::new(EnvConfig::new().api_url);
        client.token = load_token();
        client
    }

    pub fn save_to_storage(&self) {
        if let Some(token) = &self.token {
            save_token(token);
        }
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub fn get_token(&self) -> Option<&String> {
        self.token.as_ref()
    }

    pub fn get_auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn logout(&mut self) {
        self.token = None;
        clear_token();
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn with_auth_headers(
        mut req: reqwest::RequestBuilder,
        auth: Option<String>,
    ) -> reqwest::RequestBuilder {
        if let Some(auth) = auth {
            req = req.header("Authorization", auth);
        }
        req
    }

    /// Returns the token when the backend accepted the credentials.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<String> {
        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(ApiError::parse)?;

        let data = self.send(Method::POST, "/auth/login", Some(body)).await?;
        let response: LoginResponse = serde_json::from_value(data).map_err(ApiError::parse)?;

        match response.accepted_token() {
            Some(token) => Ok(token.to_string()),
            None => Err(ApiError::rejected(response.message)),
        }
    }

    pub async fn register(&self, username: &str, password: &str) -> ApiResult<serde_json::Value> {
        let body = serde_json::to_value(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        })
        .map_err(ApiError::parse)?;

        self.send(Method::POST, "/auth/register", Some(body)).await
    }
}

impl Gateway for ApiClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> ApiResult<serde_json::Value> {
        let client = reqwest::Client::new();
        let mut req = client.request(method, self.url(path));
        req = Self::with_auth_headers(req, self.get_auth_header());

        if let Some(b) = &body {
            req = req.json(b);
        }

        let res = req.send().await.map_err(ApiError::network)?;
        let status = res.status();
        let text = res.text().await.map_err(ApiError::network)?;

        if status.is_success() {
            Ok(parse_body(&text))
        } else {
            Err(ApiError::from_status(status.as_u16(), &text))
        }
    }
}
