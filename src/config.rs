/*
 * Responsibility
 * - 環境変数の読み込み (listen port, platform secret / public key, timeouts)
 * - 設定値のバリデーション (不足なら起動失敗)
 * - 起動後は immutable。Arc で全リクエストから読み取り専用で共有する
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HMAC 署名 token 用の共有シークレット
    pub platform_client_secret: String,
    // RSA 署名 token 用の公開鍵 (PEM)
    pub platform_public_key_pem: String,

    pub auth_issuer: Option<String>,
    pub access_token_leeway_seconds: u64,

    pub request_timeout: Duration,
    pub request_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("auth_issuer", &self.auth_issuer)
            .field(
                "access_token_leeway_seconds",
                &self.access_token_leeway_seconds,
            )
            .field("request_timeout", &self.request_timeout)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = match std::env::var("PORT") {
            Ok(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            Err(_) => 8000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::from_env();

        let platform_client_secret = std::env::var("PLATFORM_CLIENT_SECRET")
            .map_err(|_| ConfigError::Missing("PLATFORM_CLIENT_SECRET"))?;
        if platform_client_secret.is_empty() {
            return Err(ConfigError::Invalid("PLATFORM_CLIENT_SECRET"));
        }

        let platform_public_key_pem = std::env::var("PLATFORM_PUBLIC_KEY_PEM")
            .map_err(|_| ConfigError::Missing("PLATFORM_PUBLIC_KEY_PEM"))?
            .replace("\\n", "\n");

        let auth_issuer = std::env::var("AUTH_ISSUER")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let request_timeout = std::env::var("REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        // git push は packfile を送るので 1 MiB では足りない
        let request_body_limit_bytes = std::env::var("REQUEST_BODY_LIMIT_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10 * 1024 * 1024);

        Ok(Self {
            addr,
            app_env,
            platform_client_secret,
            platform_public_key_pem,
            auth_issuer,
            access_token_leeway_seconds,
            request_timeout,
            request_body_limit_bytes,
        })
    }
}
