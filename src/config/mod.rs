use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::str::FromStr;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub upload: UploadConfig,
    pub cors: CorsConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
}

// Настройки загрузки манифеста
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Имя поля multipart-формы с файлом.
    pub field_name: String,
    pub max_upload_bytes: usize,
}

// Настройки CORS. Пустой список - разрешены все источники.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            app: AppConfig {
                host: var("HOST", "0.0.0.0"),
                port: parse_var(&lookup, "PORT", 5000)?,
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "boarding_system=debug,tower_http=debug"),
            },
            upload: UploadConfig {
                field_name: var("UPLOAD_FIELD_NAME", "bookingsFile"),
                max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", 1024 * 1024)?,
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(lookup("CORS_ALLOWED_ORIGINS").as_deref()),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", key, value)),
        None => Ok(default),
    }
}

// "*" или пусто - любой источник
fn parse_origins(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty() && *o != "*")
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
