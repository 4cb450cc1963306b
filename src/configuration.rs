use std::env;

use thiserror::Error;

// 알람 노티파이어가 기동 시점에 한 번 읽는 설정
const WEBHOOK_ENV: &str = "webhook";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("필수 환경 변수가 없습니다: {0}")]
    MissingEnv(&'static str),

    #[error("웹훅 URL 형식이 올바르지 않습니다: {0}")]
    InvalidWebhookUrl(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub webhook_url: String,
}

pub fn get_configuration() -> Result<Settings, ConfigError> {
    let webhook_url =
        env::var(WEBHOOK_ENV).map_err(|_| ConfigError::MissingEnv(WEBHOOK_ENV))?;
    if reqwest::Url::parse(&webhook_url).is_err() {
        return Err(ConfigError::InvalidWebhookUrl(webhook_url));
    }

    Ok(Settings { webhook_url })
}
