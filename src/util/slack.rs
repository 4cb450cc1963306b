use reqwest::Client;

use crate::model::global_error::AppError;
use crate::model::message::ChatMessage;

// 응답 본문을 그대로 돌려준다. 상태 코드 검증은 하지 않는다.
pub async fn post_to_webhook(message: &ChatMessage, webhook_url: &str) -> Result<String, AppError> {
    let response = Client::new()
        .post(webhook_url)
        .json(message)
        .send()
        .await?;

    Ok(response.text().await?)
}
