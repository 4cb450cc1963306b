use aws_sdk_sns::Client;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::publish::PublishError;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct SmsRequest {
    pub number: String,
    pub text: String,
}

// 재시도 없이 한 번만 발행한다. 실패는 SDK 에러 그대로 플랫폼에 넘긴다.
pub async fn forward_sms(
    client: &Client,
    request: &SmsRequest,
) -> Result<String, SdkError<PublishError>> {
    let output = client
        .publish()
        .message(&request.text)
        .phone_number(&request.number)
        .send()
        .await?;

    let message_id = output.message_id().unwrap_or_default();
    info!("SMS 발송 완료: {}", message_id);

    Ok(format!("MessageID is {}", message_id))
}
