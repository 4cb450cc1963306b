pub mod message;

use tracing::info;

use crate::model::alarm::{AlarmEvent, SnsEnvelope};
use crate::model::global_error::{AppError, ErrorCode};
use crate::util::slack::post_to_webhook;

pub use message::build_chat_message;

// 봉투 -> 파싱 -> 메시지 변환 -> 웹훅 전송
pub async fn process_event(
    envelope: &SnsEnvelope,
    webhook_url: &str,
) -> Result<String, AppError> {
    let record = envelope
        .records
        .first()
        .ok_or_else(|| AppError::new(ErrorCode::EmptyEnvelope))?;
    let alarm: AlarmEvent = serde_json::from_str(&record.sns.message)?;
    info!("알람 수신: {}", alarm.alarm_name);

    let message = build_chat_message(&alarm)?;
    let body = post_to_webhook(&message, webhook_url).await?;
    info!("웹훅 전송 완료: {}", alarm.alarm_name);

    Ok(body)
}
