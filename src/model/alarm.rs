use std::str::FromStr;

use serde::Deserialize;

use crate::model::global_error::{AppError, ErrorCode};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsEnvelope {
    pub records: Vec<SnsRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsRecord {
    pub sns: SnsPayload,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsPayload {
    pub message: String, // JSON 문자열로 감싸진 AlarmEvent
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmEvent {
    pub alarm_name: String,
    pub alarm_arn: String,
    #[serde(default)]
    pub alarm_description: Option<String>,
    pub new_state_value: String,
    pub old_state_value: String,
    #[serde(default)]
    pub state_change_time: Option<String>, // ISO-8601, UTC
    pub trigger: Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    Alarm,
    InsufficientData,
    Ok,
}

impl FromStr for AlarmState {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALARM" => Ok(AlarmState::Alarm),
            "INSUFFICIENT_DATA" => Ok(AlarmState::InsufficientData),
            "OK" => Ok(AlarmState::Ok),
            other => Err(AppError::with_detail(
                ErrorCode::UnknownStateValue,
                other.to_string(),
            )),
        }
    }
}

// Metrics 목록이 있으면 이상 탐지 알람, 없으면 임계값 알람
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    AnomalyDetection(AnomalyDetectionTrigger),
    Threshold(ThresholdTrigger),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnomalyDetectionTrigger {
    pub metrics: Vec<MetricDataQuery>,
    pub evaluation_periods: u64,
    pub period: u64, // 초 단위
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThresholdTrigger {
    pub metric_name: String,
    pub comparison_operator: String,
    pub threshold: f64,
    pub evaluation_periods: u64,
    pub period: u64, // 초 단위
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricDataQuery {
    pub id: String,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub metric_stat: Option<MetricStat>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricStat {
    pub metric: Metric,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Metric {
    pub metric_name: String,
}
