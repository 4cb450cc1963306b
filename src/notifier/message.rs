use chrono::{DateTime, FixedOffset};

use crate::model::alarm::{
    AlarmEvent, AlarmState, AnomalyDetectionTrigger, ThresholdTrigger, Trigger,
};
use crate::model::global_error::{AppError, ErrorCode};
use crate::model::message::{Attachment, ChatMessage, Field, comparison_symbol};

const ALARM_ARN_PREFIX: &str = "arn:aws:cloudwatch:";
const KST_OFFSET_SECS: i32 = 9 * 3600;

pub fn build_chat_message(data: &AlarmEvent) -> Result<ChatMessage, AppError> {
    let new_state: AlarmState = data.new_state_value.parse()?;
    let old_state: AlarmState = data.old_state_value.parse()?;
    let new_status = new_state.presentation();
    let old_status = old_state.presentation();

    let execute_time = to_kst_timestamp(data.state_change_time.as_deref())?;
    let description = data.alarm_description.clone().unwrap_or_default();
    let cause = build_cause(data)?;
    let link = build_console_link(data)?;

    Ok(ChatMessage {
        attachments: vec![Attachment {
            title: format!("[{}]", data.alarm_name),
            color: new_status.color.to_string(),
            fields: vec![
                Field::new("언제", execute_time),
                Field::new("설명", description),
                Field::new("원인", cause),
                Field::short("이전 상태", old_status.label.to_string()),
                Field::short("현재 상태", format!("*{}*", new_status.label)),
                Field::new("바로가기", link),
            ],
        }],
    })
}

// CloudWatch 알람 바로 가기 링크
pub fn build_console_link(data: &AlarmEvent) -> Result<String, AppError> {
    let region = extract_region_code(&data.alarm_arn)?;
    Ok(format!(
        "https://console.aws.amazon.com/cloudwatch/home?region={}#alarm:alarmFilter=ANY;name={}",
        region,
        urlencoding::encode(&data.alarm_name)
    ))
}

pub fn extract_region_code(arn: &str) -> Result<&str, AppError> {
    let rest = arn
        .strip_prefix(ALARM_ARN_PREFIX)
        .ok_or_else(|| AppError::with_detail(ErrorCode::InvalidAlarmArn, arn.to_string()))?;
    Ok(rest.split(':').next().unwrap_or(rest))
}

pub fn build_cause(data: &AlarmEvent) -> Result<String, AppError> {
    match &data.trigger {
        Trigger::AnomalyDetection(trigger) => build_anomaly_detection_cause(trigger),
        Trigger::Threshold(trigger) => build_threshold_cause(trigger),
    }
}

// 지표가 Threshold를 벗어난 경우
fn build_threshold_cause(trigger: &ThresholdTrigger) -> Result<String, AppError> {
    let minutes = trigger.period / 60;
    let symbol = comparison_symbol(&trigger.comparison_operator)?;
    Ok(format!(
        "{} 분 동안 {} 회 {} {} {}",
        trigger.evaluation_periods * minutes,
        trigger.evaluation_periods,
        trigger.metric_name,
        symbol,
        trigger.threshold
    ))
}

// 지표가 이상 탐지 Band를 벗어난 경우
fn build_anomaly_detection_cause(trigger: &AnomalyDetectionTrigger) -> Result<String, AppError> {
    let minutes = trigger.period / 60;
    let metric = trigger
        .metrics
        .iter()
        .find(|metric| metric.id == "m1")
        .and_then(|metric| metric.metric_stat.as_ref())
        .map(|stat| stat.metric.metric_name.as_str())
        .ok_or_else(|| AppError::new(ErrorCode::MissingQueryMetric))?;
    let expression = trigger
        .metrics
        .iter()
        .find(|metric| metric.id == "ad1")
        .and_then(|metric| metric.expression.as_deref())
        .ok_or_else(|| AppError::new(ErrorCode::MissingBandExpression))?;
    let width = band_width(expression)?;

    Ok(format!(
        "{} 분 동안 {} 회 {} 지표가 범위(약 {}배)를 벗어났습니다.",
        trigger.evaluation_periods * minutes,
        trigger.evaluation_periods,
        metric,
        width
    ))
}

// "ANOMALY_DETECTION_BAND(m1, 2)" 의 두 번째 인자가 밴드 폭
fn band_width(expression: &str) -> Result<String, AppError> {
    let token = expression.split(',').nth(1).ok_or_else(|| {
        AppError::with_detail(ErrorCode::MissingBandWidth, expression.to_string())
    })?;
    Ok(token.replacen(')', "", 1).trim().to_string())
}

// 타임존 UTC -> KST
pub fn to_kst_timestamp(time: Option<&str>) -> Result<String, AppError> {
    let Some(raw) = time else {
        return Ok(String::new());
    };
    if raw.is_empty() {
        return Ok(String::new());
    }

    // CloudWatch는 "+0000" 꼴 오프셋도 보낸다
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map_err(|err| {
            AppError::with_detail(ErrorCode::InvalidStateChangeTime, err.to_string())
        })?;
    let kst_offset = FixedOffset::east_opt(KST_OFFSET_SECS).expect("KST offset must be valid");

    Ok(parsed
        .with_timezone(&kst_offset)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn threshold_event(new_state: &str, old_state: &str) -> AlarmEvent {
        serde_json::from_value(json!({
            "AlarmName": "cpu-high",
            "AlarmArn": "arn:aws:cloudwatch:us-east-1:123456789012:alarm:cpu-high",
            "AlarmDescription": "CPU 사용률 경보",
            "NewStateValue": new_state,
            "OldStateValue": old_state,
            "StateChangeTime": "2020-01-01T00:00:00Z",
            "Trigger": {
                "MetricName": "CPU",
                "Period": 300,
                "EvaluationPeriods": 3,
                "ComparisonOperator": "GreaterThanThreshold",
                "Threshold": 80.0
            }
        }))
        .unwrap()
    }

    #[test]
    fn alarm_state_selects_danger_color() {
        let message = build_chat_message(&threshold_event("ALARM", "OK")).unwrap();
        let attachment = &message.attachments[0];
        assert_eq!(attachment.color, "danger");
        assert_eq!(attachment.fields[3].value, "정상");
        assert_eq!(attachment.fields[4].value, "*솔데*");
    }

    #[test]
    fn ok_state_selects_good_color() {
        let message = build_chat_message(&threshold_event("OK", "ALARM")).unwrap();
        let attachment = &message.attachments[0];
        assert_eq!(attachment.color, "good");
        assert_eq!(attachment.fields[3].value, "솔데");
        assert_eq!(attachment.fields[4].value, "*정상*");
    }

    #[test]
    fn insufficient_data_state_selects_warning_color() {
        let message = build_chat_message(&threshold_event("INSUFFICIENT_DATA", "OK")).unwrap();
        let attachment = &message.attachments[0];
        assert_eq!(attachment.color, "warning");
        assert_eq!(attachment.fields[4].value, "*데이터 부족*");
    }

    #[test]
    fn unknown_state_fails_instead_of_defaulting() {
        let err = build_chat_message(&threshold_event("BROKEN", "OK")).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::UnknownStateValue));
    }

    #[test]
    fn attachment_fields_keep_fixed_order() {
        let message = build_chat_message(&threshold_event("ALARM", "OK")).unwrap();
        let titles: Vec<&str> = message.attachments[0]
            .fields
            .iter()
            .map(|field| field.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec!["언제", "설명", "원인", "이전 상태", "현재 상태", "바로가기"]
        );
    }

    #[test]
    fn attachment_title_wraps_alarm_name() {
        let message = build_chat_message(&threshold_event("ALARM", "OK")).unwrap();
        assert_eq!(message.attachments[0].title, "[cpu-high]");
    }

    #[test]
    fn utc_timestamp_is_shifted_to_kst() {
        let formatted = to_kst_timestamp(Some("2020-01-01T00:00:00Z")).unwrap();
        assert_eq!(formatted, "2020-01-01 09:00:00");
    }

    #[test]
    fn cloudwatch_offset_format_is_accepted() {
        let formatted = to_kst_timestamp(Some("2020-12-31T23:30:05.123+0000")).unwrap();
        assert_eq!(formatted, "2021-01-01 08:30:05");
    }

    #[test]
    fn missing_timestamp_renders_empty() {
        assert_eq!(to_kst_timestamp(None).unwrap(), "");
        assert_eq!(to_kst_timestamp(Some("")).unwrap(), "");
    }

    #[test]
    fn garbage_timestamp_fails() {
        let err = to_kst_timestamp(Some("어제쯤")).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidStateChangeTime));
    }

    #[test]
    fn threshold_cause_renders_operator_and_threshold() {
        let event = threshold_event("ALARM", "OK");
        assert_eq!(build_cause(&event).unwrap(), "15 분 동안 3 회 CPU > 80");
    }

    #[test]
    fn anomaly_cause_renders_band_width() {
        let event: AlarmEvent = serde_json::from_value(json!({
            "AlarmName": "latency-band",
            "AlarmArn": "arn:aws:cloudwatch:us-east-1:123456789012:alarm:latency-band",
            "NewStateValue": "ALARM",
            "OldStateValue": "OK",
            "StateChangeTime": "2020-01-01T00:00:00Z",
            "Trigger": {
                "EvaluationPeriods": 2,
                "Period": 60,
                "Metrics": [
                    { "Id": "m1", "MetricStat": { "Metric": { "MetricName": "Latency" } } },
                    { "Id": "ad1", "Expression": "ANOMALY_DETECTION_BAND(m1, 2)" }
                ]
            }
        }))
        .unwrap();

        let cause = build_cause(&event).unwrap();
        assert_eq!(cause, "2 분 동안 2 회 Latency 지표가 범위(약 2배)를 벗어났습니다.");
    }

    #[test]
    fn anomaly_cause_without_query_metric_fails() {
        let event: AlarmEvent = serde_json::from_value(json!({
            "AlarmName": "latency-band",
            "AlarmArn": "arn:aws:cloudwatch:us-east-1:123456789012:alarm:latency-band",
            "NewStateValue": "ALARM",
            "OldStateValue": "OK",
            "Trigger": {
                "EvaluationPeriods": 2,
                "Period": 60,
                "Metrics": [
                    { "Id": "ad1", "Expression": "ANOMALY_DETECTION_BAND(m1, 2)" }
                ]
            }
        }))
        .unwrap();

        let err = build_cause(&event).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MissingQueryMetric));
    }

    #[test]
    fn band_width_takes_second_expression_argument() {
        assert_eq!(band_width("ANOMALY_DETECTION_BAND(m1, 2)").unwrap(), "2");
        assert_eq!(band_width("ANOMALY_DETECTION_BAND(m1,1.5)").unwrap(), "1.5");
    }

    #[test]
    fn band_width_without_argument_fails() {
        let err = band_width("ANOMALY_DETECTION_BAND(m1)").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::MissingBandWidth));
    }

    #[test]
    fn region_code_is_third_arn_segment() {
        let region =
            extract_region_code("arn:aws:cloudwatch:us-east-1:123:alarm:foo").unwrap();
        assert_eq!(region, "us-east-1");
    }

    #[test]
    fn arn_without_cloudwatch_prefix_fails() {
        let err = extract_region_code("arn:aws:sns:us-east-1:123:topic").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidAlarmArn));
    }

    #[test]
    fn console_link_embeds_region_and_encoded_name() {
        let event: AlarmEvent = serde_json::from_value(json!({
            "AlarmName": "프로덕션 CPU 경보",
            "AlarmArn": "arn:aws:cloudwatch:ap-northeast-2:123456789012:alarm:foo",
            "NewStateValue": "ALARM",
            "OldStateValue": "OK",
            "Trigger": {
                "MetricName": "CPU",
                "Period": 60,
                "EvaluationPeriods": 1,
                "ComparisonOperator": "GreaterThanThreshold",
                "Threshold": 80.0
            }
        }))
        .unwrap();

        let link = build_console_link(&event).unwrap();
        assert!(link.contains("region=ap-northeast-2"));

        let encoded = link.split("name=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), "프로덕션 CPU 경보");
    }
}
