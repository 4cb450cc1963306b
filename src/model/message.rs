use serde::Serialize;

use crate::model::alarm::AlarmState;
use crate::model::global_error::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub title: String,
    pub color: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<bool>,
}

impl Field {
    pub fn new(title: &str, value: String) -> Self {
        Self {
            title: title.to_string(),
            value,
            short: None,
        }
    }

    pub fn short(title: &str, value: String) -> Self {
        Self {
            title: title.to_string(),
            value,
            short: Some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPresentation {
    pub color: &'static str,
    pub label: &'static str,
}

impl AlarmState {
    pub fn presentation(&self) -> StatusPresentation {
        match self {
            AlarmState::Alarm => StatusPresentation {
                color: "danger",
                label: "솔데",
            },
            AlarmState::InsufficientData => StatusPresentation {
                color: "warning",
                label: "데이터 부족",
            },
            AlarmState::Ok => StatusPresentation {
                color: "good",
                label: "정상",
            },
        }
    }
}

// AWS가 실제로 쓰는 LessThanOrEqualToThreshold 표기도 함께 허용한다
pub fn comparison_symbol(operator: &str) -> Result<&'static str, AppError> {
    match operator {
        "GreaterThanOrEqualToThreshold" => Ok(">="),
        "GreaterThanThreshold" => Ok(">"),
        "LowerThanOrEqualToThreshold" | "LessThanOrEqualToThreshold" => Ok("<="),
        "LessThanThreshold" => Ok("<"),
        other => Err(AppError::with_detail(
            ErrorCode::UnknownComparisonOperator,
            other.to_string(),
        )),
    }
}
