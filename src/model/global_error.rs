use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // 잘못된 알람 페이로드
    UnknownStateValue,
    UnknownComparisonOperator,
    MissingQueryMetric,
    MissingBandExpression,
    MissingBandWidth,
    InvalidAlarmArn,
    InvalidStateChangeTime,

    // 잘못된 이벤트 봉투
    EmptyEnvelope,
}

impl ErrorCode {
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::UnknownStateValue => "알 수 없는 알람 상태 값입니다",
            ErrorCode::UnknownComparisonOperator => "알 수 없는 비교 연산자입니다",
            ErrorCode::MissingQueryMetric => "m1 지표 쿼리를 찾을 수 없습니다",
            ErrorCode::MissingBandExpression => "ad1 밴드 식을 찾을 수 없습니다",
            ErrorCode::MissingBandWidth => "밴드 식에서 범위 배수를 읽을 수 없습니다",
            ErrorCode::InvalidAlarmArn => "알람 ARN 형식이 올바르지 않습니다",
            ErrorCode::InvalidStateChangeTime => "상태 변경 시각을 해석할 수 없습니다",

            ErrorCode::EmptyEnvelope => "SNS 레코드가 비어 있습니다",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    AlarmError(ErrorCode, Option<String>),

    #[error("알람 페이로드 파싱에 실패했습니다: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("웹훅 요청에 실패했습니다: {0}")]
    WebhookError(#[from] reqwest::Error),
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        AppError::AlarmError(code, None)
    }

    pub fn with_detail(code: ErrorCode, detail: String) -> Self {
        AppError::AlarmError(code, Some(detail))
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            AppError::AlarmError(code, _) => Some(*code),
            _ => None,
        }
    }
}
