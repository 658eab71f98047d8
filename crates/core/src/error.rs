//! 에러 타입 — 도메인별 에러 정의

/// Logharvest 최상위 에러 타입
///
/// 정상 동작 중 파이프라인 단계에서 치명적 에러는 발생하지 않습니다.
/// 유일한 치명적 경로는 잘못된 설정이며, 로드 시점에 즉시 반환됩니다.
#[derive(Debug, thiserror::Error)]
pub enum LogharvestError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파싱 실패 (TOML 문법 오류, 타입 불일치 등)
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_message_contains_field() {
        let err = ConfigError::InvalidValue {
            field: "aggregator.timezone".to_owned(),
            reason: "expected UTC or ±HH:MM".to_owned(),
        };
        assert!(err.to_string().contains("aggregator.timezone"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let err: LogharvestError = ConfigError::ParseFailed {
            reason: "bad toml".to_owned(),
        }
        .into();
        assert!(matches!(err, LogharvestError::Config(_)));
        assert!(err.to_string().starts_with("config error:"));
    }
}
