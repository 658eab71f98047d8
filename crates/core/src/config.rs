//! 설정 관리 — aggregator.toml 파싱 및 런타임 설정
//!
//! [`LogharvestConfig`]는 모든 파이프라인 단계의 설정을 담는 최상위 구조체입니다.
//! 엔트리 포인트에서 한 번 로드하여 각 단계에 값으로 전달합니다
//! (프로세스 전역 싱글턴 없음).
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`LOGHARVEST_AGGREGATOR_TIMEZONE=+09:00` 형식)
//! 2. 오버라이드 파일 (`aggregator.override.toml`)
//! 3. 기본 파일 (`aggregator.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! 기본/오버라이드 파일이 없는 것은 에러가 아니며, 잘못된 내용만 치명적입니다.
//!
//! # 사용 예시
//! ```
//! use logharvest_core::config::LogharvestConfig;
//!
//! let config = LogharvestConfig::parse("[aggregator]\nsources = [\"logs/*.log\"]").unwrap();
//! assert_eq!(config.aggregator.sources, vec!["logs/*.log"]);
//! ```

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LogharvestError};
use crate::types::TargetMode;

/// Logharvest 통합 설정
///
/// `aggregator.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogharvestConfig {
    /// 일반 설정 (로깅)
    #[serde(default)]
    pub general: GeneralConfig,
    /// 집계 파이프라인 설정
    #[serde(default)]
    pub aggregator: AggregatorConfig,
}

impl LogharvestConfig {
    /// 기본 파일과 오버라이드 파일을 병합하여 설정을 로드합니다.
    ///
    /// `aggregator.toml` 옆의 `aggregator.override.toml`이 존재하면
    /// 키 단위로 덮어씁니다. 파일이 없으면 기본값을 사용하며,
    /// 환경변수 오버라이드와 유효성 검증까지 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LogharvestError> {
        let path = path.as_ref();
        let base = read_table(path)?;
        let mut merged = base;
        if let Some(override_path) = override_path_for(path) {
            let overrides = read_table(&override_path)?;
            if !overrides.is_empty() {
                tracing::debug!(path = %override_path.display(), "applying config overrides");
            }
            merge_tables(&mut merged, overrides);
        }

        let mut config: Self =
            toml::Value::Table(merged)
                .try_into()
                .map_err(|e: toml::de::Error| {
                    LogharvestError::Config(ConfigError::ParseFailed {
                        reason: e.to_string(),
                    })
                })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다 (파일/환경변수 오버라이드 없음).
    pub fn parse(toml_str: &str) -> Result<Self, LogharvestError> {
        toml::from_str(toml_str).map_err(|e| {
            LogharvestError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGHARVEST_{SECTION}_{FIELD}`
    /// 예: `LOGHARVEST_AGGREGATOR_OUTPUT_DIR=out/logs`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "LOGHARVEST_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGHARVEST_GENERAL_LOG_FORMAT");

        override_csv(&mut self.aggregator.sources, "LOGHARVEST_AGGREGATOR_SOURCES");
        override_string(
            &mut self.aggregator.normalize_timestamp,
            "LOGHARVEST_AGGREGATOR_NORMALIZE_TIMESTAMP",
        );
        override_string(
            &mut self.aggregator.timezone,
            "LOGHARVEST_AGGREGATOR_TIMEZONE",
        );
        override_string(
            &mut self.aggregator.output_dir,
            "LOGHARVEST_AGGREGATOR_OUTPUT_DIR",
        );
        override_string(
            &mut self.aggregator.report_dir,
            "LOGHARVEST_AGGREGATOR_REPORT_DIR",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 잘못된 설정은 파이프라인이 시작되기 전에 여기서 치명적 에러로
    /// 차단됩니다.
    pub fn validate(&self) -> Result<(), LogharvestError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.aggregator.output_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "aggregator.output_dir".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        if self.aggregator.report_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "aggregator.report_dir".to_owned(),
                reason: "must not be empty".to_owned(),
            }
            .into());
        }

        // 오프셋 파싱 가능 여부 확인
        self.aggregator.assumed_offset()?;

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 집계 파이프라인 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// 수집 소스 (파일 경로 / 글롭 패턴 / 디렉토리)
    pub sources: Vec<String>,
    /// 타임스탬프 렌더링 모드 (`"UTC"` 외의 값은 원본 오프셋 유지)
    pub normalize_timestamp: String,
    /// 오프셋 없는 타임스탬프에 가정할 시간대 (`"UTC"` 또는 `±HH:MM`)
    pub timezone: String,
    /// 정규화 로그 출력 디렉토리
    pub output_dir: String,
    /// 요약 리포트 디렉토리
    pub report_dir: String,
    /// 커밋 메시지 템플릿 (`{date}` 자리 표시자)
    pub commit_message_format: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            normalize_timestamp: "UTC".to_owned(),
            timezone: "UTC".to_owned(),
            output_dir: "data/logs".to_owned(),
            report_dir: "data/reports".to_owned(),
            commit_message_format: "logs: add {date} aggregated logs".to_owned(),
        }
    }
}

impl AggregatorConfig {
    /// `timezone` 설정을 고정 오프셋으로 파싱합니다.
    pub fn assumed_offset(&self) -> Result<FixedOffset, ConfigError> {
        parse_fixed_offset(&self.timezone).ok_or_else(|| ConfigError::InvalidValue {
            field: "aggregator.timezone".to_owned(),
            reason: format!("'{}' is not 'UTC' or a ±HH:MM offset", self.timezone),
        })
    }

    /// `normalize_timestamp` 설정에서 렌더링 모드를 결정합니다.
    pub fn target_mode(&self) -> TargetMode {
        TargetMode::from_config(&self.normalize_timestamp)
    }

    /// 커밋 메시지 템플릿의 `{date}`를 치환합니다.
    pub fn commit_message(&self, day: &str) -> String {
        self.commit_message_format.replace("{date}", day)
    }
}

/// `"UTC"` 또는 `±HH:MM` 형식의 고정 오프셋을 파싱합니다.
///
/// 시간대 데이터베이스는 사용하지 않으며, 고정 오프셋 모델만 지원합니다.
pub fn parse_fixed_offset(value: &str) -> Option<FixedOffset> {
    if value.eq_ignore_ascii_case("utc") || value == "Z" {
        return FixedOffset::east_opt(0);
    }
    let bytes = value.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1i32,
        b'-' => -1i32,
        _ => return None,
    };
    if bytes[3] != b':' {
        return None;
    }
    let hours: i32 = value[1..3].parse().ok()?;
    let minutes: i32 = value[4..6].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// 기본 설정 파일 옆의 오버라이드 파일 경로를 계산합니다.
///
/// `config/aggregator.toml` → `config/aggregator.override.toml`
fn override_path_for(path: &Path) -> Option<PathBuf> {
    let stem = path.file_stem()?.to_string_lossy();
    Some(path.with_file_name(format!("{stem}.override.toml")))
}

/// TOML 파일을 테이블로 읽습니다. 파일이 없으면 빈 테이블을 반환합니다.
fn read_table(path: &Path) -> Result<toml::Table, LogharvestError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(toml::Table::new()),
        Err(e) => return Err(LogharvestError::Io(e)),
    };
    content.parse::<toml::Table>().map_err(|e| {
        LogharvestError::Config(ConfigError::ParseFailed {
            reason: format!("{}: {e}", path.display()),
        })
    })
}

/// 오버라이드 테이블을 기본 테이블 위에 병합합니다.
///
/// 테이블끼리는 키 단위로 재귀 병합하고, 그 외 값은 오버라이드가 이깁니다.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(base_inner)), toml::Value::Table(override_inner)) => {
                merge_tables(base_inner, override_inner);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val.split(',').map(|s| s.trim().to_owned()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = LogharvestConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert!(config.aggregator.sources.is_empty());
        assert_eq!(config.aggregator.normalize_timestamp, "UTC");
        assert_eq!(config.aggregator.timezone, "UTC");
        assert_eq!(config.aggregator.output_dir, "data/logs");
        assert_eq!(config.aggregator.report_dir, "data/reports");
    }

    #[test]
    fn default_config_passes_validation() {
        LogharvestConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = LogharvestConfig::parse("").unwrap();
        assert_eq!(config.aggregator.output_dir, "data/logs");
    }

    #[test]
    fn parse_partial_toml_merges_with_defaults() {
        let toml = r#"
[aggregator]
sources = ["logs/app.log", "logs/**/*.log"]
timezone = "+09:00"
"#;
        let config = LogharvestConfig::parse(toml).unwrap();
        assert_eq!(config.aggregator.sources.len(), 2);
        assert_eq!(config.aggregator.timezone, "+09:00");
        // 나머지는 기본값 유지
        assert_eq!(config.aggregator.report_dir, "data/reports");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let result = LogharvestConfig::parse("invalid = [[[toml");
        assert!(matches!(
            result.unwrap_err(),
            LogharvestError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn parse_rejects_non_list_sources() {
        let result = LogharvestConfig::parse("[aggregator]\nsources = \"not-a-list\"");
        assert!(matches!(result.unwrap_err(), LogharvestError::Config(_)));
    }

    #[test]
    fn parse_rejects_non_string_output_dir() {
        let result = LogharvestConfig::parse("[aggregator]\noutput_dir = 42");
        assert!(matches!(result.unwrap_err(), LogharvestError::Config(_)));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = LogharvestConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_timezone() {
        let mut config = LogharvestConfig::default();
        config.aggregator.timezone = "Mars/Olympus".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timezone"));
    }

    #[test]
    fn validate_rejects_empty_output_dir() {
        let mut config = LogharvestConfig::default();
        config.aggregator.output_dir = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output_dir"));
    }

    #[test]
    fn parse_fixed_offset_variants() {
        assert_eq!(
            parse_fixed_offset("UTC"),
            Some(FixedOffset::east_opt(0).unwrap())
        );
        assert_eq!(
            parse_fixed_offset("+09:00"),
            Some(FixedOffset::east_opt(9 * 3600).unwrap())
        );
        assert_eq!(
            parse_fixed_offset("-05:30"),
            Some(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(parse_fixed_offset("09:00"), None);
        assert_eq!(parse_fixed_offset("+9:00"), None);
        assert_eq!(parse_fixed_offset("+00:99"), None);
    }

    #[test]
    fn commit_message_replaces_date() {
        let config = AggregatorConfig::default();
        assert_eq!(
            config.commit_message("2026-01-15"),
            "logs: add 2026-01-15 aggregated logs"
        );
    }

    #[test]
    fn load_missing_files_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LogharvestConfig::load(dir.path().join("aggregator.toml")).unwrap();
        assert_eq!(config.aggregator.output_dir, "data/logs");
    }

    #[test]
    fn load_merges_override_file_per_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path().join("aggregator.toml");
        std::fs::write(
            &base,
            "[aggregator]\noutput_dir = \"base/logs\"\nreport_dir = \"base/reports\"\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("aggregator.override.toml"),
            "[aggregator]\noutput_dir = \"override/logs\"\n",
        )
        .unwrap();

        let config = LogharvestConfig::load(&base).unwrap();
        // 오버라이드된 키만 바뀌고 나머지 기본 파일 값 유지
        assert_eq!(config.aggregator.output_dir, "override/logs");
        assert_eq!(config.aggregator.report_dir, "base/reports");
    }

    #[test]
    fn load_malformed_base_is_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let base = dir.path().join("aggregator.toml");
        std::fs::write(&base, "sources = [[[").unwrap();
        assert!(LogharvestConfig::load(&base).is_err());
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut config = LogharvestConfig::default();
        // SAFETY: 테스트는 serial_test로 직렬화되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("LOGHARVEST_AGGREGATOR_TIMEZONE", "+02:00") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("LOGHARVEST_AGGREGATOR_TIMEZONE") };
        assert_eq!(config.aggregator.timezone, "+02:00");
    }

    #[test]
    #[serial]
    fn env_override_csv_sources() {
        let mut config = LogharvestConfig::default();
        // SAFETY: 테스트는 serial_test로 직렬화되므로 환경변수 조작이 안전합니다.
        unsafe { std::env::set_var("LOGHARVEST_AGGREGATOR_SOURCES", "a.log, b/**/*.log") };
        config.apply_env_overrides();
        unsafe { std::env::remove_var("LOGHARVEST_AGGREGATOR_SOURCES") };
        assert_eq!(config.aggregator.sources, vec!["a.log", "b/**/*.log"]);
    }

    #[test]
    #[serial]
    fn env_override_missing_var_keeps_original() {
        let mut config = LogharvestConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.aggregator.timezone, "UTC");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = LogharvestConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = LogharvestConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(
            config.aggregator.commit_message_format,
            parsed.aggregator.commit_message_format
        );
    }
}
