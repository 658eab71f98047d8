//! 도메인 타입 — 시스템 전역에서 사용되는 공통 타입
//!
//! 모든 파이프라인 단계가 공유하는 데이터 구조를 정의합니다.
//! 각 단계는 이 타입들을 사용하여 수집/정규화/저장/분석 결과를 교환합니다.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// 심각도 레벨
///
/// 로그 라인에 부여되는 고정 카테고리 집합입니다.
/// 토큰 매칭은 대소문자를 구분하지 않으며, `WARNING`은 `Warn`으로 정규화됩니다.
/// 인식된 토큰이 없는 라인은 기본값 `Info`를 받습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// 에러
    Error,
    /// 경고 (`WARNING`도 여기로 정규화)
    Warn,
    /// 정보성 — 기본값
    #[default]
    Info,
    /// 디버그
    Debug,
    /// 치명적
    Critical,
}

impl Severity {
    /// 단일 토큰에서 심각도를 파싱합니다.
    ///
    /// 대소문자를 구분하지 않으며 `WARNING`은 [`Severity::Warn`]으로 매핑됩니다.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("error") {
            Some(Self::Error)
        } else if token.eq_ignore_ascii_case("warn") || token.eq_ignore_ascii_case("warning") {
            Some(Self::Warn)
        } else if token.eq_ignore_ascii_case("info") {
            Some(Self::Info)
        } else if token.eq_ignore_ascii_case("debug") {
            Some(Self::Debug)
        } else if token.eq_ignore_ascii_case("critical") {
            Some(Self::Critical)
        } else {
            None
        }
    }

    /// 메시지 텍스트에서 첫 번째 완전 단어(whole-word) 심각도 토큰을 찾습니다.
    ///
    /// 단어는 영숫자와 `_`의 최대 연속 구간입니다. `WARNs`처럼 토큰이 더 긴
    /// 단어의 일부인 경우는 매칭되지 않습니다. 찾지 못하면 `None`을 반환하며,
    /// 호출자는 기본값 `Info`를 적용합니다.
    pub fn scan_message(text: &str) -> Option<Self> {
        let mut start = None;
        for (idx, ch) in text.char_indices() {
            let is_word = ch.is_alphanumeric() || ch == '_';
            match (start, is_word) {
                (None, true) => start = Some(idx),
                (Some(s), false) => {
                    if let Some(sev) = Self::from_token(&text[s..idx]) {
                        return Some(sev);
                    }
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            return Self::from_token(&text[s..]);
        }
        None
    }

    /// 정규화 출력에 쓰이는 대문자 표기를 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 타임스탬프 렌더링 대상 모드
///
/// `UTC`는 모든 타임스탬프를 UTC로 변환하여 `Z` 접미사로 렌더링합니다.
/// `Local`은 라인이 가진 오프셋(명시 오프셋 또는 가정 오프셋)을 유지하며
/// 숫자 오프셋으로 렌더링합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetMode {
    /// UTC로 변환, `Z` 접미사
    Utc,
    /// 원본 오프셋 유지, `±HH:MM` 접미사
    Local,
}

impl TargetMode {
    /// 설정 문자열에서 모드를 결정합니다.
    ///
    /// `"UTC"`(대소문자 무관)만 UTC 모드이며, 그 외 값은 모두 Local로
    /// 취급합니다.
    pub fn from_config(value: &str) -> Self {
        if value.eq_ignore_ascii_case("utc") {
            Self::Utc
        } else {
            Self::Local
        }
    }
}

/// 논리 소스 이름
///
/// 파일의 상위 디렉토리 이름과 stem을 `_`로 이어 붙인 뒤 영숫자/`-`/`_`만
/// 남기도록 정제한 값입니다. 서로 다른 파일이 같은 이름을 도출하면
/// 한 논리 소스로 병합됩니다(의도된 동작).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceName(String);

impl SourceName {
    /// 임의 문자열을 정제하여 소스 이름을 만듭니다.
    ///
    /// 허용 문자(영숫자, `-`, `_`) 외에는 전부 `_`로 치환하며,
    /// 빈 결과는 `unknown`이 됩니다.
    pub fn new(raw: &str) -> Self {
        let safe: String = raw
            .chars()
            .map(|ch| {
                if ch.is_alphanumeric() || ch == '-' || ch == '_' {
                    ch
                } else {
                    '_'
                }
            })
            .collect();
        if safe.is_empty() {
            Self("unknown".to_owned())
        } else {
            Self(safe)
        }
    }

    /// 파일 경로에서 소스 이름을 도출합니다.
    ///
    /// 예: `/var/log/app/app1.log` → `app_app1`
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parent = path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if parent.is_empty() {
            Self::new(&stem)
        } else {
            Self::new(&format!("{parent}_{stem}"))
        }
    }

    /// 내부 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 파일별 심각도 출현 카운터
///
/// 분석 단계에서 라인마다 `ERROR`/`WARN`/`INFO` 부분 문자열 존재 여부를
/// 독립적으로 검사하여 증가시킵니다. 한 라인이 세 키워드를 모두 포함하면
/// 세 카운터가 모두 증가합니다 — 단순 부분 문자열 검사에서 비롯된 동작이지만
/// 기존 동작을 그대로 유지합니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounter {
    /// `ERROR` 부분 문자열을 포함한 라인 수
    pub errors: u64,
    /// `WARN` 부분 문자열을 포함한 라인 수
    pub warnings: u64,
    /// `INFO` 부분 문자열을 포함한 라인 수
    pub info: u64,
}

impl SummaryCounter {
    /// 한 라인을 검사하여 해당하는 카운터를 증가시킵니다.
    pub fn count_line(&mut self, line: &str) {
        if line.contains("ERROR") {
            self.errors += 1;
        }
        if line.contains("WARN") {
            self.warnings += 1;
        }
        if line.contains("INFO") {
            self.info += 1;
        }
    }
}

impl fmt::Display for SummaryCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} errors, {} warnings, {} info",
            self.errors, self.warnings, self.info,
        )
    }
}
