//! 정규화 엔진 — 느슨한 로그 라인을 정식 형태로 변환
//!
//! 각 원시 라인을 `<ISO8601 타임스탬프> <심각도> <메시지>` 형태의 단일
//! 문자열로 정규화합니다. 타임스탬프가 없거나 깨진 라인은 주입된
//! [`Clock`]의 "지금"으로 합성하고, 심각도 토큰이 없으면 `INFO`를
//! 부여합니다. 어떤 입력도 라인을 버리거나 병합하지 않으며, 엔진 밖으로
//! 에러를 전파하지 않습니다.
//!
//! # 타임스탬프 문법
//! ```text
//! YYYY-MM-DD(' '|'T')HH:MM:SS[.d{1,6}][Z|±HH:MM]
//! ```
//! 문법 매칭은 백트래킹 정규식 대신 단일 전진 스캐너로 수행하며,
//! 결과는 [`TimestampScan`] 태그 변형으로 표현됩니다.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use logharvest_core::config::LogharvestConfig;
use logharvest_core::error::LogharvestError;
use logharvest_core::pipeline::{Clock, SystemClock};
use logharvest_core::types::{Severity, TargetMode};

/// 선두 타임스탬프 스캔 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampScan<'a> {
    /// 문법에 맞는 타임스탬프 접두사를 찾음
    Matched {
        /// 매칭된 타임스탬프 부분 문자열
        timestamp: &'a str,
        /// 타임스탬프 이후의 나머지 (메시지 후보)
        rest: &'a str,
    },
    /// 타임스탬프 접두사 없음 — 라인 전체가 메시지
    Unmatched,
}

/// 정규화 엔진
///
/// 오프셋 없는 타임스탬프는 `assumed_offset`의 벽시계 시각으로 해석하고,
/// 출력은 `target`( UTC 변환 또는 원본 오프셋 유지)으로 렌더링합니다.
/// 현재 시각은 [`Clock`]으로 주입받아 테스트에서 결정적으로 만들 수
/// 있습니다.
pub struct Normalizer<C: Clock> {
    /// 오프셋 없는 타임스탬프에 가정할 시간대
    assumed_offset: FixedOffset,
    /// 렌더링 대상 모드
    target: TargetMode,
    /// 현재 시각 공급자
    clock: C,
}

impl Normalizer<SystemClock> {
    /// 설정에서 시스템 시계를 쓰는 엔진을 만듭니다.
    pub fn from_config(config: &LogharvestConfig) -> Result<Self, LogharvestError> {
        let assumed_offset = config.aggregator.assumed_offset()?;
        Ok(Self::new(
            assumed_offset,
            config.aggregator.target_mode(),
            SystemClock,
        ))
    }
}

impl<C: Clock> Normalizer<C> {
    /// 새 정규화 엔진을 생성합니다.
    pub fn new(assumed_offset: FixedOffset, target: TargetMode, clock: C) -> Self {
        Self {
            assumed_offset,
            target,
            clock,
        }
    }

    /// 라인 시퀀스를 정규화합니다.
    ///
    /// 입력 라인당 정확히 하나의 출력 라인을 같은 순서로 반환합니다.
    pub fn normalize_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines
            .iter()
            .map(|line| self.normalize_line(line.as_ref()))
            .collect()
    }

    /// 단일 라인을 정규화합니다.
    pub fn normalize_line(&self, raw: &str) -> String {
        let line = raw.trim_end_matches(['\n', '\r']);

        let (instant, message) = match scan_timestamp(line) {
            TimestampScan::Matched { timestamp, rest } => {
                // 문법은 맞지만 달력상 불가능한 값(13월 등)은 여기서 실패하며,
                // 합성 "지금"으로 복구합니다. 에러로 전파하지 않습니다.
                let instant = parse_timestamp(timestamp, self.assumed_offset)
                    .unwrap_or_else(|| self.synthesized_now());
                (instant, rest.trim())
            }
            // 매칭 실패 시 라인 전체가 메시지. 들여쓰기는 보존하되,
            // 공백만 있는 라인은 빈 메시지로 정규화합니다.
            TimestampScan::Unmatched => {
                let message = if line.trim().is_empty() { "" } else { line };
                (self.synthesized_now(), message)
            }
        };

        // 첫 번째 완전 단어 토큰이 이기며, 없으면 INFO.
        // 매칭된 토큰은 메시지에서 제거하지 않고 그대로 둡니다.
        let severity = Severity::scan_message(message).unwrap_or_default();

        format!(
            "{} {} {}",
            render_timestamp(&instant, self.target),
            severity,
            message,
        )
    }

    /// 파싱 불가 라인에 쓸 "지금"을 가정 오프셋으로 합성합니다.
    ///
    /// 라인마다 새로 읽으므로 각 라인이 서로 다른 시각을 받을 수 있습니다
    /// (단조 증가는 보장하지 않음).
    fn synthesized_now(&self) -> DateTime<FixedOffset> {
        self.clock.now().with_timezone(&self.assumed_offset)
    }
}

/// 라인 선두에서 타임스탬프 문법을 스캔합니다.
///
/// 날짜/시각 본체가 맞으면 선택 요소(소수부, 오프셋)를 최대한 소비하고,
/// 그 지점까지를 타임스탬프로, 나머지를 메시지 후보로 반환합니다.
/// 선택 요소가 문법에 어긋나면 해당 문자부터는 메시지에 남습니다.
pub fn scan_timestamp(line: &str) -> TimestampScan<'_> {
    let b = line.as_bytes();
    if b.len() < 19 {
        return TimestampScan::Unmatched;
    }

    // YYYY-MM-DD
    if !(all_digits(&b[0..4])
        && b[4] == b'-'
        && all_digits(&b[5..7])
        && b[7] == b'-'
        && all_digits(&b[8..10]))
    {
        return TimestampScan::Unmatched;
    }
    if b[10] != b' ' && b[10] != b'T' {
        return TimestampScan::Unmatched;
    }
    // HH:MM:SS
    if !(all_digits(&b[11..13])
        && b[13] == b':'
        && all_digits(&b[14..16])
        && b[16] == b':'
        && all_digits(&b[17..19]))
    {
        return TimestampScan::Unmatched;
    }

    let mut pos = 19;

    // 선택: '.' + 1~6자리 소수부
    if pos + 1 < b.len() && b[pos] == b'.' && b[pos + 1].is_ascii_digit() {
        pos += 1;
        let mut taken = 0;
        while pos < b.len() && b[pos].is_ascii_digit() && taken < 6 {
            pos += 1;
            taken += 1;
        }
    }

    // 선택: 'Z' 또는 ±HH:MM
    if pos < b.len() {
        if b[pos] == b'Z' {
            pos += 1;
        } else if (b[pos] == b'+' || b[pos] == b'-')
            && pos + 6 <= b.len()
            && all_digits(&b[pos + 1..pos + 3])
            && b[pos + 3] == b':'
            && all_digits(&b[pos + 4..pos + 6])
        {
            pos += 6;
        }
    }

    TimestampScan::Matched {
        timestamp: &line[..pos],
        rest: &line[pos..],
    }
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// 스캔된 타임스탬프 부분 문자열을 구체적 시각으로 파싱합니다.
///
/// 명시적 `Z`/오프셋은 문자 그대로 해석하고, 오프셋이 없으면
/// `assumed_offset`의 벽시계 시각으로 해석합니다. 달력상 불가능한 값은
/// `None`을 반환합니다.
fn parse_timestamp(ts: &str, assumed_offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let year: i32 = ts.get(0..4)?.parse().ok()?;
    let month: u32 = ts.get(5..7)?.parse().ok()?;
    let day: u32 = ts.get(8..10)?.parse().ok()?;
    let hour: u32 = ts.get(11..13)?.parse().ok()?;
    let minute: u32 = ts.get(14..16)?.parse().ok()?;
    let second: u32 = ts.get(17..19)?.parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    let naive = NaiveDateTime::new(date, time);

    let offset = parse_offset_suffix(ts)?.unwrap_or(assumed_offset);
    naive.and_local_timezone(offset).single()
}

/// 타임스탬프 꼬리의 명시적 오프셋을 파싱합니다.
///
/// `Some(Some(_))`는 명시적 오프셋, `Some(None)`은 오프셋 없음,
/// `None`은 범위를 벗어난 오프셋(파싱 실패로 취급)입니다.
fn parse_offset_suffix(ts: &str) -> Option<Option<FixedOffset>> {
    if ts.ends_with('Z') {
        return FixedOffset::east_opt(0).map(Some);
    }
    let b = ts.as_bytes();
    if b.len() >= 25 && (b[b.len() - 6] == b'+' || b[b.len() - 6] == b'-') {
        let tail = &ts[ts.len() - 6..];
        let sign: i32 = if tail.starts_with('+') { 1 } else { -1 };
        let hours: i32 = tail[1..3].parse().ok()?;
        let minutes: i32 = tail[4..6].parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
        return Some(Some(offset));
    }
    Some(None)
}

/// 시각을 대상 모드로 렌더링합니다. 항상 초 단위 정밀도입니다.
///
/// UTC 모드는 `Z` 접미사로, Local 모드는 라인이 가진 오프셋을 유지한
/// 숫자 접미사로 렌더링하되, 오프셋이 0이면 `Z`로 축약합니다.
fn render_timestamp(instant: &DateTime<FixedOffset>, target: TargetMode) -> String {
    match target {
        TargetMode::Utc => instant
            .with_timezone(&Utc)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string(),
        TargetMode::Local => {
            if instant.offset().local_minus_utc() == 0 {
                instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
            } else {
                instant.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
            }
        }
    }
}
