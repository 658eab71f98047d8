//! 파이프라인 trait — 단계 간 확장 포인트 정의
//!
//! 전역 상태 대신 명시적 capability를 주입합니다. 현재 시각은 [`Clock`]으로,
//! 버전 관리 부수효과는 [`ArtifactPublisher`]로 추상화되어 테스트에서
//! 결정적 구현으로 대체할 수 있습니다.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::error::LogharvestError;

/// 현재 시각 공급자
///
/// 정규화 엔진은 타임스탬프가 없는 라인에 "지금"을 합성해야 하므로,
/// 전역 시계 대신 이 trait을 주입받습니다.
pub trait Clock {
    /// 현재 시각 (UTC)
    fn now(&self) -> DateTime<Utc>;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// 시스템 시계, 프로덕션 기본 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 고정 시계 — 결정적 테스트용 구현
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 산출물 퍼블리셔 — 버전 관리 부수효과의 추상화
///
/// 구체 구현은 외부 프로세스를 호출하지만, 오케스트레이터는 이 trait에만
/// 의존합니다. 두 연산 모두 하위 프로세스의 종료 코드를 반환하며,
/// 0이 아닌 코드는 호출자가 경고로 강등합니다 — 파이프라인 실패로
/// 승격되지 않습니다.
pub trait ArtifactPublisher {
    /// 퍼블리셔 이름 (로그 식별용)
    fn name(&self) -> &str;

    /// 산출물 경로들을 스테이징합니다. 종료 코드를 반환합니다.
    fn stage(&self, paths: &[PathBuf]) -> Result<i32, LogharvestError>;

    /// 스테이징된 산출물을 주어진 메시지로 커밋합니다. 종료 코드를 반환합니다.
    fn commit(&self, message: &str) -> Result<i32, LogharvestError>;
}
