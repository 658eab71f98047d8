//! Logharvest 공통 크레이트 — 타입, 에러, 설정, 확장 trait
//!
//! # 모듈 구성
//!
//! - [`types`]: 도메인 타입 (심각도, 소스 이름, 요약 카운터, 렌더링 모드)
//! - [`error`]: 에러 타입 (설정/I-O)
//! - [`config`]: `aggregator.toml` 설정 로딩, 병합, 검증
//! - [`pipeline`]: 확장 trait (시계 주입, 산출물 퍼블리셔)

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---

// 에러
pub use error::{ConfigError, LogharvestError};

// 설정
pub use config::LogharvestConfig;

// 파이프라인 trait
pub use pipeline::{ArtifactPublisher, Clock, FixedClock, SystemClock};

// 도메인 타입
pub use types::{Severity, SourceName, SummaryCounter, TargetMode};
