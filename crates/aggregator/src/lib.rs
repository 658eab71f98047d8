//! logharvest-aggregator: 로그 수집/정규화/집계 파이프라인
//!
//! 설정된 소스에서 원시 로그 라인을 모아 타임스탬프와 심각도를 정규화하고,
//! 일자별 파일로 저장한 뒤 심각도 요약 리포트를 생성합니다. 선택적으로
//! 산출물을 git에 커밋합니다.
//!
//! 단계별 모듈:
//! - [`collect`]: 소스 스펙(파일/글롭/디렉토리)을 라인 묶음으로 해석
//! - [`normalize`]: 타임스탬프/심각도 정규화 엔진
//! - [`store`]: `<day>_<source>.log` 일자별 저장
//! - [`analyze`]: 심각도 집계와 요약 리포트
//! - [`publish`]: git 기반 산출물 게시
//! - [`pipeline`]: 전 단계를 순서대로 실행하는 오케스트레이터

pub mod analyze;
pub mod collect;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod publish;
pub mod store;

pub use analyze::{analyze_files, stored_daily_logs, write_summary};
pub use collect::collect_sources;
pub use error::AggregatorError;
pub use normalize::{Normalizer, TimestampScan, scan_timestamp};
pub use pipeline::{PipelineReport, PublishOutcome, run_pipeline};
pub use publish::GitPublisher;
pub use store::store_normalized;
