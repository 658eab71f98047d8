//! 집계 파이프라인 에러 타입

use std::path::PathBuf;

use thiserror::Error;

use logharvest_core::error::LogharvestError;

/// 집계 단계에서 발생하는 에러
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// 정규화된 로그 기록 실패
    #[error("failed to store log at {path}: {reason}")]
    Store { path: PathBuf, reason: String },

    /// 요약 리포트 기록 실패
    #[error("failed to write report at {path}: {reason}")]
    Report { path: PathBuf, reason: String },

    /// 코어 계층에서 전파된 에러
    #[error(transparent)]
    Core(#[from] LogharvestError),
}
