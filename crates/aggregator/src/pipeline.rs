//! 파이프라인 오케스트레이터
//!
//! 수집, 정규화, 저장, 분석, 리포트 기록을 이 순서로 단일 스레드에서
//! 실행합니다. 각 단계의 출력이 다음 단계의 입력이며, 선택적 게시 단계는
//! 실패해도 파이프라인을 중단시키지 않습니다.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use logharvest_core::config::AggregatorConfig;
use logharvest_core::error::LogharvestError;
use logharvest_core::pipeline::{ArtifactPublisher, Clock};
use logharvest_core::types::{SourceName, SummaryCounter};

use crate::analyze::{analyze_files, stored_daily_logs, write_summary};
use crate::collect::collect_sources;
use crate::error::AggregatorError;
use crate::normalize::Normalizer;
use crate::publish::describe_exit;
use crate::store::store_normalized;

/// 게시 단계 결과
#[derive(Debug, Clone, Serialize)]
pub struct PublishOutcome {
    /// `git add`와 `git commit`이 모두 0으로 종료했는지 여부
    pub ok: bool,
    /// 사람이 읽을 한 줄 설명
    pub detail: String,
}

/// 전체 파이프라인 실행 결과
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    /// 실행 일자 (`YYYY-MM-DD`)
    pub day: String,
    /// 소스별 수집 라인 수
    pub source_lines: BTreeMap<SourceName, usize>,
    /// 기록된 일자별 로그 파일 경로
    pub written: Vec<PathBuf>,
    /// 요약 리포트 경로
    pub summary_path: PathBuf,
    /// 파일별 심각도 집계
    pub analysis: BTreeMap<String, SummaryCounter>,
    /// 게시 단계 결과, 게시를 요청하지 않았으면 `None`
    pub publish: Option<PublishOutcome>,
}

/// 파이프라인을 처음부터 끝까지 실행합니다.
///
/// `publisher`가 `Some`이면 저장 로그와 요약 리포트를 스테이징하고 설정된
/// 메시지 형식으로 커밋합니다. 게시 실패는 경고로 기록될 뿐 에러로
/// 전파되지 않습니다.
pub fn run_pipeline<C: Clock>(
    config: &AggregatorConfig,
    clock: &C,
    publisher: Option<&dyn ArtifactPublisher>,
) -> Result<PipelineReport, AggregatorError> {
    let day = clock.now().format("%Y-%m-%d").to_string();
    info!(%day, sources = config.sources.len(), "starting aggregation pipeline");

    let collected = collect_sources(&config.sources);
    let source_lines: BTreeMap<SourceName, usize> = collected
        .iter()
        .map(|(name, lines)| (name.clone(), lines.len()))
        .collect();
    info!(sources = collected.len(), "collected sources");

    let normalizer = Normalizer::new(
        config.assumed_offset().map_err(LogharvestError::from)?,
        config.target_mode(),
        clock,
    );
    let normalized: BTreeMap<SourceName, Vec<String>> = collected
        .iter()
        .map(|(name, lines)| (name.clone(), normalizer.normalize_lines(lines)))
        .collect();

    let output_dir = PathBuf::from(&config.output_dir);
    let written = store_normalized(&output_dir, &day, &normalized)?;

    // 방금 쓴 파일만이 아니라 해당 일자의 저장 파일 전체를 분석 대상으로 삼음
    let stored = stored_daily_logs(&output_dir, &day)?;
    let analysis = analyze_files(&stored);
    let report_dir = PathBuf::from(&config.report_dir);
    let summary_path = write_summary(&report_dir, &day, &analysis)?;
    info!(summary = %summary_path.display(), files = written.len(), "pipeline complete");

    let publish = publisher.map(|p| {
        let mut artifacts = written.clone();
        artifacts.push(summary_path.clone());
        publish_artifacts(p, &artifacts, &config.commit_message(&day))
    });

    Ok(PipelineReport {
        day,
        source_lines,
        written,
        summary_path,
        analysis,
        publish,
    })
}

/// 산출물을 스테이징하고 커밋합니다.
///
/// 스테이징 종료 코드와 무관하게 커밋까지 시도하며, 둘 다 0일 때만
/// 성공으로 봅니다. 어느 쪽이든 문제가 있으면 경고만 남깁니다.
fn publish_artifacts(
    publisher: &dyn ArtifactPublisher,
    artifacts: &[PathBuf],
    message: &str,
) -> PublishOutcome {
    let stage_code = match publisher.stage(artifacts) {
        Ok(code) => code,
        Err(e) => {
            warn!(publisher = publisher.name(), error = %e, "failed to run stage");
            return PublishOutcome {
                ok: false,
                detail: format!("stage failed to run: {e}"),
            };
        }
    };
    let commit_code = match publisher.commit(message) {
        Ok(code) => code,
        Err(e) => {
            warn!(publisher = publisher.name(), error = %e, "failed to run commit");
            return PublishOutcome {
                ok: false,
                detail: format!("commit failed to run: {e}"),
            };
        }
    };

    let ok = stage_code == 0 && commit_code == 0;
    let detail = describe_exit(stage_code, commit_code);
    if ok {
        info!(publisher = publisher.name(), message, "published artifacts");
    } else {
        warn!(publisher = publisher.name(), %detail, "publish did not complete cleanly");
    }
    PublishOutcome { ok, detail }
}
