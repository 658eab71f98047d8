//! 분석기 — 저장된 로그 파일별 심각도 건수 집계와 일자별 요약 리포트
//!
//! 집계는 라인당 `ERROR`/`WARN`/`INFO` 부분 문자열 포함 여부를 각각
//! 독립적으로 검사합니다. 한 라인이 여러 토큰을 담으면 각 카운터가 모두
//! 증가하며, `WARNING`은 부분 문자열 규칙에 따라 `WARN`으로도 집계됩니다.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use logharvest_core::types::SummaryCounter;

use crate::error::AggregatorError;

/// 로그 파일 목록을 분석해 `{파일 이름: 카운터}` 매핑을 반환합니다.
///
/// 존재하지 않거나 일반 파일이 아닌 경로는 경고 후 건너뜁니다.
pub fn analyze_files(paths: &[PathBuf]) -> BTreeMap<String, SummaryCounter> {
    let mut analysis = BTreeMap::new();

    for path in paths {
        if !path.is_file() {
            warn!(path = %path.display(), "not a regular file, skipping analysis");
            continue;
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read log file, skipping");
                continue;
            }
        };

        let mut counter = SummaryCounter::default();
        for line in content.lines() {
            counter.count_line(line);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!(file = %name, %counter, "analyzed log file");
        analysis.insert(name, counter);
    }

    analysis
}

/// 출력 디렉토리에서 해당 일자의 `<day>_*.log` 파일을 정렬하여 나열합니다.
///
/// 출력 디렉토리가 아직 없으면 저장된 것이 없다는 뜻이므로 빈 목록을
/// 반환합니다.
pub fn stored_daily_logs(output_dir: &Path, day: &str) -> Result<Vec<PathBuf>, AggregatorError> {
    let entries = match fs::read_dir(output_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AggregatorError::Core(e.into())),
    };

    let prefix = format!("{day}_");
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".log"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// 분석 결과를 `summary-<day>.txt` 리포트로 기록하고 경로를 반환합니다.
///
/// 리포트는 `{day} Summary:` 헤더 뒤에 파일 이름 순으로 한 줄씩
/// `<파일>: N errors, N warnings, N info` 형식으로 이어집니다.
pub fn write_summary(
    report_dir: &Path,
    day: &str,
    analysis: &BTreeMap<String, SummaryCounter>,
) -> Result<PathBuf, AggregatorError> {
    fs::create_dir_all(report_dir).map_err(|e| AggregatorError::Report {
        path: report_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut report = format!("{day} Summary:\n");
    for (file, counter) in analysis {
        report.push_str(&format!("{file}: {counter}\n"));
    }

    let path = report_dir.join(format!("summary-{day}.txt"));
    fs::write(&path, report).map_err(|e| AggregatorError::Report {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(path)
}
