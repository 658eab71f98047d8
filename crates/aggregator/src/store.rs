//! 스토어 기록기 — 정규화된 라인을 일자별 파일로 영속화
//!
//! 각 소스는 `<day>_<source>.log` 파일 하나로 기록되며, 같은 날 다시
//! 실행하면 기존 파일을 통째로 덮어씁니다(부분 추가 없음).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use logharvest_core::types::SourceName;

use crate::error::AggregatorError;

/// 소스별 정규화 라인을 출력 디렉토리에 기록하고 생성된 경로를 반환합니다.
///
/// 출력 디렉토리는 없으면 생성합니다. 라인이 하나라도 있으면 파일은
/// 개행으로 끝나고, 빈 소스는 빈 파일이 됩니다. 반환 경로는 소스 이름
/// 순으로 정렬되어 있습니다.
pub fn store_normalized(
    output_dir: &Path,
    day: &str,
    normalized: &BTreeMap<SourceName, Vec<String>>,
) -> Result<Vec<PathBuf>, AggregatorError> {
    fs::create_dir_all(output_dir).map_err(|e| AggregatorError::Store {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut written = Vec::with_capacity(normalized.len());
    for (source, lines) in normalized {
        let path = output_dir.join(format!("{day}_{source}.log"));
        let mut content = lines.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        fs::write(&path, content).map_err(|e| AggregatorError::Store {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        info!(path = %path.display(), lines = lines.len(), "stored normalized log");
        written.push(path);
    }

    Ok(written)
}
