//! 소스 열거기 — 경로/글롭/디렉토리 스펙을 원시 라인 묶음으로 해석
//!
//! 설정의 각 소스 스펙을 다음 규칙으로 확장합니다.
//! - 글롭 메타문자(`*`, `?`, `[`) 포함 → 재귀 글롭 확장, 일반 파일만 포함
//! - 존재하는 일반 파일 → 그대로 포함
//! - 존재하는 디렉토리 → 재귀 탐색, 확장자가 `.log`/`.txt`(대소문자 무관)인
//!   일반 파일 포함
//! - 존재하지 않는 경로 → 조용히 건너뜀 (소스는 파일 생성 전에 미리 설정될
//!   수 있으므로 에러가 아님)
//!
//! 같은 소스 이름을 도출하는 파일들은 한 논리 소스로 병합되며,
//! 나중 파일의 라인이 앞 파일 뒤에 이어 붙습니다.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use logharvest_core::types::SourceName;

/// 디렉토리 스펙에서 수집 대상으로 인정되는 확장자
const LOG_EXTENSIONS: [&str; 2] = ["log", "txt"];

/// 소스 스펙 목록을 `{소스 이름: 라인들}` 매핑으로 해석합니다.
///
/// 라인은 파일 순서, 파일 내 라인 순서를 유지합니다. 읽을 수 없는 파일은
/// 경고 후 건너뛰며, 이 함수는 실패하지 않습니다.
pub fn collect_sources(specs: &[String]) -> BTreeMap<SourceName, Vec<String>> {
    let mut collected: BTreeMap<SourceName, Vec<String>> = BTreeMap::new();

    for spec in specs {
        for path in files_for_spec(spec) {
            let name = SourceName::from_path(&path);
            let Some(lines) = read_lines(&path) else {
                continue;
            };
            debug!(source = %name, path = %path.display(), lines = lines.len(), "collected file");
            collected.entry(name).or_default().extend(lines);
        }
    }

    collected
}

/// 스펙에 글롭 메타문자가 있는지 검사합니다.
fn is_glob(spec: &str) -> bool {
    spec.contains(['*', '?', '['])
}

/// 단일 스펙을 구체적 파일 경로 목록으로 확장합니다.
fn files_for_spec(spec: &str) -> Vec<PathBuf> {
    if is_glob(spec) {
        let paths = match glob::glob(spec) {
            Ok(paths) => paths,
            Err(e) => {
                warn!(spec, error = %e, "invalid glob pattern, skipping");
                return Vec::new();
            }
        };
        return paths
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
    }

    let path = Path::new(spec);
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if path.is_dir() {
        let mut files: Vec<PathBuf> = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file() && has_log_extension(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        files.sort();
        return files;
    }

    // 존재하지 않는 경로는 에러가 아님
    debug!(spec, "source does not exist yet, skipping");
    Vec::new()
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            LOG_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 파일을 라인 목록으로 읽습니다.
///
/// UTF-8로 디코딩하되 유효하지 않은 시퀀스는 대체 문자(U+FFFD)로
/// 치환합니다. 읽기 자체가 실패하면 레거시 단일 바이트 인코딩(Latin-1)으로
/// 한 번 더 시도하고, 그래도 실패하면 경고 후 건너뜁니다.
fn read_lines(path: &Path) -> Option<Vec<String>> {
    let text = match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(first) => match fs::read(path) {
            Ok(bytes) => decode_latin1(&bytes),
            Err(_) => {
                warn!(path = %path.display(), error = %first, "failed to read source file, skipping");
                return None;
            }
        },
    };
    Some(text.lines().map(str::to_owned).collect())
}

/// Latin-1 폴백 디코딩 — 모든 바이트가 유효하므로 실패하지 않습니다.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn is_glob_detects_metacharacters() {
        assert!(is_glob("logs/*.log"));
        assert!(is_glob("logs/app?.log"));
        assert!(is_glob("logs/app[12].log"));
        assert!(!is_glob("logs/app.log"));
    }

    #[test]
    fn direct_file_spec_is_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "app/app1.log", "one\ntwo\n");
        let collected = collect_sources(&[path.display().to_string()]);
        assert_eq!(collected.len(), 1);
        let lines = collected.get(&SourceName::new("app_app1")).unwrap();
        assert_eq!(lines, &vec!["one".to_owned(), "two".to_owned()]);
    }

    #[test]
    fn directory_spec_collects_log_and_txt() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "srv/app1.log", "a\n");
        write_file(dir.path(), "srv/app2.txt", "b\n");
        write_file(dir.path(), "srv/notes.md", "ignored\n");

        let collected = collect_sources(&[dir.path().join("srv").display().to_string()]);
        assert_eq!(collected.len(), 2);
        assert_eq!(
            collected.get(&SourceName::new("srv_app1")).unwrap(),
            &vec!["a".to_owned()]
        );
        assert_eq!(
            collected.get(&SourceName::new("srv_app2")).unwrap(),
            &vec!["b".to_owned()]
        );
    }

    #[test]
    fn directory_extension_match_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "srv/APP.LOG", "upper\n");
        let collected = collect_sources(&[dir.path().join("srv").display().to_string()]);
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn recursive_glob_spans_subdirectories() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a/one.log", "line-a\n");
        write_file(dir.path(), "b/two.log", "line-b\n");

        let pattern = format!("{}/**/*.log", dir.path().display());
        let collected = collect_sources(&[pattern]);
        let total: usize = collected.values().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn glob_ignores_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("x.log")).unwrap();
        write_file(dir.path(), "y.log", "line\n");
        let pattern = format!("{}/*.log", dir.path().display());
        let collected = collect_sources(&[pattern]);
        let total: usize = collected.values().map(Vec::len).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn missing_spec_is_silently_skipped() {
        let collected = collect_sources(&["/nonexistent/path/app.log".to_owned()]);
        assert!(collected.is_empty());
    }

    #[test]
    fn colliding_names_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let first = write_file(dir.path(), "one/app/x.log", "first\n");
        let second = write_file(dir.path(), "two/app/x.log", "second\n");

        let collected =
            collect_sources(&[first.display().to_string(), second.display().to_string()]);
        assert_eq!(collected.len(), 1);
        let lines = collected.get(&SourceName::new("app_x")).unwrap();
        assert_eq!(lines, &vec!["first".to_owned(), "second".to_owned()]);
    }

    #[test]
    fn invalid_utf8_is_replaced_with_substitution_char() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bin.log");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"caf\xE9 au lait\n").unwrap();
        drop(file);

        let collected = collect_sources(&[path.display().to_string()]);
        let lines = collected.values().next().unwrap();
        assert_eq!(lines, &vec!["caf\u{FFFD} au lait".to_owned()]);
    }

    #[test]
    fn valid_utf8_passes_through_unchanged() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "app/utf8.log", "café au lait\n");

        let collected = collect_sources(&[dir.path().join("app/utf8.log").display().to_string()]);
        let lines = collected.values().next().unwrap();
        assert_eq!(lines, &vec!["café au lait".to_owned()]);
    }

    #[test]
    fn decode_latin1_maps_bytes_directly() {
        assert_eq!(decode_latin1(b"caf\xE9"), "café");
    }
}
