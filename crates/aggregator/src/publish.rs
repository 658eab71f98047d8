//! 산출물 게시자, git 구현
//!
//! 저장된 로그와 요약 리포트를 `git add` / `git commit`으로 버전 관리
//! 저장소에 반영합니다. 파이프라인 동작에 필수는 아니므로 호출 측에서
//! 실패를 경고로 강등합니다.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use logharvest_core::error::LogharvestError;
use logharvest_core::pipeline::ArtifactPublisher;

/// `git` 바이너리를 직접 호출하는 게시자
///
/// `work_dir`가 설정되면 해당 디렉토리에서 git을 실행하고, 없으면 현재
/// 작업 디렉토리를 사용합니다.
#[derive(Debug, Default)]
pub struct GitPublisher {
    work_dir: Option<PathBuf>,
}

impl GitPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_work_dir(work_dir: PathBuf) -> Self {
        Self {
            work_dir: Some(work_dir),
        }
    }

    fn run_git(&self, args: &[&str]) -> Result<i32, LogharvestError> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        let status = cmd.status()?;
        let code = status.code().unwrap_or(-1);
        debug!(?args, code, "ran git");
        Ok(code)
    }
}

impl ArtifactPublisher for GitPublisher {
    fn name(&self) -> &str {
        "git"
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<i32, LogharvestError> {
        let mut args = vec!["add", "--"];
        let rendered: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        args.extend(rendered.iter().map(String::as_str));
        self.run_git(&args)
    }

    fn commit(&self, message: &str) -> Result<i32, LogharvestError> {
        self.run_git(&["commit", "-m", message])
    }
}

/// 게시 결과를 사람이 읽을 한 줄로 요약합니다.
pub fn describe_exit(stage_code: i32, commit_code: i32) -> String {
    if stage_code == 0 && commit_code == 0 {
        "staged and committed".to_owned()
    } else {
        format!("git add exited {stage_code}, git commit exited {commit_code}")
    }
}
