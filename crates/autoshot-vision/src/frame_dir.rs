//! 출력 디렉토리: 저장된 프레임 목록 조회/삭제.
//!
//! 디렉토리 자체가 유일한 영속 상태다 (인덱스 파일 없음).
//! "가장 최근" 프레임은 파일 수정 시각으로 판단한다.
//! 목록 조회와 수정 시각 확인 사이에 외부에서 파일이 사라질 수 있으므로
//! 메타데이터를 읽지 못한 항목은 조용히 건너뛴다.

use autoshot_core::error::CoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// 프레임 디렉토리
#[derive(Debug, Clone)]
pub struct FrameDirectory {
    /// 디렉토리 경로
    dir: PathBuf,
    /// 프레임 확장자 (점 제외, 소문자)
    extension: String,
}

impl FrameDirectory {
    /// 새 프레임 디렉토리 생성 (`.png` 또는 `png` 모두 허용)
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_ascii_lowercase(),
        }
    }

    /// 디렉토리 경로
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn is_frame(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false)
    }

    /// 저장된 프레임 목록 (확장자 대소문자 무시). 디렉토리가 없으면 빈 목록.
    pub fn list_frames(&self) -> Result<Vec<PathBuf>, CoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CoreError::Io(e)),
        };

        let frames = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| self.is_frame(path))
            .collect();

        Ok(frames)
    }

    /// 저장된 프레임 수
    pub fn count_frames(&self) -> Result<usize, CoreError> {
        self.list_frames().map(|frames| frames.len())
    }

    /// `excluding`을 제외한 프레임 중 수정 시각이 가장 늦은 것.
    ///
    /// 수정 시각이 같으면 파일명이 큰 쪽(타임스탬프가 늦은 쪽)을 고른다.
    pub fn latest_frame(&self, excluding: &Path) -> Result<Option<PathBuf>, CoreError> {
        let excluded = fs::canonicalize(excluding).ok();

        let latest = self
            .list_frames()?
            .into_iter()
            .filter(|path| !is_same_file(path, excluding, excluded.as_deref()))
            .filter_map(|path| modified_at(&path).map(|mtime| (mtime, path)))
            .max_by(|(a_time, a_path), (b_time, b_path)| {
                a_time
                    .cmp(b_time)
                    .then_with(|| a_path.file_name().cmp(&b_path.file_name()))
            })
            .map(|(_, path)| path);

        Ok(latest)
    }

    /// 프레임 삭제
    pub fn remove_frame(&self, path: &Path) -> Result<(), CoreError> {
        fs::remove_file(path).map_err(|source| CoreError::DeleteFailed {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("프레임 삭제: {}", path.display());
        Ok(())
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn is_same_file(path: &Path, excluding: &Path, excluded_canonical: Option<&Path>) -> bool {
    if path == excluding {
        return true;
    }
    match (excluded_canonical, fs::canonicalize(path).ok()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
