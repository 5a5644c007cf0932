//! 프레임 정규화 및 저장.
//!
//! 캡처 이미지를 상단 절반으로 잘라내고 `<prefix>_<epochMillis><ext>` 파일명으로
//! 출력 디렉토리에 저장한다. 저장 시점이 프레임의 영속화 시점이다.

use autoshot_core::config::StorageConfig;
use autoshot_core::error::CoreError;
use autoshot_core::models::frame::{CapturedFrame, ProcessedFrame};
use chrono::Utc;
use image::{DynamicImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// 상단 절반 잘라내기: 너비 유지, 높이 `floor(height / 2)`
pub fn crop_top_half(image: &DynamicImage) -> DynamicImage {
    image.crop_imm(0, 0, image.width(), image.height() / 2)
}

/// 프레임 처리기: 잘라내기, 파일명 생성, 저장
pub struct FrameProcessor {
    /// 출력 디렉토리
    output_dir: PathBuf,
    /// 파일명 접두사
    prefix: String,
    /// 확장자 (점 포함)
    extension: String,
    /// 마지막으로 발급한 밀리초 타임스탬프 (같은 밀리초 내 중복 방지)
    last_millis: AtomicI64,
}

impl FrameProcessor {
    /// 새 프레임 처리기 생성
    pub fn new(output_dir: impl Into<PathBuf>, prefix: &str, extension: &str) -> Self {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{extension}")
        };
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.to_string(),
            extension,
            last_millis: AtomicI64::new(0),
        }
    }

    /// 저장소 설정으로 생성
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(
            config.output_dir.clone(),
            &config.file_prefix,
            &config.file_extension,
        )
    }

    /// 출력 디렉토리
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 확장자 (점 포함)
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 고유 파일명 생성: `<prefix>_<epochMillis><ext>`.
    ///
    /// 같은 밀리초에 두 번 호출되거나 같은 이름의 파일이 이미 있으면
    /// 타임스탬프를 1ms씩 올려 덮어쓰기를 막는다.
    pub fn unique_filename(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut millis = self.next_millis(now);

        loop {
            let filename = self.filename_for(millis);
            if !self.output_dir.join(&filename).exists() {
                return filename;
            }
            debug!("파일명 충돌, 타임스탬프 증가: {filename}");
            millis = self.next_millis(millis + 1);
        }
    }

    fn next_millis(&self, candidate: i64) -> i64 {
        let previous = self
            .last_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        candidate.max(previous + 1)
    }

    fn filename_for(&self, millis: i64) -> String {
        format!("{}_{}{}", self.prefix, millis, self.extension)
    }

    /// 캡처 프레임 정규화 (상단 절반 + 파일명 부여)
    pub fn process(&self, frame: &CapturedFrame) -> ProcessedFrame {
        let image = crop_top_half(&frame.image);
        debug!(
            "프레임 잘라내기: {}x{} → {}x{}",
            frame.image.width(),
            frame.image.height(),
            image.width(),
            image.height()
        );
        ProcessedFrame {
            image,
            filename: self.unique_filename(),
            output_dir: self.output_dir.clone(),
        }
    }

    /// 이미지를 출력 디렉토리에 저장 (디렉토리 없으면 생성)
    pub fn save(&self, image: &DynamicImage, filename: &str) -> Result<PathBuf, CoreError> {
        fs::create_dir_all(&self.output_dir)?;

        let format = ImageFormat::from_extension(self.extension.trim_start_matches('.'))
            .ok_or_else(|| {
                CoreError::Config(format!("지원하지 않는 이미지 확장자: {}", self.extension))
            })?;

        let path = self.output_dir.join(filename);
        image
            .save_with_format(&path, format)
            .map_err(|e| CoreError::Internal(format!("이미지 저장 실패: {}: {e}", path.display())))?;

        Ok(path)
    }

    /// 정규화된 프레임 저장
    pub fn persist(&self, frame: &ProcessedFrame) -> Result<PathBuf, CoreError> {
        self.save(&frame.image, &frame.filename)
    }
}
