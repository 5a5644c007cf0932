//! 애플리케이션 설정 구조체.
//!
//! 대상 창, 캡처 주기, 출력 디렉토리, 유사도 임계값 등 런타임 설정을 정의한다.
//! JSON 설정 파일([`crate::config_manager::ConfigManager`])에서 로드하고
//! CLI 인자로 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 캡처 대상/주기 설정
    #[serde(default)]
    pub capture: CaptureConfig,
    /// 프레임 저장소 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 중복 판정 설정
    #[serde(default)]
    pub similarity: SimilarityConfig,
}

// ============================================================
// 캡처 설정
// ============================================================

/// 캡처 설정: 대상 창과 폴링 주기
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// 대상 창 제목 (정확히 일치)
    #[serde(default)]
    pub window_title: String,
    /// 창 목표 너비 (픽셀)
    #[serde(default = "default_window_width")]
    pub width: u32,
    /// 창 목표 높이 (픽셀)
    #[serde(default = "default_window_height")]
    pub height: u32,
    /// 사이클 종료 ~ 다음 사이클 시작 간격 (초)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 정지 시 진행 중 사이클 대기 한도 (초)
    #[serde(default = "default_stop_grace_secs")]
    pub stop_grace_secs: u64,
    /// 창 이동 위치 (지정 시 크기 변경과 함께 이동)
    #[serde(default)]
    pub position: Option<(i32, i32)>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            window_title: String::new(),
            width: default_window_width(),
            height: default_window_height(),
            interval_secs: default_interval_secs(),
            stop_grace_secs: default_stop_grace_secs(),
            position: None,
        }
    }
}

// ============================================================
// 저장소 설정
// ============================================================

/// 프레임 저장소 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 출력 디렉토리 (없으면 첫 저장 시 생성)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// 파일명 접두사
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// 파일 확장자 (점 포함)
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            file_extension: default_file_extension(),
        }
    }
}

// ============================================================
// 유사도 설정
// ============================================================

/// 중복 판정 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityConfig {
    /// 이 값 이상이면 직전 프레임을 중복으로 판정 (0.0 ~ 1.0)
    #[serde(default = "default_similarity_threshold")]
    pub threshold: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: default_similarity_threshold(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            capture: CaptureConfig::default(),
            storage: StorageConfig::default(),
            similarity: SimilarityConfig::default(),
        }
    }

    /// 캡처 간격을 Duration으로 반환
    pub fn capture_interval(&self) -> Duration {
        Duration::from_secs(self.capture.interval_secs)
    }

    /// 정지 대기 한도를 Duration으로 반환
    pub fn stop_grace(&self) -> Duration {
        Duration::from_secs(self.capture.stop_grace_secs)
    }

    /// 실행 전 설정 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.capture.window_title.is_empty() {
            return Err(validation("capture.window_title", "창 제목이 비어 있음"));
        }
        if self.capture.width == 0 || self.capture.height == 0 {
            return Err(validation(
                "capture.width/height",
                &format!(
                    "창 크기는 0보다 커야 함: {}x{}",
                    self.capture.width, self.capture.height
                ),
            ));
        }
        let threshold = self.similarity.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(validation(
                "similarity.threshold",
                &format!("0.0 ~ 1.0 범위를 벗어남: {threshold}"),
            ));
        }
        if self.storage.file_extension.is_empty() {
            return Err(validation("storage.file_extension", "확장자가 비어 있음"));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

fn validation(field: &str, message: &str) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_window_width() -> u32 {
    800
}
fn default_window_height() -> u32 {
    600
}
fn default_interval_secs() -> u64 {
    2
}
fn default_stop_grace_secs() -> u64 {
    5
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("chat_shot")
}
fn default_file_prefix() -> String {
    "screenshot".to_string()
}
fn default_file_extension() -> String {
    ".png".to_string()
}
fn default_similarity_threshold() -> f64 {
    0.999
}
