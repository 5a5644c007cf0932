//! 설정 파일 관리.
//!
//! 지정된 경로의 JSON 파일로 설정을 저장/로드한다.

use crate::config::AppConfig;
use crate::error::CoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 설정 관리자
///
/// 설정 파일의 로드/저장을 담당한다. 캡처 루프는 설정을 시작 시 한 번만
/// 읽으므로 런타임 변경 공유는 하지 않는다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 현재 설정
    config: AppConfig,
    /// 설정 파일 경로
    config_path: PathBuf,
}

impl ConfigManager {
    /// 지정 경로의 설정 파일을 읽는다. 파일이 없으면 기본값으로 만든다.
    pub fn with_path(config_path: PathBuf) -> Result<Self, CoreError> {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|e| file_error("디렉토리 생성", parent, e))?;
                info!("설정 디렉토리 생성: {}", parent.display());
            }
        }

        let config = match fs::read_to_string(&config_path) {
            Ok(content) => parse(&config_path, &content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let config = AppConfig::default_config();
                write(&config_path, &config)?;
                info!("기본 설정 파일 생성: {}", config_path.display());
                config
            }
            Err(e) => return Err(file_error("읽기", &config_path, e)),
        };

        Ok(Self {
            config,
            config_path,
        })
    }

    /// 현재 설정 (복제본)
    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    /// 설정 교체 후 파일에 기록
    pub fn update(&mut self, new_config: AppConfig) -> Result<(), CoreError> {
        write(&self.config_path, &new_config)?;
        self.config = new_config;
        debug!("설정 저장: {}", self.config_path.display());
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

fn file_error(action: &str, path: &Path, e: std::io::Error) -> CoreError {
    CoreError::Config(format!("설정 파일 {action} 실패: {}: {e}", path.display()))
}

fn parse(path: &Path, content: &str) -> Result<AppConfig, CoreError> {
    let config = serde_json::from_str(content)
        .map_err(|e| CoreError::Config(format!("설정 파일 파싱 실패: {}: {e}", path.display())))?;
    debug!("설정 파일 로드: {}", path.display());
    Ok(config)
}

fn write(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content).map_err(|e| file_error("저장", path, e))
}
