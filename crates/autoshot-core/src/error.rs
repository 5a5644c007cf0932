//! AutoShot 핵심 에러 타입.
//!
//! 캡처 사이클의 실패 분류(창 미발견, 좌표 조회 실패, 캡처 실패, 디코딩 실패,
//! 삭제 실패)와 설정/입출력 공통 에러를 정의한다.

use std::path::PathBuf;
use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 제목과 일치하는 창 없음: 재시도 가능 (창이 나중에 나타날 수 있음)
    #[error("창 미발견: '{title}'")]
    WindowNotFound {
        /// 조회한 창 제목
        title: String,
    },

    /// 존재하던 핸들의 좌표 조회 실패 (창이 닫혔거나 재생성됨)
    #[error("창 좌표 조회 실패: {0}")]
    LookupFailed(String),

    /// 캡처 백엔드 에러
    #[error("화면 캡처 실패: {0}")]
    CaptureFailed(String),

    /// 저장된 프레임 이미지를 열거나 디코딩할 수 없음
    #[error("이미지 디코딩 실패: {}: {message}", path.display())]
    DecodeFailed {
        /// 대상 파일 경로
        path: PathBuf,
        /// 실패 사유
        message: String,
    },

    /// 중복 프레임 삭제 실패
    #[error("파일 삭제 실패: {}: {source}", path.display())]
    DeleteFailed {
        /// 삭제하려던 파일 경로
        path: PathBuf,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 다음 사이클에서 다시 시도할 가치가 있는 에러인지
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::WindowNotFound { .. } | Self::LookupFailed(_) | Self::CaptureFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_not_found_is_retryable() {
        let err = CoreError::WindowNotFound {
            title: "Notepad".to_string(),
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Notepad"));
    }

    #[test]
    fn config_error_is_not_retryable() {
        assert!(!CoreError::Config("bad".to_string()).is_retryable());
    }

    #[test]
    fn delete_failed_keeps_source() {
        use std::error::Error as _;
        let err = CoreError::DeleteFailed {
            path: PathBuf::from("chat_shot/screenshot_1.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("screenshot_1.png"));
    }
}
