//! 프레임(스크린샷) 모델.
//!
//! 캡처 직후의 원본 프레임과, 잘라내기 + 파일명 부여가 끝난
//! 저장 직전 프레임을 정의한다.

use image::DynamicImage;
use std::path::PathBuf;

use super::geometry::Rect;

/// 캡처된 원본 프레임: 한 사이클 안에서만 존재
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// 원본 래스터 이미지
    pub image: DynamicImage,
    /// 캡처에 사용한 화면 사각형
    pub source: Rect,
}

impl CapturedFrame {
    /// 요청한 사각형과 실제 래스터 크기가 일치하는지
    pub fn matches_source(&self) -> bool {
        self.image.width() == self.source.width() && self.image.height() == self.source.height()
    }
}

/// 정규화된 프레임 (잘라내기 완료 + 고유 파일명 부여)
#[derive(Debug, Clone)]
pub struct ProcessedFrame {
    /// 잘라낸 이미지
    pub image: DynamicImage,
    /// `<prefix>_<epochMillis><ext>` 형식의 파일명
    pub filename: String,
    /// 저장 디렉토리
    pub output_dir: PathBuf,
}

impl ProcessedFrame {
    /// 저장될 전체 경로
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn captured_frame_size_match() {
        let frame = CapturedFrame {
            image: DynamicImage::ImageRgba8(RgbaImage::new(800, 600)),
            source: Rect::from_origin_size(0, 0, 800, 600),
        };
        assert!(frame.matches_source());

        let mismatched = CapturedFrame {
            image: DynamicImage::ImageRgba8(RgbaImage::new(1600, 1200)),
            source: Rect::from_origin_size(0, 0, 800, 600),
        };
        assert!(!mismatched.matches_source());
    }

    #[test]
    fn processed_frame_path() {
        let frame = ProcessedFrame {
            image: DynamicImage::ImageRgba8(RgbaImage::new(4, 2)),
            filename: "screenshot_1700000000000.png".to_string(),
            output_dir: PathBuf::from("chat_shot"),
        };
        assert_eq!(
            frame.path(),
            PathBuf::from("chat_shot").join("screenshot_1700000000000.png")
        );
    }
}
