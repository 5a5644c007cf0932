//! 화면 캡처 포트.
//!
//! 구현: `autoshot-vision` crate (xcap)

use image::DynamicImage;

use crate::error::CoreError;
use crate::models::geometry::{Rect, Rgb};

/// 화면 사각형 → 래스터 이미지.
///
/// 픽셀 획득 방식은 구현체에 맡긴다. 코어는 실패가 `CoreError::CaptureFailed`로
/// 구분되는 것만 요구하며, 반환 이미지 크기가 요청과 다를 수 있음을 허용한다.
pub trait ScreenCapture: Send + Sync {
    /// 지정 영역 캡처
    fn capture(&self, rect: Rect) -> Result<DynamicImage, CoreError>;

    /// 화면 좌표의 현재 픽셀 색상 (저장 이미지가 아닌 실시간 화면)
    fn sample_pixel(&self, x: i32, y: i32) -> Result<Rgb, CoreError> {
        let image = self.capture(Rect::from_origin_size(x, y, 1, 1))?;
        let rgba = image.to_rgba8();
        let pixel = rgba
            .get_pixel_checked(0, 0)
            .ok_or_else(|| CoreError::CaptureFailed(format!("빈 픽셀 캡처: ({x}, {y})")))?;
        Ok(Rgb {
            r: pixel[0],
            g: pixel[1],
            b: pixel[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    struct SolidCapture([u8; 4]);

    impl ScreenCapture for SolidCapture {
        fn capture(&self, rect: Rect) -> Result<DynamicImage, CoreError> {
            Ok(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
                rect.width(),
                rect.height(),
                Rgba(self.0),
            )))
        }
    }

    struct EmptyCapture;

    impl ScreenCapture for EmptyCapture {
        fn capture(&self, _rect: Rect) -> Result<DynamicImage, CoreError> {
            Ok(DynamicImage::ImageRgba8(RgbaImage::new(0, 0)))
        }
    }

    #[test]
    fn sample_pixel_reads_single_pixel() {
        let capture = SolidCapture([12, 34, 56, 255]);
        let rgb = capture.sample_pixel(100, 200).unwrap();
        assert_eq!(rgb, Rgb { r: 12, g: 34, b: 56 });
    }

    #[test]
    fn sample_pixel_empty_capture_fails() {
        let err = EmptyCapture.sample_pixel(0, 0).unwrap_err();
        assert!(matches!(err, CoreError::CaptureFailed(_)));
    }
}
