//! 스크린 캡처.
//!
//! xcap 기반 영역 캡처. 사각형 좌상단이 속한 모니터에서 캡처하며,
//! 모니터 경계를 넘는 부분은 잘라낸다.

use autoshot_core::error::CoreError;
use autoshot_core::models::geometry::Rect;
use autoshot_core::ports::vision::ScreenCapture;
use image::DynamicImage;
use tracing::debug;
use xcap::Monitor;

/// 스크린 캡처: xcap 기반
pub struct XcapScreenCapture;

impl XcapScreenCapture {
    /// 새 캡처 인스턴스 생성
    pub fn new() -> Self {
        Self
    }
}

impl Default for XcapScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// 모니터 기준 로컬 캡처 영역 `(x, y, width, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocalRegion {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

/// 화면 사각형을 모니터 로컬 좌표로 변환하고 모니터 경계로 자른다.
///
/// 교집합이 없으면 `None`.
fn clamp_to_monitor(rect: Rect, monitor: Rect) -> Option<LocalRegion> {
    let left = rect.left.max(monitor.left);
    let top = rect.top.max(monitor.top);
    let right = rect.right.min(monitor.right);
    let bottom = rect.bottom.min(monitor.bottom);

    if right <= left || bottom <= top {
        return None;
    }

    Some(LocalRegion {
        x: left.abs_diff(monitor.left),
        y: top.abs_diff(monitor.top),
        width: right.abs_diff(left),
        height: bottom.abs_diff(top),
    })
}

fn monitor_rect(monitor: &Monitor) -> xcap::XCapResult<Rect> {
    Ok(Rect::from_origin_size(
        monitor.x()?,
        monitor.y()?,
        monitor.width()?,
        monitor.height()?,
    ))
}

impl ScreenCapture for XcapScreenCapture {
    fn capture(&self, rect: Rect) -> Result<DynamicImage, CoreError> {
        if rect.is_empty() {
            return Err(CoreError::CaptureFailed(format!("빈 캡처 영역: {rect}")));
        }

        let monitor = Monitor::from_point(rect.left, rect.top)
            .map_err(|e| CoreError::CaptureFailed(format!("모니터 조회 실패: {e}")))?;
        let bounds = monitor_rect(&monitor)
            .map_err(|e| CoreError::CaptureFailed(format!("모니터 좌표 조회 실패: {e}")))?;

        let region = clamp_to_monitor(rect, bounds).ok_or_else(|| {
            CoreError::CaptureFailed(format!("캡처 영역이 모니터 밖: {rect} (모니터 {bounds})"))
        })?;
        if region.width != rect.width() || region.height != rect.height() {
            debug!(
                "캡처 영역 잘림: {rect} → {}x{} (모니터 {bounds})",
                region.width, region.height
            );
        }

        let image = monitor
            .capture_region(region.x, region.y, region.width, region.height)
            .map_err(|e| CoreError::CaptureFailed(format!("영역 캡처 실패: {e}")))?;

        debug!("영역 캡처 완료: {}x{}", image.width(), image.height());

        Ok(DynamicImage::ImageRgba8(image))
    }
}
