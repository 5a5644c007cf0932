//! 크로스 플랫폼 창 조회: xcap 창 목록 기반.
//!
//! xcap은 콘텐츠 영역을 따로 보고하지 않으므로 `client_rect`는
//! `LookupFailed`를 반환하고, 호출 측은 창 사각형으로 폴백한다.
//! 크기 변경도 지원하지 않는다.

use autoshot_core::error::CoreError;
use autoshot_core::models::geometry::{Rect, WindowHandle};
use autoshot_core::ports::monitor::WindowLocator;
use tracing::{debug, warn};
use xcap::Window;

/// xcap 기반 창 조회기: 상태 없음, 호출마다 창 목록을 새로 읽는다
pub struct XcapWindowLocator;

impl XcapWindowLocator {
    /// 새 조회기 생성
    pub fn new() -> Self {
        Self
    }

    fn all_windows() -> Result<Vec<Window>, CoreError> {
        Window::all().map_err(|e| CoreError::LookupFailed(format!("창 목록 조회 실패: {e}")))
    }

    /// 핸들(창 ID)로 현재 창 다시 찾기: 사라졌으면 `LookupFailed`
    fn resolve(handle: WindowHandle) -> Result<Window, CoreError> {
        Self::all_windows()?
            .into_iter()
            .find(|w| w.id().ok().map(u64::from) == Some(handle.as_raw()))
            .ok_or_else(|| CoreError::LookupFailed(format!("창이 더 이상 존재하지 않음: {handle}")))
    }
}

fn geometry(window: &Window) -> xcap::XCapResult<(i32, i32, u32, u32)> {
    Ok((window.x()?, window.y()?, window.width()?, window.height()?))
}

impl Default for XcapWindowLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowLocator for XcapWindowLocator {
    fn locate(&self, title: &str) -> Result<WindowHandle, CoreError> {
        let window = Self::all_windows()?
            .into_iter()
            .find(|w| w.title().map(|t| t == title).unwrap_or(false))
            .ok_or_else(|| CoreError::WindowNotFound {
                title: title.to_string(),
            })?;

        let id = window
            .id()
            .map_err(|e| CoreError::LookupFailed(format!("창 ID 조회 실패: {e}")))?;

        debug!("창 발견: '{title}' (id={id})");
        Ok(WindowHandle::from_raw(u64::from(id)))
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError> {
        let window = Self::resolve(handle)?;
        let (x, y, width, height) =
            geometry(&window).map_err(|e| CoreError::LookupFailed(format!("창 좌표 조회 실패: {e}")))?;

        Ok(Rect::from_origin_size(x, y, width, height))
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError> {
        Err(CoreError::LookupFailed(format!(
            "클라이언트 영역 조회 미지원 플랫폼: {handle}"
        )))
    }

    fn resize(&self, handle: WindowHandle, width: u32, height: u32) -> bool {
        warn!("창 크기 변경 미지원 플랫폼: {handle} → {width}x{height}");
        false
    }
}
