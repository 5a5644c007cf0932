//! Windows 플랫폼: 제목 기반 창 조회, 창/클라이언트 사각형, 크기 변경.
//!
//! Win32 API `FindWindowW` + `GetWindowRect` + `GetClientRect`/`ClientToScreen`
//! + `SetWindowPos` 기반.

#![cfg(target_os = "windows")]

use autoshot_core::error::CoreError;
use autoshot_core::models::geometry::{Rect, WindowHandle};
use autoshot_core::ports::monitor::WindowLocator;
use tracing::{debug, warn};
use windows_sys::Win32::Foundation::{HWND, POINT, RECT};
use windows_sys::Win32::Graphics::Gdi::ClientToScreen;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    FindWindowW, GetClientRect, GetWindowRect, IsWindow, SetWindowPos, SWP_NOMOVE, SWP_NOZORDER,
};

/// Win32 창 조회기.
///
/// 함수 포인터나 핸들을 보관하지 않는다. `WindowHandle`에는 HWND 값만 담기며
/// 매 호출 시 `IsWindow`로 유효성을 다시 확인한다.
pub struct Win32WindowLocator;

impl Win32WindowLocator {
    /// 새 조회기 생성
    pub fn new() -> Self {
        Self
    }
}

impl Default for Win32WindowLocator {
    fn default() -> Self {
        Self::new()
    }
}

/// 널 종료 UTF-16 문자열
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn to_hwnd(handle: WindowHandle) -> HWND {
    handle.as_raw() as usize as HWND
}

/// 창이 아직 존재하는지 확인 후 HWND 반환
fn live_hwnd(handle: WindowHandle) -> Result<HWND, CoreError> {
    let hwnd = to_hwnd(handle);
    // SAFETY: IsWindow는 임의의 값에 대해 안전하게 FALSE를 반환한다
    if unsafe { IsWindow(hwnd) } == 0 {
        return Err(CoreError::LookupFailed(format!(
            "창이 더 이상 존재하지 않음: {handle}"
        )));
    }
    Ok(hwnd)
}

impl WindowLocator for Win32WindowLocator {
    fn locate(&self, title: &str) -> Result<WindowHandle, CoreError> {
        let wide_title = to_wide(title);
        // SAFETY: wide_title은 호출 동안 유효한 널 종료 버퍼
        let hwnd = unsafe { FindWindowW(std::ptr::null(), wide_title.as_ptr()) };
        if hwnd.is_null() {
            return Err(CoreError::WindowNotFound {
                title: title.to_string(),
            });
        }

        let handle = WindowHandle::from_raw(hwnd as usize as u64);
        debug!("창 발견: '{title}' (HWND: {handle})");
        Ok(handle)
    }

    fn window_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError> {
        let hwnd = live_hwnd(handle)?;
        unsafe {
            let mut rect: RECT = std::mem::zeroed();
            if GetWindowRect(hwnd, &mut rect) == 0 {
                return Err(CoreError::LookupFailed(format!(
                    "GetWindowRect 실패: {handle}"
                )));
            }
            Rect::new(rect.left, rect.top, rect.right, rect.bottom)
        }
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError> {
        let hwnd = live_hwnd(handle)?;
        unsafe {
            let mut rect: RECT = std::mem::zeroed();
            if GetClientRect(hwnd, &mut rect) == 0 {
                return Err(CoreError::LookupFailed(format!(
                    "GetClientRect 실패: {handle}"
                )));
            }

            // 클라이언트 로컬 좌표 → 화면 좌표 (두 모서리 변환)
            let mut top_left = POINT {
                x: rect.left,
                y: rect.top,
            };
            let mut bottom_right = POINT {
                x: rect.right,
                y: rect.bottom,
            };
            if ClientToScreen(hwnd, &mut top_left) == 0
                || ClientToScreen(hwnd, &mut bottom_right) == 0
            {
                return Err(CoreError::LookupFailed(format!(
                    "ClientToScreen 실패: {handle}"
                )));
            }

            Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y)
        }
    }

    fn resize(&self, handle: WindowHandle, width: u32, height: u32) -> bool {
        let hwnd = match live_hwnd(handle) {
            Ok(hwnd) => hwnd,
            Err(e) => {
                warn!("창 크기 변경 불가: {e}");
                return false;
            }
        };
        let accepted = unsafe {
            SetWindowPos(
                hwnd,
                std::ptr::null_mut(),
                0,
                0,
                width as i32,
                height as i32,
                SWP_NOMOVE | SWP_NOZORDER,
            )
        } != 0;

        if !accepted {
            warn!("SetWindowPos 거부: {handle} → {width}x{height}");
        }
        accepted
    }

    fn move_to(&self, handle: WindowHandle, x: i32, y: i32, width: u32, height: u32) -> bool {
        let hwnd = match live_hwnd(handle) {
            Ok(hwnd) => hwnd,
            Err(e) => {
                warn!("창 이동 불가: {e}");
                return false;
            }
        };
        let accepted = unsafe {
            SetWindowPos(
                hwnd,
                std::ptr::null_mut(),
                x,
                y,
                width as i32,
                height as i32,
                SWP_NOZORDER,
            )
        } != 0;

        if !accepted {
            warn!("SetWindowPos 거부: {handle} → ({x}, {y}) {width}x{height}");
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_string_is_nul_terminated() {
        let wide = to_wide("메모장");
        assert_eq!(wide.last(), Some(&0));
        assert_eq!(wide.len(), "메모장".encode_utf16().count() + 1);
    }

    #[test]
    fn missing_window_not_found() {
        let locator = Win32WindowLocator::new();
        let err = locator
            .locate("autoshot-test-window-that-does-not-exist-7f3a")
            .unwrap_err();
        assert!(matches!(err, CoreError::WindowNotFound { .. }));
    }

    #[test]
    fn stale_handle_lookup_failed() {
        let locator = Win32WindowLocator::new();
        let err = locator.client_rect(WindowHandle::from_raw(0)).unwrap_err();
        assert!(matches!(err, CoreError::LookupFailed(_)));
    }
}
