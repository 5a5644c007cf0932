//! 캡처 컨트롤러.
//!
//! 한 사이클: 창 조회 → 캡처 사각형 결정 → 캡처 → 상단 절반 잘라내기 → 저장
//! → 직전 프레임과 비교 후 중복 삭제. 이를 취소 가능한 주기 루프로 반복한다.
//!
//! 상태: `Idle → Running → Stopping → Idle`.
//! 사이클 내부의 어떤 실패도 루프를 끝내지 않는다. 루프는 `stop()`으로만 끝난다.

use autoshot_core::config::AppConfig;
use autoshot_core::error::CoreError;
use autoshot_core::models::frame::CapturedFrame;
use autoshot_core::models::geometry::{Rect, Rgb, WindowHandle};
use autoshot_core::ports::monitor::WindowLocator;
use autoshot_core::ports::vision::ScreenCapture;
use autoshot_vision::frame_dir::FrameDirectory;
use autoshot_vision::processor::FrameProcessor;
use autoshot_vision::similarity::SimilarityDetector;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// 컨트롤러 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Running,
    Stopping,
}

/// 한 사이클의 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 창이 없어 건너뜀
    Skipped,
    /// 사각형 조회/캡처/저장 실패로 중단
    Aborted,
    /// 새 프레임 저장, 삭제 없음
    Kept { path: PathBuf },
    /// 새 프레임 저장 후 중복된 직전 프레임 삭제
    Deduplicated { kept: PathBuf, removed: PathBuf },
}

/// 캡처 대상 창 설정
#[derive(Debug, Clone)]
pub struct CaptureSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub position: Option<(i32, i32)>,
    pub interval: Duration,
    pub stop_grace: Duration,
}

impl CaptureSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            title: config.capture.window_title.clone(),
            width: config.capture.width,
            height: config.capture.height,
            position: config.capture.position,
            interval: config.capture_interval(),
            stop_grace: config.stop_grace(),
        }
    }
}

/// 사이클 실행에 필요한 협력자 묶음 (블로킹 스레드로 넘기기 위해 Arc로 공유)
struct CyclePipeline {
    settings: CaptureSettings,
    locator: Arc<dyn WindowLocator>,
    capture: Arc<dyn ScreenCapture>,
    processor: FrameProcessor,
    frames: FrameDirectory,
    detector: SimilarityDetector,
}

impl CyclePipeline {
    fn locate(&self) -> Result<WindowHandle, CoreError> {
        self.locator.locate(&self.settings.title)
    }

    /// 클라이언트 사각형 우선, 실패 시 창 사각형
    fn resolve_rect(&self, handle: WindowHandle) -> Result<Rect, CoreError> {
        match self.locator.client_rect(handle) {
            Ok(rect) => Ok(rect),
            Err(e) => {
                debug!("클라이언트 사각형 조회 실패, 창 사각형 사용: {e}");
                self.locator.window_rect(handle)
            }
        }
    }

    fn setup_window(&self) -> Result<WindowHandle, CoreError> {
        let handle = self.locate()?;
        let (width, height) = (self.settings.width, self.settings.height);

        let applied = match self.settings.position {
            Some((x, y)) => self.locator.move_to(handle, x, y, width, height),
            None => self.locator.resize(handle, width, height),
        };
        if applied {
            info!("창 준비 완료: '{}' → {width}x{height}", self.settings.title);
        } else {
            warn!("창 크기 변경 실패: '{}' ({handle})", self.settings.title);
        }
        Ok(handle)
    }

    fn run_cycle(&self) -> CycleOutcome {
        let handle = match self.locate() {
            Ok(handle) => handle,
            Err(CoreError::WindowNotFound { title }) => {
                info!("창을 찾을 수 없음, 사이클 건너뜀: '{title}'");
                return CycleOutcome::Skipped;
            }
            Err(e) if e.is_retryable() => {
                warn!("창 조회 실패, 다음 주기에 재시도: {e}");
                return CycleOutcome::Aborted;
            }
            Err(e) => {
                error!("창 조회 중 복구 불가 에러, 사이클 중단: {e}");
                return CycleOutcome::Aborted;
            }
        };

        let rect = match self.resolve_rect(handle) {
            Ok(rect) => rect,
            Err(e) => {
                warn!("캡처 사각형 결정 실패, 사이클 중단: {e}");
                return CycleOutcome::Aborted;
            }
        };

        let image = match self.capture.capture(rect) {
            Ok(image) => image,
            Err(e) => {
                warn!("캡처 실패, 사이클 중단: {e}");
                return CycleOutcome::Aborted;
            }
        };

        let captured = CapturedFrame {
            image,
            source: rect,
        };
        if !captured.matches_source() {
            debug!(
                "캡처 크기 불일치: 요청 {rect}, 실제 {}x{}",
                captured.image.width(),
                captured.image.height()
            );
        }

        // 비교 단계 실패로 프레임을 잃지 않도록 항상 먼저 저장
        let processed = self.processor.process(&captured);
        let saved = match self.processor.persist(&processed) {
            Ok(path) => path,
            Err(e) => {
                warn!("프레임 저장 실패, 사이클 중단: {e}");
                return CycleOutcome::Aborted;
            }
        };
        info!("프레임 저장: {}", saved.display());

        let count = match self.frames.count_frames() {
            Ok(count) => count,
            Err(e) => {
                warn!("프레임 목록 조회 실패, 중복 검사 생략: {e}");
                return CycleOutcome::Kept { path: saved };
            }
        };
        if count <= 1 {
            return CycleOutcome::Kept { path: saved };
        }

        match self.detector.find_duplicate_of(&saved, &self.frames) {
            Some(duplicate) if duplicate != saved => self.discard_duplicate(saved, duplicate),
            _ => CycleOutcome::Kept { path: saved },
        }
    }

    /// 중복 판정된 직전 프레임 삭제. 실패해도 새 프레임은 유지한다.
    fn discard_duplicate(&self, saved: PathBuf, duplicate: PathBuf) -> CycleOutcome {
        match self.frames.remove_frame(&duplicate) {
            Ok(()) => {
                info!("중복 프레임 삭제: {}", duplicate.display());
                CycleOutcome::Deduplicated {
                    kept: saved,
                    removed: duplicate,
                }
            }
            Err(e) => {
                warn!("중복 프레임 삭제 실패: {e}");
                CycleOutcome::Kept { path: saved }
            }
        }
    }

    fn pixel_at(&self, handle: WindowHandle, x: i32, y: i32) -> Option<Rgb> {
        let rect = match self.resolve_rect(handle) {
            Ok(rect) => rect,
            Err(e) => {
                warn!("픽셀 조회용 사각형 결정 실패: {e}");
                return None;
            }
        };

        let (screen_x, screen_y) = rect.offset(x, y);
        match self.capture.sample_pixel(screen_x, screen_y) {
            Ok(rgb) => {
                debug!("픽셀 ({x}, {y}) → 화면 ({screen_x}, {screen_y}): {rgb}");
                Some(rgb)
            }
            Err(e) => {
                warn!("화면 픽셀 조회 실패 ({screen_x}, {screen_y}): {e}");
                None
            }
        }
    }
}

/// 실행 중인 루프 하나에 대한 제어 토큰
#[derive(Clone)]
struct LoopSlot {
    /// 루프마다 증가하는 번호
    generation: u64,
    /// 중지 요청
    cancel: CancellationToken,
    /// 루프 태스크가 실제로 끝나면 취소됨
    finished: CancellationToken,
}

struct ControllerInner {
    state: ControllerState,
    slot: Option<LoopSlot>,
    generation: u64,
}

impl ControllerInner {
    /// 유예 시간 초과로 `Stopping`에 남은 루프가 그 뒤 끝났으면 `Idle`로 정리
    fn settle(&mut self) {
        let finished = self
            .slot
            .as_ref()
            .map(|slot| slot.finished.is_cancelled())
            .unwrap_or(true);
        if self.state == ControllerState::Stopping && finished {
            self.state = ControllerState::Idle;
            self.slot = None;
        }
    }
}

/// 캡처 컨트롤러
pub struct CaptureController {
    pipeline: Arc<CyclePipeline>,
    inner: Mutex<ControllerInner>,
}

impl CaptureController {
    /// 설정과 포트 구현체로 컨트롤러 생성
    pub fn new(
        config: &AppConfig,
        locator: Arc<dyn WindowLocator>,
        capture: Arc<dyn ScreenCapture>,
    ) -> Self {
        let pipeline = CyclePipeline {
            settings: CaptureSettings::from_config(config),
            locator,
            capture,
            processor: FrameProcessor::from_config(&config.storage),
            frames: FrameDirectory::new(
                config.storage.output_dir.clone(),
                &config.storage.file_extension,
            ),
            detector: SimilarityDetector::new(config.similarity.threshold),
        };
        Self {
            pipeline: Arc::new(pipeline),
            inner: Mutex::new(ControllerInner {
                state: ControllerState::Idle,
                slot: None,
                generation: 0,
            }),
        }
    }

    /// 현재 상태
    pub fn state(&self) -> ControllerState {
        let mut inner = self.inner.lock();
        inner.settle();
        inner.state
    }

    /// 대상 창 설정
    pub fn settings(&self) -> &CaptureSettings {
        &self.pipeline.settings
    }

    /// 대상 창 조회
    pub fn locate(&self) -> Result<WindowHandle, CoreError> {
        self.pipeline.locate()
    }

    /// 창을 찾아 요청 크기(및 위치)로 맞춘다. 크기 변경 실패는 경고만 남긴다.
    pub fn setup_window(&self) -> Result<WindowHandle, CoreError> {
        self.pipeline.setup_window()
    }

    /// 한 사이클 실행 (블로킹)
    pub fn run_cycle(&self) -> CycleOutcome {
        self.pipeline.run_cycle()
    }

    /// 창 준비 후 한 사이클만 실행. 창이 없으면 에러.
    pub async fn run_once(&self) -> Result<CycleOutcome, CoreError> {
        let pipeline = Arc::clone(&self.pipeline);
        tokio::task::spawn_blocking(move || {
            pipeline.setup_window()?;
            Ok(pipeline.run_cycle())
        })
        .await
        .map_err(|e| CoreError::Internal(format!("사이클 태스크 실패: {e}")))?
    }

    /// 스크린샷 좌표 → 화면 좌표 변환 후 실시간 화면 픽셀 색상 조회.
    ///
    /// 기본적으로 클라이언트 사각형 기준이며 캡처 루프와 독립적이다.
    pub fn pixel_at(&self, handle: WindowHandle, x: i32, y: i32) -> Option<Rgb> {
        self.pipeline.pixel_at(handle, x, y)
    }

    /// 창을 찾아 `pixel_at` 실행 (블로킹 스레드에서)
    pub async fn query_pixel(&self, x: i32, y: i32) -> Result<Option<Rgb>, CoreError> {
        let pipeline = Arc::clone(&self.pipeline);
        tokio::task::spawn_blocking(move || {
            let handle = pipeline.locate()?;
            Ok(pipeline.pixel_at(handle, x, y))
        })
        .await
        .map_err(|e| CoreError::Internal(format!("픽셀 조회 태스크 실패: {e}")))?
    }

    /// 캡처 루프 시작. 이미 실행 중이거나 이전 루프가 아직 끝나지 않았으면 경고 후 `false`.
    ///
    /// 창 크기는 건드리지 않는다. tokio 런타임 안에서 호출해야 한다.
    pub fn start(&self) -> bool {
        let mut inner = self.inner.lock();
        inner.settle();
        if inner.state != ControllerState::Idle {
            warn!("캡처 루프가 아직 실행 중 ({:?})", inner.state);
            return false;
        }

        inner.generation += 1;
        let slot = LoopSlot {
            generation: inner.generation,
            cancel: CancellationToken::new(),
            finished: CancellationToken::new(),
        };

        let pipeline = Arc::clone(&self.pipeline);
        let cancel = slot.cancel.clone();
        let finished = slot.finished.clone();
        tokio::spawn(async move {
            // 태스크가 어떻게 끝나든 완료 토큰 취소
            let _done = finished.drop_guard();
            capture_loop(pipeline, cancel).await;
        });

        inner.slot = Some(slot);
        inner.state = ControllerState::Running;
        info!(
            "캡처 루프 시작: '{}' (간격 {:?})",
            self.pipeline.settings.title, self.pipeline.settings.interval
        );
        true
    }

    /// 캡처 루프 중지. 진행 중인 사이클이 끝나거나 유예 시간이 지날 때까지 대기.
    ///
    /// 유예 시간 안에 루프가 끝나지 않으면 `Stopping`에 머물며, 그동안
    /// `start()`는 거부된다. 다시 `stop()`을 부르면 남은 루프를 다시 기다린다.
    /// `Idle` 상태면 아무것도 하지 않는다.
    pub async fn stop(&self) {
        let slot = {
            let mut inner = self.inner.lock();
            inner.settle();
            match (inner.state, inner.slot.clone()) {
                (ControllerState::Idle, _) | (_, None) => {
                    debug!("중지 요청 무시 (실행 중인 루프 없음)");
                    return;
                }
                (_, Some(slot)) => {
                    inner.state = ControllerState::Stopping;
                    slot
                }
            }
        };

        slot.cancel.cancel();

        let grace = self.pipeline.settings.stop_grace;
        if tokio::time::timeout(grace, slot.finished.cancelled())
            .await
            .is_err()
        {
            warn!("캡처 루프 종료 대기 시간 초과 ({grace:?}), 중지 중 상태 유지");
            return;
        }

        let mut inner = self.inner.lock();
        let same_loop = inner
            .slot
            .as_ref()
            .map(|current| current.generation == slot.generation)
            .unwrap_or(false);
        if same_loop {
            inner.state = ControllerState::Idle;
            inner.slot = None;
            info!("캡처 루프 중지");
        }
    }
}

/// 주기 루프 본체. 첫 사이클은 즉시 실행하고, 간격은 사이클 종료 시점부터 잰다.
async fn capture_loop(pipeline: Arc<CyclePipeline>, token: CancellationToken) {
    let interval = pipeline.settings.interval;
    loop {
        if token.is_cancelled() {
            break;
        }

        let cycle = Arc::clone(&pipeline);
        match tokio::task::spawn_blocking(move || cycle.run_cycle()).await {
            Ok(outcome) => debug!("사이클 결과: {outcome:?}"),
            Err(e) => error!("사이클 태스크 실패: {e}"),
        }

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
