//! 라이프사이클 관리.
//!
//! OS 종료 시그널을 받아 캡처 루프에 종료를 알린다.

use tokio::sync::watch;
use tracing::{error, info};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송
    pub fn shutdown(&self) {
        info!("종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    /// 종료 신호가 올 때까지 대기 (이미 왔으면 즉시 반환)
    pub async fn wait_for_shutdown(&self) {
        let mut rx = self.subscribe();
        if rx.wait_for(|stop| *stop).await.is_err() {
            error!("종료 채널 닫힘");
        }
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM / Ctrl+C) 후 종료 신호 발송
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match (
                signal(SignalKind::interrupt()),
                signal(SignalKind::terminate()),
            ) {
                (Ok(mut sigint), Ok(mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                _ => {
                    error!("시그널 핸들러 등록 실패, Ctrl+C만 대기");
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        error!("Ctrl+C 대기 실패: {e}");
                    }
                }
            }
        }

        #[cfg(not(unix))]
        {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Ctrl+C 수신"),
                Err(e) => error!("Ctrl+C 핸들러 등록 실패: {e}"),
            }
        }

        self.shutdown();
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}
