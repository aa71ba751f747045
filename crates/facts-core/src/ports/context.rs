//! Context - キャンセル可能な実行コンテキスト
//!
//! すべての handler と repository の呼び出しは `&Context` を受け取ります。
//! キャンセルされるか期限を過ぎた場合、操作は中断され
//! `FactsError::Cancelled` / `FactsError::DeadlineExceeded` を返します。
//!
//! # 学習ポイント
//! - `Arc<AtomicBool>` + `Notify` によるキャンセル通知
//! - `tokio::select!` で future と期限・キャンセルを競わせる

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

use crate::domain::FactsError;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Context は 1 リクエスト分の実行コンテキスト
///
/// Clone しても同じキャンセル状態を共有します。
#[derive(Debug, Clone)]
pub struct Context {
    cancel: Arc<CancelState>,
    deadline: Option<Instant>,
}

/// CancelHandle は対応する Context をキャンセルする
#[derive(Debug, Clone)]
pub struct CancelHandle {
    cancel: Arc<CancelState>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancel.cancelled.store(true, Ordering::Release);
        self.cancel.notify.notify_waiters();
    }
}

impl Context {
    /// キャンセルも期限もない Context
    pub fn background() -> Self {
        Self {
            cancel: Arc::new(CancelState::default()),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().child_with_timeout(timeout)
    }

    pub fn with_cancel() -> (Self, CancelHandle) {
        let ctx = Self::background();
        let handle = CancelHandle {
            cancel: Arc::clone(&ctx.cancel),
        };
        (ctx, handle)
    }

    /// キャンセル状態を共有したまま、期限をより早い方に絞った子 Context
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(current) if current <= candidate => current,
            _ => candidate,
        };
        Self {
            cancel: Arc::clone(&self.cancel),
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.cancelled.load(Ordering::Acquire)
    }

    /// 現時点でキャンセル・期限切れなら Err を返す
    pub fn check(&self) -> Result<(), FactsError> {
        if self.is_cancelled() {
            return Err(FactsError::Cancelled);
        }
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            return Err(FactsError::DeadlineExceeded);
        }
        Ok(())
    }

    /// キャンセルまたは期限切れまで待ち、その理由を返す
    pub async fn done(&self) -> FactsError {
        let cancelled = async {
            loop {
                // notify_waiters() は生成済みの Notified を起こすので、先に作ってから確認する
                let notified = self.cancel.notify.notified();
                if self.is_cancelled() {
                    return FactsError::Cancelled;
                }
                notified.await;
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                err = cancelled => err,
                _ = tokio::time::sleep_until(deadline) => FactsError::DeadlineExceeded,
            },
            None => cancelled.await,
        }
    }

    /// future を実行し、先にキャンセル・期限切れになったら中断する
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, FactsError>
    where
        F: Future,
    {
        self.check()?;
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}
