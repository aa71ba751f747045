//! LoggingDecorator - すべての handler 呼び出しを tracing で記録
//!
//! 記録する内容: handler 名, 入力（Debug 表現）, 成否, 所要時間, エラー詳細。
//! 結果やエラーには一切手を加えません。

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::{ErrorKind, FactsError};
use crate::logging::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use crate::ports::Context;
use crate::typed::{Command, CommandHandler, Query, QueryHandler};

pub struct LoggingDecorator<H> {
    inner: H,
}

impl<H> LoggingDecorator<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: Command, H: CommandHandler<C>> CommandHandler<C> for LoggingDecorator<H> {
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), FactsError> {
        let input = format!("{cmd:?}");
        log_start("command", C::NAME, &input);

        let started = Instant::now();
        let result = self.inner.handle(ctx, cmd).await;
        log_end("command", C::NAME, &input, started.elapsed(), result.as_ref().err());
        result
    }
}

#[async_trait]
impl<Q: Query, H: QueryHandler<Q>> QueryHandler<Q> for LoggingDecorator<H> {
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, FactsError> {
        let input = format!("{query:?}");
        log_start("query", Q::NAME, &input);

        let started = Instant::now();
        let result = self.inner.handle(ctx, query).await;
        log_end("query", Q::NAME, &input, started.elapsed(), result.as_ref().err());
        result
    }
}

fn log_start(kind: &'static str, handler: &'static str, input: &str) {
    tracing::debug!(kind, handler, event = EVENT_START, input, "executing {kind}");
}

fn log_end(
    kind: &'static str,
    handler: &'static str,
    input: &str,
    elapsed: Duration,
    err: Option<&FactsError>,
) {
    let duration_ms = elapsed.as_millis() as u64;
    match err {
        None => {
            tracing::info!(
                kind,
                handler,
                event = EVENT_END,
                input,
                duration_ms,
                "{kind} executed successfully"
            );
        }
        // ストア障害だけを error とし、入力起因・存在確認の失敗は warn に留める
        Some(err) if err.kind() == ErrorKind::Infrastructure => {
            tracing::error!(
                kind,
                handler,
                event = EVENT_END_ERROR,
                input,
                duration_ms,
                err_kind = ?err.kind(),
                err_slug = err.slug(),
                error = %err,
                "failed to execute {kind}"
            );
        }
        Some(err) => {
            tracing::warn!(
                kind,
                handler,
                event = EVENT_END_ERROR,
                input,
                duration_ms,
                err_kind = ?err.kind(),
                err_slug = err.slug(),
                error = %err,
                "failed to execute {kind}"
            );
        }
    }
}
