//! MetricsDecorator - 呼び出し回数と所要時間を MetricsClient に送る
//!
//! キー:
//! - `{commands|queries}.{name}.duration`
//! - `{commands|queries}.{name}.success` / `.failure`

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::domain::FactsError;
use crate::ports::{Context, MetricsClient};
use crate::typed::{Command, CommandHandler, Query, QueryHandler};

pub struct MetricsDecorator<H> {
    inner: H,
    metrics: Arc<dyn MetricsClient>,
}

impl<H> MetricsDecorator<H> {
    pub fn new(inner: H, metrics: Arc<dyn MetricsClient>) -> Self {
        Self { inner, metrics }
    }

    fn record(&self, group: &str, name: &str, started: Instant, ok: bool) {
        self.metrics
            .timing(&format!("{group}.{name}.duration"), started.elapsed());
        let outcome = if ok { "success" } else { "failure" };
        self.metrics.inc(&format!("{group}.{name}.{outcome}"), 1);
    }
}

#[async_trait]
impl<C: Command, H: CommandHandler<C>> CommandHandler<C> for MetricsDecorator<H> {
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), FactsError> {
        let started = Instant::now();
        let result = self.inner.handle(ctx, cmd).await;
        self.record("commands", C::NAME, started, result.is_ok());
        result
    }
}

#[async_trait]
impl<Q: Query, H: QueryHandler<Q>> QueryHandler<Q> for MetricsDecorator<H> {
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, FactsError> {
        let started = Instant::now();
        let result = self.inner.handle(ctx, query).await;
        self.record("queries", Q::NAME, started, result.is_ok());
        result
    }
}
