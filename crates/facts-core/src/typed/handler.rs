//! Handler traits - Command / Query を処理する handler の定義
//!
//! # 学習ポイント
//! - ジェネリック trait (`CommandHandler<C>`, `QueryHandler<Q>`)
//! - `Arc<dyn ...>` による handler の共有（decorator を重ねても同じ型で扱える）

use std::sync::Arc;

use async_trait::async_trait;

use super::command::Command;
use super::query::Query;
use crate::domain::FactsError;
use crate::ports::Context;

/// CommandHandler は Command を 1 つ処理する
///
/// # ジェネリクスによる型安全性
/// - `CommandHandler<CreateFact>` は `CreateFact` しか受け取れない
/// - decorator も同じ trait を実装するので、呼び出し側は装飾の有無を区別できない
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), FactsError>;
}

/// QueryHandler は Query を 1 つ処理して `Q::Output` を返す
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, FactsError>;
}

/// 装飾済み handler の共有ハンドル
pub type CommandHandlerRef<C> = Arc<dyn CommandHandler<C>>;

pub type QueryHandlerRef<Q> = Arc<dyn QueryHandler<Q>>;

#[async_trait]
impl<C: Command, H: CommandHandler<C> + ?Sized> CommandHandler<C> for Arc<H> {
    async fn handle(&self, ctx: &Context, cmd: C) -> Result<(), FactsError> {
        (**self).handle(ctx, cmd).await
    }
}

#[async_trait]
impl<Q: Query, H: QueryHandler<Q> + ?Sized> QueryHandler<Q> for Arc<H> {
    async fn handle(&self, ctx: &Context, query: Q) -> Result<Q::Output, FactsError> {
        (**self).handle(ctx, query).await
    }
}
