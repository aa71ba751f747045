//! Decorator - handler に横断的な処理を透過的に追加する
//!
//! decorator は包む対象と同じ trait（CommandHandler / QueryHandler）を実装し、
//! 内側の handler を呼んだ前後で処理を足すだけです。結果もエラーも変更しません。
//!
//! # 適用順序（外側 → 内側）
//! 1. LoggingDecorator
//! 2. MetricsDecorator
//! 3. handler 本体
//!
//! decorator の適用は `apply_command_decorators` / `apply_query_decorators` に集約し、
//! Application に登録される handler は必ずこのチェーンを通ります。

mod logging;
mod metrics;

pub use self::logging::LoggingDecorator;
pub use self::metrics::MetricsDecorator;

use std::sync::Arc;

use crate::ports::MetricsClient;
use crate::typed::{Command, CommandHandler, CommandHandlerRef, Query, QueryHandler, QueryHandlerRef};

pub fn apply_command_decorators<C, H>(handler: H, metrics: Arc<dyn MetricsClient>) -> CommandHandlerRef<C>
where
    C: Command,
    H: CommandHandler<C> + 'static,
{
    Arc::new(LoggingDecorator::new(MetricsDecorator::new(handler, metrics)))
}

pub fn apply_query_decorators<Q, H>(handler: H, metrics: Arc<dyn MetricsClient>) -> QueryHandlerRef<Q>
where
    Q: Query,
    H: QueryHandler<Q> + 'static,
{
    Arc::new(LoggingDecorator::new(MetricsDecorator::new(handler, metrics)))
}
