//! App - アプリケーション層
//!
//! ports を組み合わせて Command / Query の handler を提供します。
//!
//! # 主要コンポーネント
//! - **Application**: decorator 適用済み handler のファサード
//! - **AppBuilder**: 依存関係のワイヤリングと起動時検証
//! - **command / query**: リクエスト型と handler 本体
//! - **decorator**: ログとメトリクスの横断的処理

pub mod builder;
pub mod command;
pub mod decorator;
pub mod query;

// 主要な型を再エクスポート
pub use self::builder::{AppBuilder, BuildError};

use std::sync::Arc;

use crate::domain::FactId;
use crate::ports::IdGenerator;
use crate::typed::{CommandHandlerRef, QueryHandlerRef};

use self::command::{CreateFact, DeleteFact, UpdateFact};
use self::query::{AllFacts, FactById, FactCount, RandomFact};

/// 状態を変更する handler（すべて decorator 適用済み）
#[derive(Clone)]
pub struct Commands {
    pub create_fact: CommandHandlerRef<CreateFact>,
    pub update_fact: CommandHandlerRef<UpdateFact>,
    pub delete_fact: CommandHandlerRef<DeleteFact>,
}

/// 読み取り専用の handler（すべて decorator 適用済み）
#[derive(Clone)]
pub struct Queries {
    pub fact_by_id: QueryHandlerRef<FactById>,
    pub random_fact: QueryHandlerRef<RandomFact>,
    pub all_facts: QueryHandlerRef<AllFacts>,
    pub fact_count: QueryHandlerRef<FactCount>,
}

/// Application は transport 層から見た唯一の入口
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new()
///     .repository(store.clone())
///     .read_model(store)
///     .metrics(Arc::new(NoopMetrics))
///     .build()?;
///
/// let id = app.next_fact_id();
/// app.commands
///     .create_fact
///     .handle(&ctx, CreateFact::new(id.clone(), "Cats purr", "wiki"))
///     .await?;
/// let fact = app.queries.fact_by_id.handle(&ctx, FactById::new(id)).await?;
/// ```
#[derive(Clone)]
pub struct Application {
    pub commands: Commands,
    pub queries: Queries,
    ids: Arc<dyn IdGenerator>,
}

impl Application {
    /// ID を持たない作成リクエスト向けに、新しい FactId を発行
    pub fn next_fact_id(&self) -> FactId {
        self.ids.generate_fact_id()
    }
}
