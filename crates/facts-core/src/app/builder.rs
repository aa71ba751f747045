//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - decorator の適用を 1 か所に集約する

use std::sync::Arc;

use crate::app::command::{CreateFactHandler, DeleteFactHandler, UpdateFactHandler};
use crate::app::decorator::{apply_command_decorators, apply_query_decorators};
use crate::app::query::{AllFactsHandler, FactByIdHandler, FactCountHandler, RandomFactHandler};
use crate::app::{Application, Commands, Queries};
use crate::ports::{FactReadModel, FactRepository, IdGenerator, MetricsClient, SystemClock, UlidGenerator};

/// AppBuilder は Application を構築
///
/// # Fail-fast 設計
/// - repository / read_model / metrics は必須
/// - 設定されていなければ build() が BuildError を返す（リクエスト時には失敗しない）
/// - id_generator は省略可能（既定は SystemClock ベースの ULID）
#[derive(Default)]
pub struct AppBuilder {
    repository: Option<Arc<dyn FactRepository>>,
    read_model: Option<Arc<dyn FactReadModel>>,
    metrics: Option<Arc<dyn MetricsClient>>,
    id_generator: Option<Arc<dyn IdGenerator>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Missing dependency: {0}. It must be provided before build().")]
    MissingDependency(&'static str),
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(mut self, repository: Arc<dyn FactRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn read_model(mut self, read_model: Arc<dyn FactReadModel>) -> Self {
        self.read_model = Some(read_model);
        self
    }

    pub fn metrics(mut self, metrics: Arc<dyn MetricsClient>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = Some(id_generator);
        self
    }

    /// AppBuilder を構築して Application を生成
    ///
    /// # 検証
    /// 必須の依存関係を repository → read_model → metrics の順に確認し、
    /// 最初に見つかった不足を `BuildError::MissingDependency` として返す
    pub fn build(self) -> Result<Application, BuildError> {
        let repository = self.repository.ok_or(BuildError::MissingDependency("repository"))?;
        let read_model = self.read_model.ok_or(BuildError::MissingDependency("read_model"))?;
        let metrics = self.metrics.ok_or(BuildError::MissingDependency("metrics"))?;
        let ids = self
            .id_generator
            .unwrap_or_else(|| Arc::new(UlidGenerator::new(SystemClock)));

        let commands = Commands {
            create_fact: apply_command_decorators(CreateFactHandler::new(repository.clone()), metrics.clone()),
            update_fact: apply_command_decorators(UpdateFactHandler::new(repository.clone()), metrics.clone()),
            delete_fact: apply_command_decorators(DeleteFactHandler::new(repository), metrics.clone()),
        };
        let queries = Queries {
            fact_by_id: apply_query_decorators(FactByIdHandler::new(read_model.clone()), metrics.clone()),
            random_fact: apply_query_decorators(RandomFactHandler::new(read_model.clone()), metrics.clone()),
            all_facts: apply_query_decorators(AllFactsHandler::new(read_model.clone()), metrics.clone()),
            fact_count: apply_query_decorators(FactCountHandler::new(read_model), metrics),
        };

        tracing::debug!("application wired");
        Ok(Application { commands, queries, ids })
    }
}
