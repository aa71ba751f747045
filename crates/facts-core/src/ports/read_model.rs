//! FactReadModel port - Query handler 側の読み取り契約
//!
//! Command 側の FactRepository とは分けて定義し、読み取り専用であることを型で示します。

use async_trait::async_trait;

use crate::domain::{Fact, FactId, FactsError};
use crate::ports::Context;

#[async_trait]
pub trait FactReadModel: Send + Sync {
    /// ID で Fact を取得（存在しなければ `NotFound`）
    async fn find_fact_by_id(&self, ctx: &Context, id: &FactId) -> Result<Fact, FactsError>;

    /// 現在保存されているすべての Fact の ID
    async fn fact_ids(&self, ctx: &Context) -> Result<Vec<FactId>, FactsError>;

    /// 現在保存されているすべての Fact（ID 順）
    async fn all_facts(&self, ctx: &Context) -> Result<Vec<Fact>, FactsError>;

    async fn count_facts(&self, ctx: &Context) -> Result<usize, FactsError>;
}
