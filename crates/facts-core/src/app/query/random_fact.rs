//! RandomFact - 保存されている Fact から一様に 1 件選ぶ
//!
//! # フロー
//! 1. 保存されている ID を列挙し、`eligible` が指定されていれば絞り込む
//! 2. 候補が空なら `NoFactsAvailable`
//! 3. 一様に 1 件選んで取得する
//! 4. 列挙から取得までの間に削除されていた場合は、その ID を候補から外して選び直す
//!
//! 読み取り専用で、ストアには何も書き込みません。

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;

use crate::domain::{Fact, FactId, FactsError};
use crate::ports::{Context, FactReadModel};
use crate::typed::{Query, QueryHandler};

/// 削除との競合で選び直す回数の上限
const MAX_RESAMPLES: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomFact {
    /// 候補を制限する ID の集合（`None` ならすべての Fact が候補）
    pub eligible: Option<Vec<FactId>>,
}

impl RandomFact {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn among(ids: impl IntoIterator<Item = impl Into<FactId>>) -> Self {
        Self {
            eligible: Some(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl Query for RandomFact {
    const NAME: &'static str = "random_fact";
    type Output = Fact;
}

pub struct RandomFactHandler {
    read_model: Arc<dyn FactReadModel>,
}

impl RandomFactHandler {
    pub(crate) fn new(read_model: Arc<dyn FactReadModel>) -> Self {
        Self { read_model }
    }

    async fn candidates(&self, ctx: &Context, eligible: Option<&[FactId]>) -> Result<Vec<FactId>, FactsError> {
        let mut ids = self.read_model.fact_ids(ctx).await?;
        if let Some(eligible) = eligible {
            ids.retain(|id| eligible.contains(id));
        }
        Ok(ids)
    }
}

/// ThreadRng は Send ではないため、await をまたがないよう同期関数に閉じ込める
fn pick(ids: &[FactId]) -> usize {
    rand::thread_rng().gen_range(0..ids.len())
}

#[async_trait]
impl QueryHandler<RandomFact> for RandomFactHandler {
    async fn handle(&self, ctx: &Context, query: RandomFact) -> Result<Fact, FactsError> {
        let mut candidates = self.candidates(ctx, query.eligible.as_deref()).await?;

        for _ in 0..=MAX_RESAMPLES {
            if candidates.is_empty() {
                return Err(FactsError::NoFactsAvailable);
            }
            let chosen = candidates.swap_remove(pick(&candidates));
            match self.read_model.find_fact_by_id(ctx, &chosen).await {
                Err(FactsError::NotFound { id }) => {
                    tracing::debug!(id = %id, "sampled fact vanished, resampling");
                }
                result => return result,
            }
        }

        tracing::warn!(resamples = MAX_RESAMPLES, "random fact gave up after repeated misses");
        Err(FactsError::NoFactsAvailable)
    }
}
