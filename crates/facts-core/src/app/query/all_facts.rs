use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Fact, FactsError};
use crate::ports::{Context, FactReadModel};
use crate::typed::{Query, QueryHandler};

/// 保存されているすべての Fact を ID 順に返す
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllFacts;

impl Query for AllFacts {
    const NAME: &'static str = "all_facts";
    type Output = Vec<Fact>;
}

pub struct AllFactsHandler {
    read_model: Arc<dyn FactReadModel>,
}

impl AllFactsHandler {
    pub(crate) fn new(read_model: Arc<dyn FactReadModel>) -> Self {
        Self { read_model }
    }
}

#[async_trait]
impl QueryHandler<AllFacts> for AllFactsHandler {
    async fn handle(&self, ctx: &Context, _query: AllFacts) -> Result<Vec<Fact>, FactsError> {
        self.read_model.all_facts(ctx).await
    }
}
