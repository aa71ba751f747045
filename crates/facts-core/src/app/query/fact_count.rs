use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::FactsError;
use crate::ports::{Context, FactReadModel};
use crate::typed::{Query, QueryHandler};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactCount;

impl Query for FactCount {
    const NAME: &'static str = "fact_count";
    type Output = usize;
}

pub struct FactCountHandler {
    read_model: Arc<dyn FactReadModel>,
}

impl FactCountHandler {
    pub(crate) fn new(read_model: Arc<dyn FactReadModel>) -> Self {
        Self { read_model }
    }
}

#[async_trait]
impl QueryHandler<FactCount> for FactCountHandler {
    async fn handle(&self, ctx: &Context, _query: FactCount) -> Result<usize, FactsError> {
        self.read_model.count_facts(ctx).await
    }
}
