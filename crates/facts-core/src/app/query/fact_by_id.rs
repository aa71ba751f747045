use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Fact, FactId, FactsError};
use crate::ports::{Context, FactReadModel};
use crate::typed::{Query, QueryHandler};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactById {
    pub id: FactId,
}

impl FactById {
    pub fn new(id: impl Into<FactId>) -> Self {
        Self { id: id.into() }
    }
}

impl Query for FactById {
    const NAME: &'static str = "fact_by_id";
    type Output = Fact;
}

pub struct FactByIdHandler {
    read_model: Arc<dyn FactReadModel>,
}

impl FactByIdHandler {
    pub(crate) fn new(read_model: Arc<dyn FactReadModel>) -> Self {
        Self { read_model }
    }
}

#[async_trait]
impl QueryHandler<FactById> for FactByIdHandler {
    async fn handle(&self, ctx: &Context, query: FactById) -> Result<Fact, FactsError> {
        self.read_model.find_fact_by_id(ctx, &query.id).await
    }
}
