use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{FactId, FactsError};
use crate::ports::{Context, FactRepository};
use crate::typed::{Command, CommandHandler};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteFact {
    pub id: FactId,
}

impl DeleteFact {
    pub fn new(id: impl Into<FactId>) -> Self {
        Self { id: id.into() }
    }
}

impl Command for DeleteFact {
    const NAME: &'static str = "delete_fact";
}

pub struct DeleteFactHandler {
    repository: Arc<dyn FactRepository>,
}

impl DeleteFactHandler {
    pub(crate) fn new(repository: Arc<dyn FactRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<DeleteFact> for DeleteFactHandler {
    async fn handle(&self, ctx: &Context, cmd: DeleteFact) -> Result<(), FactsError> {
        self.repository.delete(ctx, &cmd.id).await
    }
}
