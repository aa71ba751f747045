use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Fact, FactId, FactsError};
use crate::ports::{Context, FactRepository};
use crate::typed::{Command, CommandHandler};

/// 新しい Fact を作成する
///
/// ID は呼び出し側が決めます。同じ ID の Fact が既にあれば `AlreadyExists`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateFact {
    pub id: FactId,
    pub text: String,
    pub source: String,
}

impl CreateFact {
    pub fn new(id: impl Into<FactId>, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            source: source.into(),
        }
    }
}

impl Command for CreateFact {
    const NAME: &'static str = "create_fact";
}

pub struct CreateFactHandler {
    repository: Arc<dyn FactRepository>,
}

impl CreateFactHandler {
    pub(crate) fn new(repository: Arc<dyn FactRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<CreateFact> for CreateFactHandler {
    async fn handle(&self, ctx: &Context, cmd: CreateFact) -> Result<(), FactsError> {
        let fact = Fact::new(cmd.id, cmd.text, cmd.source)?;
        self.repository.add(ctx, fact).await
    }
}
