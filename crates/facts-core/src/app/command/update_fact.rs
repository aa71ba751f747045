use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{FactId, FactsError};
use crate::ports::{Context, FactRepository};
use crate::typed::{Command, CommandHandler};

/// 既存の Fact の text と source を置き換える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateFact {
    pub id: FactId,
    pub new_text: String,
    pub new_source: String,
}

impl UpdateFact {
    pub fn new(id: impl Into<FactId>, new_text: impl Into<String>, new_source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            new_text: new_text.into(),
            new_source: new_source.into(),
        }
    }
}

impl Command for UpdateFact {
    const NAME: &'static str = "update_fact";
}

pub struct UpdateFactHandler {
    repository: Arc<dyn FactRepository>,
}

impl UpdateFactHandler {
    pub(crate) fn new(repository: Arc<dyn FactRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<UpdateFact> for UpdateFactHandler {
    /// read-modify-write はストアのトランザクション内で行う
    ///
    /// mutate は競合時に再実行されるため、入力を clone して毎回同じ結果を返します。
    async fn handle(&self, ctx: &Context, cmd: UpdateFact) -> Result<(), FactsError> {
        let UpdateFact {
            id,
            new_text,
            new_source,
        } = cmd;

        self.repository
            .update(ctx, &id, &|mut fact| {
                fact.update_text(new_text.clone())?;
                fact.update_source(new_source.clone())?;
                Ok(fact)
            })
            .await
    }
}
