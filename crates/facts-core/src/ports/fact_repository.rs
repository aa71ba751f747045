//! FactRepository port - Command handler が依存する唯一のストレージ契約
//!
//! 具体的なストア（ドキュメント DB, RDB, InMemory）はこの trait の裏側で
//! 差し替え可能です。トランザクションとリトライの仕組みは実装の内側に閉じ込め、
//! handler には漏らしません。

use async_trait::async_trait;

use crate::domain::{Fact, FactId, FactsError};
use crate::ports::Context;

/// update に渡す変換関数
///
/// 競合時にストアが再実行するため `Fn`（何度呼ばれても同じ結果になる純粋関数）を要求します。
/// Err を返すとトランザクションは書き込みなしで中断され、そのエラーがそのまま返ります。
pub type MutateFn<'a> = dyn Fn(Fact) -> Result<Fact, FactsError> + Send + Sync + 'a;

/// FactRepository は Fact の永続化を抽象化
///
/// # 設計原則
/// - `add` は既存キーを上書きしない（`AlreadyExists`）
/// - `update` は同一キーに対して直列化可能（read-modify-write がアトミック）
/// - 競合（TransactionConflict）は実装内でリトライし、呼び出し側には見せない
/// - すべての操作は Context のキャンセル・期限を尊重し、中断時はコミットしない
#[async_trait]
pub trait FactRepository: Send + Sync {
    async fn add(&self, ctx: &Context, fact: Fact) -> Result<(), FactsError>;

    async fn get(&self, ctx: &Context, id: &FactId) -> Result<Fact, FactsError>;

    async fn delete(&self, ctx: &Context, id: &FactId) -> Result<(), FactsError>;

    async fn update(
        &self,
        ctx: &Context,
        id: &FactId,
        mutate: &MutateFn<'_>,
    ) -> Result<(), FactsError>;
}
