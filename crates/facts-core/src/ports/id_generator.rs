//! IdGenerator port - FactId 生成の抽象化
//!
//! Fact の ID はストアではなく呼び出し側が割り当てます。
//! transport 層が ID を持たないリクエスト（新規作成など）を受けたとき、
//! この port で ID を発行してから `CreateFact` を組み立てます。

use crate::domain::FactId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は分散環境で衝突しない FactId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数タスクから共有される）
pub trait IdGenerator: Send + Sync {
    fn generate_fact_id(&self) -> FactId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って timestamp 部分を決めるため、FixedClock を渡すと
/// timestamp が固定された ID を生成できます（ランダム部分は毎回異なる）。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_fact_id(&self) -> FactId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        FactId::from(ulid)
    }
}
