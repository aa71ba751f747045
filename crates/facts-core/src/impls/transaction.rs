//! Transaction runner - 楽観的並行性制御の競合を透過的にリトライする
//!
//! ストア実装は 1 回分のトランザクション（read → mutate → commit）を同期クロージャで渡し、
//! 競合したら `TransactionError::Conflict` を返すだけでよい。
//! 競合はここで吸収され、呼び出し側（repository の利用者）には決して見えません。

use crate::domain::FactsError;
use crate::impls::RetryPolicy;
use crate::ports::Context;

/// 1 回のトランザクション試行の失敗
#[derive(Debug)]
pub enum TransactionError {
    /// 他のトランザクションが先にコミットした。新しい読み取りからやり直す
    Conflict,
    /// 書き込みなしで中断し、このエラーをそのまま返す
    Abort(FactsError),
}

impl From<FactsError> for TransactionError {
    fn from(err: FactsError) -> Self {
        TransactionError::Abort(err)
    }
}

/// `attempt` を成功か中断まで繰り返す
///
/// # フロー
/// 1. Context を確認（キャンセル・期限切れなら即終了）
/// 2. `attempt` を実行
/// 3. Conflict なら backoff（Context 付きで待機）して 1 に戻る
/// 4. `max_attempts` を使い切ったら Store エラー
pub async fn run_transaction<T, F>(
    ctx: &Context,
    policy: &RetryPolicy,
    op: &'static str,
    key: &str,
    mut attempt: F,
) -> Result<T, FactsError>
where
    F: FnMut() -> Result<T, TransactionError>,
{
    let mut attempts = 0;
    loop {
        ctx.check()?;
        attempts += 1;

        match attempt() {
            Ok(value) => return Ok(value),
            Err(TransactionError::Abort(err)) => return Err(err),
            Err(TransactionError::Conflict) => {
                if attempts >= policy.max_attempts {
                    tracing::warn!(op, key, attempts, "transaction conflict retries exhausted");
                    return Err(FactsError::store(
                        op,
                        key,
                        format!("transaction conflict retries exhausted after {attempts} attempts"),
                    ));
                }
                let delay = policy.jittered_delay(attempts);
                tracing::debug!(op, key, attempts, delay_us = delay.as_micros() as u64, "transaction conflict, retrying");
                ctx.run(tokio::time::sleep(delay)).await?;
            }
        }
    }
}
