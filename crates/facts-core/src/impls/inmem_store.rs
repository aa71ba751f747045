//! InMemoryFactStore - 開発・テスト用のドキュメントストア
//!
//! # 学習ポイント
//! - ドキュメントごとのバージョンによる楽観的並行性制御（compare-and-set）
//! - serde_json::Value を「保存形式」として使い、ドメインモデルと分離する
//! - Mutex はストア内部のコミット区間だけで握り、await をまたがない
//!
//! # 保存形式
//! キー: FactId, 値: `{ "text": ..., "source": ... }`
//! バージョンはストア内部のメタデータで、ドメインからは見えません。

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Fact, FactId, FactsError};
use crate::impls::RetryPolicy;
use crate::impls::transaction::{TransactionError, run_transaction};
use crate::ports::{Context, FactReadModel, FactRepository, MutateFn};

/// 保存されるドキュメントの形
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactDocument {
    pub text: String,
    pub source: String,
}

impl From<&Fact> for FactDocument {
    fn from(fact: &Fact) -> Self {
        Self {
            text: fact.text().to_string(),
            source: fact.source().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredDocument {
    version: u64,
    data: serde_json::Value,
}

/// Observability view of the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub documents: usize,
    /// Successful writes (add, update, delete).
    pub commits: u64,
    /// Update transactions that lost a compare-and-set and were retried.
    pub conflicts: u64,
}

#[derive(Debug, Default)]
struct StoreState {
    documents: BTreeMap<FactId, StoredDocument>,
    /// 削除→再作成でも同じ番号が再利用されないよう、ストア全体で単調増加させる
    next_version: u64,
    commits: u64,
    conflicts: u64,
}

impl StoreState {
    fn allocate_version(&mut self) -> u64 {
        self.next_version += 1;
        self.next_version
    }
}

pub struct InMemoryFactStore {
    state: Mutex<StoreState>,
    retry_policy: RetryPolicy,
}

impl InMemoryFactStore {
    pub fn new(retry_policy: RetryPolicy) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            retry_policy,
        }
    }

    pub fn stats(&self) -> Result<StoreStats, FactsError> {
        let state = self.lock("stats", "*")?;
        Ok(StoreStats {
            documents: state.documents.len(),
            commits: state.commits,
            conflicts: state.conflicts,
        })
    }

    /// すべてのドキュメントを削除（テストのクリーンアップ用）
    pub fn remove_all(&self) -> Result<usize, FactsError> {
        let mut state = self.lock("remove_all", "*")?;
        let removed = state.documents.len();
        state.documents.clear();
        Ok(removed)
    }

    fn lock(&self, op: &'static str, key: &str) -> Result<MutexGuard<'_, StoreState>, FactsError> {
        self.state
            .lock()
            .map_err(|_| FactsError::store(op, key, "store lock poisoned"))
    }

    fn snapshot(&self, op: &'static str, id: &FactId) -> Result<StoredDocument, FactsError> {
        let state = self.lock(op, id.as_str())?;
        state
            .documents
            .get(id)
            .cloned()
            .ok_or_else(|| FactsError::NotFound { id: id.clone() })
    }

    fn marshal(op: &'static str, fact: &Fact) -> Result<serde_json::Value, FactsError> {
        serde_json::to_value(FactDocument::from(fact))
            .map_err(|e| FactsError::store(op, fact.id().as_str(), format!("unable to encode document: {e}")))
    }

    fn unmarshal(op: &'static str, id: &FactId, data: serde_json::Value) -> Result<Fact, FactsError> {
        let doc: FactDocument = serde_json::from_value(data)
            .map_err(|e| FactsError::store(op, id.as_str(), format!("unable to load document: {e}")))?;
        Fact::rehydrate(id.clone(), doc.text, doc.source)
            .map_err(|e| FactsError::store(op, id.as_str(), format!("stored document is invalid: {e}")))
    }

    /// update の 1 回分のトランザクション
    fn try_update(&self, ctx: &Context, id: &FactId, mutate: &MutateFn<'_>) -> Result<(), TransactionError> {
        let snapshot = self.snapshot("update", id)?;
        let current = Self::unmarshal("update", id, snapshot.data)?;

        let updated = mutate(current)?;
        if updated.id() != id {
            return Err(FactsError::store(
                "update",
                id.as_str(),
                format!("mutation changed the fact id to '{}'", updated.id()),
            )
            .into());
        }
        let data = Self::marshal("update", &updated)?;

        // キャンセル済みのトランザクションはコミットしない
        ctx.check()?;

        let mut state = self.lock("update", id.as_str())?;
        let unchanged = state
            .documents
            .get(id)
            .is_some_and(|doc| doc.version == snapshot.version);
        if !unchanged {
            state.conflicts += 1;
            return Err(TransactionError::Conflict);
        }
        let version = state.allocate_version();
        state.documents.insert(id.clone(), StoredDocument { version, data });
        state.commits += 1;
        Ok(())
    }

    /// バージョンを進めて直接書き込む（並行トランザクションの再現用）
    #[cfg(test)]
    fn write_behind_transaction(&self, fact: &Fact) {
        let data = Self::marshal("test", fact).unwrap();
        let mut state = self.state.lock().unwrap();
        let version = state.allocate_version();
        state
            .documents
            .insert(fact.id().clone(), StoredDocument { version, data });
    }
}

impl Default for InMemoryFactStore {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}

#[async_trait]
impl FactRepository for InMemoryFactStore {
    async fn add(&self, ctx: &Context, fact: Fact) -> Result<(), FactsError> {
        ctx.check()?;
        let data = Self::marshal("add", &fact)?;

        let mut state = self.lock("add", fact.id().as_str())?;
        if state.documents.contains_key(fact.id()) {
            return Err(FactsError::AlreadyExists {
                id: fact.id().clone(),
            });
        }
        let version = state.allocate_version();
        state
            .documents
            .insert(fact.id().clone(), StoredDocument { version, data });
        state.commits += 1;
        Ok(())
    }

    async fn get(&self, ctx: &Context, id: &FactId) -> Result<Fact, FactsError> {
        ctx.check()?;
        let snapshot = self.snapshot("get", id)?;
        Self::unmarshal("get", id, snapshot.data)
    }

    async fn delete(&self, ctx: &Context, id: &FactId) -> Result<(), FactsError> {
        ctx.check()?;
        let mut state = self.lock("delete", id.as_str())?;
        if state.documents.remove(id).is_none() {
            return Err(FactsError::NotFound { id: id.clone() });
        }
        state.commits += 1;
        Ok(())
    }

    async fn update(&self, ctx: &Context, id: &FactId, mutate: &MutateFn<'_>) -> Result<(), FactsError> {
        run_transaction(ctx, &self.retry_policy, "update", id.as_str(), || {
            self.try_update(ctx, id, mutate)
        })
        .await
    }
}

#[async_trait]
impl FactReadModel for InMemoryFactStore {
    async fn find_fact_by_id(&self, ctx: &Context, id: &FactId) -> Result<Fact, FactsError> {
        FactRepository::get(self, ctx, id).await
    }

    async fn fact_ids(&self, ctx: &Context) -> Result<Vec<FactId>, FactsError> {
        ctx.check()?;
        let state = self.lock("fact_ids", "*")?;
        Ok(state.documents.keys().cloned().collect())
    }

    async fn all_facts(&self, ctx: &Context) -> Result<Vec<Fact>, FactsError> {
        ctx.check()?;
        let documents: Vec<(FactId, serde_json::Value)> = {
            let state = self.lock("all_facts", "*")?;
            state
                .documents
                .iter()
                .map(|(id, doc)| (id.clone(), doc.data.clone()))
                .collect()
        };
        documents
            .into_iter()
            .map(|(id, data)| Self::unmarshal("all_facts", &id, data))
            .collect()
    }

    async fn count_facts(&self, ctx: &Context) -> Result<usize, FactsError> {
        ctx.check()?;
        let state = self.lock("count_facts", "*")?;
        Ok(state.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn fact(id: &str, text: &str) -> Fact {
        Fact::new(id, text, "wiki").unwrap()
    }

    fn store() -> InMemoryFactStore {
        InMemoryFactStore::new(RetryPolicy::new(50, Duration::from_micros(50)))
    }

    #[tokio::test]
    async fn add_then_get_returns_the_same_fact() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("f1", "Cats purr")).await.unwrap();

        let loaded = store.get(&ctx, &"f1".into()).await.unwrap();
        assert_eq!(loaded, fact("f1", "Cats purr"));
    }

    #[tokio::test]
    async fn second_add_with_same_id_fails_and_keeps_first_record() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("f1", "first")).await.unwrap();

        let err = store.add(&ctx, fact("f1", "second")).await.unwrap_err();
        assert_eq!(err, FactsError::AlreadyExists { id: "f1".into() });

        let loaded = store.get(&ctx, &"f1".into()).await.unwrap();
        assert_eq!(loaded.text(), "first");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("f1", "Cats purr")).await.unwrap();
        store.delete(&ctx, &"f1".into()).await.unwrap();

        let err = store.get(&ctx, &"f1".into()).await.unwrap_err();
        assert_eq!(err, FactsError::NotFound { id: "f1".into() });

        let err = store.delete(&ctx, &"f1".into()).await.unwrap_err();
        assert_eq!(err, FactsError::NotFound { id: "f1".into() });
    }

    #[tokio::test]
    async fn update_on_missing_id_is_not_found_and_writes_nothing() {
        let ctx = Context::background();
        let store = store();
        let calls = AtomicUsize::new(0);

        let err = store
            .update(&ctx, &"ghost".into(), &|f| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(f)
            })
            .await
            .unwrap_err();

        assert_eq!(err, FactsError::NotFound { id: "ghost".into() });
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.stats().unwrap().documents, 0);
        assert_eq!(store.stats().unwrap().commits, 0);
    }

    #[tokio::test]
    async fn mutate_error_aborts_without_writing() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("f1", "Cats purr")).await.unwrap();

        let err = store
            .update(&ctx, &"f1".into(), &|mut f| {
                f.update_text("x".repeat(1001))?;
                Ok(f)
            })
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::TextTooLong { len: 1001 }.into());
        assert_eq!(store.get(&ctx, &"f1".into()).await.unwrap().text(), "Cats purr");
        assert_eq!(store.stats().unwrap().commits, 1);
    }

    #[tokio::test]
    async fn mutation_may_not_change_identity() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("f1", "Cats purr")).await.unwrap();

        let err = store
            .update(&ctx, &"f1".into(), &|_| Ok(fact("f2", "hijacked")))
            .await
            .unwrap_err();

        assert!(matches!(err, FactsError::Store { op: "update", .. }));
        assert!(store.get(&ctx, &"f2".into()).await.is_err());
        assert_eq!(store.get(&ctx, &"f1".into()).await.unwrap().text(), "Cats purr");
    }

    #[tokio::test]
    async fn conflicting_commit_is_retried_from_a_fresh_read() {
        let ctx = Context::background();
        let store = Arc::new(store());
        store.add(&ctx, fact("f1", "0")).await.unwrap();

        let calls = AtomicUsize::new(0);
        let seen = Mutex::new(Vec::new());
        store
            .update(&ctx, &"f1".into(), &|mut f| {
                seen.lock().unwrap().push(f.text().to_string());
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    // 別のトランザクションが先にコミットした状況を作る
                    store.write_behind_transaction(&fact("f1", "10"));
                }
                let n: u32 = f.text().parse().unwrap();
                f.update_text((n + 1).to_string())?;
                Ok(f)
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*seen.lock().unwrap(), vec!["0".to_string(), "10".to_string()]);
        assert_eq!(store.get(&ctx, &"f1".into()).await.unwrap().text(), "11");
        assert_eq!(store.stats().unwrap().conflicts, 1);
    }

    #[tokio::test]
    async fn persistent_conflicts_end_in_a_store_error() {
        let ctx = Context::background();
        let store = InMemoryFactStore::new(RetryPolicy::new(3, Duration::ZERO));
        store.add(&ctx, fact("f1", "0")).await.unwrap();

        let err = store
            .update(&ctx, &"f1".into(), &|f| {
                store.write_behind_transaction(&fact("f1", "other"));
                Ok(f)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, FactsError::Store { op: "update", .. }));
        assert_eq!(store.stats().unwrap().conflicts, 3);
        assert_eq!(store.get(&ctx, &"f1".into()).await.unwrap().text(), "other");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_not_lost() {
        const N: usize = 64;
        let ctx = Context::background();
        let store = Arc::new(store());
        store.add(&ctx, fact("counter", "0")).await.unwrap();

        let mut tasks = Vec::new();
        for _ in 0..N {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                let ctx = Context::background();
                store
                    .update(&ctx, &"counter".into(), &|mut f| {
                        let n: usize = f.text().parse().map_err(|_| {
                            FactsError::store("update", "counter", "not a number")
                        })?;
                        f.update_text((n + 1).to_string())?;
                        Ok(f)
                    })
                    .await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let final_fact = store.get(&ctx, &"counter".into()).await.unwrap();
        assert_eq!(final_fact.text(), N.to_string());
    }

    #[tokio::test]
    async fn cancelled_context_prevents_commit() {
        let store = store();
        store.add(&Context::background(), fact("f1", "Cats purr")).await.unwrap();

        let (ctx, handle) = Context::with_cancel();
        let err = store
            .update(&ctx, &"f1".into(), &|mut f| {
                // mutate の途中でキャンセルされた
                handle.cancel();
                f.update_text("changed")?;
                Ok(f)
            })
            .await
            .unwrap_err();

        assert_eq!(err, FactsError::Cancelled);
        let loaded = store.get(&Context::background(), &"f1".into()).await.unwrap();
        assert_eq!(loaded.text(), "Cats purr");
    }

    #[tokio::test]
    async fn expired_context_rejects_every_operation() {
        let store = store();
        let ctx = Context::with_timeout(Duration::ZERO);

        assert_eq!(store.add(&ctx, fact("f1", "x")).await, Err(FactsError::DeadlineExceeded));
        assert_eq!(store.get(&ctx, &"f1".into()).await, Err(FactsError::DeadlineExceeded));
        assert_eq!(store.delete(&ctx, &"f1".into()).await, Err(FactsError::DeadlineExceeded));
        assert_eq!(store.fact_ids(&ctx).await, Err(FactsError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn corrupt_documents_surface_as_store_errors() {
        let ctx = Context::background();
        let store = store();
        {
            let mut state = store.state.lock().unwrap();
            let version = state.allocate_version();
            state.documents.insert(
                "bad".into(),
                StoredDocument {
                    version,
                    data: serde_json::json!({ "text": 42 }),
                },
            );
        }

        let err = store.get(&ctx, &"bad".into()).await.unwrap_err();
        assert!(matches!(err, FactsError::Store { op: "get", .. }));
    }

    #[tokio::test]
    async fn fact_ids_and_remove_all() {
        let ctx = Context::background();
        let store = store();
        store.add(&ctx, fact("b", "x")).await.unwrap();
        store.add(&ctx, fact("a", "y")).await.unwrap();

        let ids = store.fact_ids(&ctx).await.unwrap();
        assert_eq!(ids, vec![FactId::from("a"), FactId::from("b")]);

        assert_eq!(store.remove_all().unwrap(), 2);
        assert!(store.fact_ids(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn all_facts_and_count_follow_the_stored_documents() {
        let ctx = Context::background();
        let store = store();
        assert!(store.all_facts(&ctx).await.unwrap().is_empty());
        assert_eq!(store.count_facts(&ctx).await.unwrap(), 0);

        store.add(&ctx, fact("b", "Bees dance")).await.unwrap();
        store.add(&ctx, fact("a", "Ants farm")).await.unwrap();

        let facts = store.all_facts(&ctx).await.unwrap();
        assert_eq!(facts, vec![fact("a", "Ants farm"), fact("b", "Bees dance")]);
        assert_eq!(store.count_facts(&ctx).await.unwrap(), 2);

        store.delete(&ctx, &"a".into()).await.unwrap();
        assert_eq!(store.count_facts(&ctx).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn deadline_during_conflict_backoff_aborts_the_update() {
        let store = InMemoryFactStore::new(RetryPolicy {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
            multiplier: 1.0,
            max_delay: Duration::from_secs(1),
        });
        store.add(&Context::background(), fact("f1", "0")).await.unwrap();

        let ctx = Context::with_timeout(Duration::from_millis(30));
        let started = tokio::time::Instant::now();
        let err = store
            .update(&ctx, &"f1".into(), &|mut f| {
                store.write_behind_transaction(&fact("f1", "other"));
                f.update_text("mine")?;
                Ok(f)
            })
            .await
            .unwrap_err();

        assert_eq!(err, FactsError::DeadlineExceeded);
        // jitter 込みでも 500ms 以上待つはずのバックオフが期限で打ち切られている
        assert!(started.elapsed() < Duration::from_millis(400));
        assert_eq!(store.stats().unwrap().conflicts, 1);
        assert_eq!(store.stats().unwrap().commits, 1);
        let loaded = store.get(&Context::background(), &"f1".into()).await.unwrap();
        assert_eq!(loaded.text(), "other");
    }

    #[test]
    fn documents_serialize_with_text_and_source_fields() {
        let doc = FactDocument::from(&fact("f1", "Cats purr"));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, serde_json::json!({ "text": "Cats purr", "source": "wiki" }));
    }
}
