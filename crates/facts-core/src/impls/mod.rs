//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryFactStore**: バージョン付きドキュメントストア（FactRepository + FactReadModel）
//! - **InMemoryMetrics**: カウンタとタイミングを保持する MetricsClient
//! - **run_transaction / RetryPolicy**: 楽観的並行性制御の競合リトライ
//!
//! # 本番用実装
//! 本番用のドキュメントストアは別クレートに配置し、同じ ports を実装します。

pub mod inmem_store;
pub mod metrics;
pub mod retry;
pub mod transaction;

// 主要な型を再エクスポート
pub use self::inmem_store::{FactDocument, InMemoryFactStore, StoreStats};
pub use self::metrics::{InMemoryMetrics, MetricsSnapshot, TimingSummary};
pub use self::retry::RetryPolicy;
pub use self::transaction::{TransactionError, run_transaction};
