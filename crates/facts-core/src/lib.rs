//! facts-core
//!
//! Application core for storing and serving short animal facts.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（Fact, FactId, errors）
//! - **ports**: 抽象化レイヤー（FactRepository, FactReadModel, MetricsClient, Context, など）
//! - **typed**: 型付き Command / Query API（Command / Query trait, handler trait）
//! - **app**: アプリケーションロジック（command / query handler, decorator, builder）
//! - **impls**: 実装（InMemoryFactStore, InMemoryMetrics, transaction runner）
//! - **logging**: tracing の初期化と共通フィールド名
//! - **config**: 環境変数による設定
//!
//! # 呼び出しの流れ
//! transport → `Application` → LoggingDecorator → MetricsDecorator → handler → port → store

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod logging;
pub mod ports;
pub mod typed;

pub use crate::app::{AppBuilder, Application, BuildError};
pub use crate::domain::{ErrorKind, Fact, FactId, FactsError, ValidationError};
pub use crate::ports::Context;
