//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! application 層（handler）はこれらの trait にのみ依存し、
//! 具体的なストアやメトリクス送信先は impls または外部クレートが実装します。

pub mod clock;
pub mod context;
pub mod fact_repository;
pub mod id_generator;
pub mod metrics;
pub mod read_model;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::context::{CancelHandle, Context};
pub use self::fact_repository::{FactRepository, MutateFn};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::metrics::{MetricsClient, NoopMetrics};
pub use self::read_model::FactReadModel;
