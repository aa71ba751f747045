//! Typed - 型付き Command / Query API
//!
//! Command / Query の種類ごとに handler を型で対応付けます。
//!
//! # 二層構造
//! - **値（Command / Query）**: 振る舞いを持たない不変の要求
//! - **処理（CommandHandler / QueryHandler）**: 要求ごとに 1 つの handler

pub mod command;
pub mod handler;
pub mod query;

pub use self::command::Command;
pub use self::handler::{CommandHandler, CommandHandlerRef, QueryHandler, QueryHandlerRef};
pub use self::query::Query;
