//! Command - 状態を変更するリクエストとその handler
//!
//! Command は不変の値オブジェクトです。handler は `FactRepository` にのみ依存し、
//! 構築は crate 内に閉じています（decorator を通さずに使えないようにするため）。

mod create_fact;
mod delete_fact;
mod update_fact;

pub use self::create_fact::{CreateFact, CreateFactHandler};
pub use self::delete_fact::{DeleteFact, DeleteFactHandler};
pub use self::update_fact::{UpdateFact, UpdateFactHandler};
