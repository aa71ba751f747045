//! Command trait - 状態を変更する要求
//!
//! # 学習ポイント
//! - Associated Constants (`const NAME`)
//! - Trait bounds の組み合わせ (Debug + Send + Sync + 'static)

use std::fmt::Debug;

/// Command は 1 つの変更要求を表す不変の値
///
/// # 使用例
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct ArchiveFact {
///     id: FactId,
/// }
///
/// impl Command for ArchiveFact {
///     const NAME: &'static str = "archive_fact";
/// }
/// ```
///
/// # Trait Bounds
/// - `Debug`: LoggingDecorator が入力を記録するため
/// - `Send + Sync + 'static`: handler を Arc で共有し、tokio タスク間で渡すため
pub trait Command: Debug + Send + Sync + 'static {
    /// handler 名（ログのフィールドやメトリクスのキーに使われる）
    ///
    /// # 命名規約
    /// - snake_case の動詞句（例: `create_fact`）
    const NAME: &'static str;
}
