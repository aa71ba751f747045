//! Errors - エラー型と分類
//!
//! # 分類
//! - `ValidationError`: Fact の不変条件違反（クライアント入力の誤り、リトライ不要）
//! - `FactsError`: handler / repository が返すすべてのエラー
//! - `ErrorKind`: transport 層がレスポンスに変換するための運用分類

use thiserror::Error;

use super::ids::FactId;

/// ErrorKind は FactsError の運用分類
///
/// transport 層はこの分類だけを見てプロトコル固有のレスポンス
/// （HTTP なら 400 / 404 / 409 / 503 ...）に変換します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// クライアント入力の誤り
    Validation,
    NotFound,
    AlreadyExists,
    /// 対象がまだ存在しない（空のストアからのランダム取得など）
    Unavailable,
    /// Context のキャンセル・期限切れ
    Cancelled,
    /// ストア障害（I/O, タイムアウト, 予期しない状態）
    Infrastructure,
}

/// Fact の不変条件違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty fact {field}")]
    EmptyField { field: &'static str },

    #[error("text too long ({len} characters, max {max})", max = super::fact::MAX_FIELD_LEN)]
    TextTooLong { len: usize },

    #[error("source too long ({len} characters, max {max})", max = super::fact::MAX_FIELD_LEN)]
    SourceTooLong { len: usize },
}

impl ValidationError {
    pub fn slug(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { .. } => "empty-field",
            ValidationError::TextTooLong { .. } => "text-too-long",
            ValidationError::SourceTooLong { .. } => "source-too-long",
        }
    }
}

/// FactsError は Command / Query handler と repository の共通エラー
///
/// # 設計原則
/// - 期待される結果（Validation, NotFound, AlreadyExists）は panic ではなく値として返す
/// - ストア内部のエラーオブジェクトはそのまま外に出さず、`Store` に文脈付きで包む
/// - トランザクション競合はストア側でリトライされ、この型には現れない
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("fact '{id}' not found")]
    NotFound { id: FactId },

    #[error("fact '{id}' already exists")]
    AlreadyExists { id: FactId },

    #[error("no facts available")]
    NoFactsAvailable,

    #[error("store error during {op} of '{key}': {message}")]
    Store {
        op: &'static str,
        key: String,
        message: String,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl FactsError {
    pub fn store(op: &'static str, key: impl Into<String>, message: impl Into<String>) -> Self {
        FactsError::Store {
            op,
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FactsError::Validation(_) => ErrorKind::Validation,
            FactsError::NotFound { .. } => ErrorKind::NotFound,
            FactsError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            FactsError::NoFactsAvailable => ErrorKind::Unavailable,
            FactsError::Store { .. } => ErrorKind::Infrastructure,
            FactsError::Cancelled | FactsError::DeadlineExceeded => ErrorKind::Cancelled,
        }
    }

    /// transport 層向けの安定した識別子（例: `text-too-long`）
    pub fn slug(&self) -> &'static str {
        match self {
            FactsError::Validation(e) => e.slug(),
            FactsError::NotFound { .. } => "fact-not-found",
            FactsError::AlreadyExists { .. } => "fact-already-exists",
            FactsError::NoFactsAvailable => "no-facts-available",
            FactsError::Store { .. } => "store-error",
            FactsError::Cancelled => "cancelled",
            FactsError::DeadlineExceeded => "deadline-exceeded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert_and_keep_their_slug() {
        let err: FactsError = ValidationError::TextTooLong { len: 1001 }.into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.slug(), "text-too-long");
        assert_eq!(err.to_string(), "text too long (1001 characters, max 1000)");
    }

    #[test]
    fn store_error_message_names_operation_and_key() {
        let err = FactsError::store("update", "f1", "disk on fire");
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert_eq!(err.to_string(), "store error during update of 'f1': disk on fire");
    }

    #[test]
    fn cancellation_errors_share_a_kind() {
        assert_eq!(FactsError::Cancelled.kind(), ErrorKind::Cancelled);
        assert_eq!(FactsError::DeadlineExceeded.kind(), ErrorKind::Cancelled);
        assert_ne!(FactsError::Cancelled.slug(), FactsError::DeadlineExceeded.slug());
    }
}
