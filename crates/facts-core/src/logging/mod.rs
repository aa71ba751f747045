//! Structured logging for the facts application core.
//!
//! - `init(profile)` で tracing subscriber を 1 度だけ初期化
//! - イベント名と検索用のフィールド名は下の定数に揃える
//! - `capture` はテストでログ出力を検証するための Layer

pub mod capture;
pub mod init;

pub use self::init::{Profile, init};

// handler 呼び出しのイベントに付くフィールド:
// kind, handler, event, input, duration_ms, err_kind, err_slug, error
// tracing のマクロはフィールド名を識別子で受け取るため、定数にするのは検索に使う名前だけ
pub const FIELD_HANDLER: &str = "handler";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
