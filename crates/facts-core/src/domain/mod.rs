//! Domain model (Fact entity, identifiers, errors).
//!
//! ドメイン層は ports / app / impls のいずれにも依存しません。
//! - fact: エンティティと不変条件
//! - ids: 呼び出し側が割り当てる FactId
//! - errors: ValidationError / FactsError / ErrorKind

pub mod errors;
pub mod fact;
pub mod ids;

pub use self::errors::{ErrorKind, FactsError, ValidationError};
pub use self::fact::{Fact, MAX_FIELD_LEN};
pub use self::ids::FactId;
