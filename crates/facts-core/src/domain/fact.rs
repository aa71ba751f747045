//! Fact - 唯一のエンティティ
//!
//! # 不変条件
//! - 作成時: id / text / source はすべて空でないこと
//! - 常に: text / source はそれぞれ 1000 文字以下
//!
//! 更新（`update_text` / `update_source`）では長さだけを再検証します。
//! 空文字での上書きは許可されます（部分更新の余地を残すため）。
//! 検証に失敗した場合、エンティティの状態は変化しません。

use super::errors::ValidationError;
use super::ids::FactId;

/// text / source の最大文字数（Unicode scalar value 単位）
pub const MAX_FIELD_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    id: FactId,
    text: String,
    source: String,
}

impl Fact {
    pub fn new(
        id: impl Into<FactId>,
        text: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let text = text.into();
        let source = source.into();

        if id.is_empty() {
            return Err(ValidationError::EmptyField { field: "id" });
        }
        if text.is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        if source.is_empty() {
            return Err(ValidationError::EmptyField { field: "source" });
        }

        Self::rehydrate(id, text, source)
    }

    /// ストアに保存された状態から Fact を復元
    ///
    /// 空文字の更新が許可されているため、ここでは長さのみを検証します。
    /// 壊れたレコードは Err になり、ストア側でストアエラーとして扱われます。
    pub fn rehydrate(
        id: FactId,
        text: String,
        source: String,
    ) -> Result<Self, ValidationError> {
        check_text(&text)?;
        check_source(&source)?;
        Ok(Self { id, text, source })
    }

    pub fn id(&self) -> &FactId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn update_text(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        let text = text.into();
        check_text(&text)?;
        self.text = text;
        Ok(())
    }

    pub fn update_source(&mut self, source: impl Into<String>) -> Result<(), ValidationError> {
        let source = source.into();
        check_source(&source)?;
        self.source = source;
        Ok(())
    }
}

fn check_text(text: &str) -> Result<(), ValidationError> {
    let len = text.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::TextTooLong { len });
    }
    Ok(())
}

fn check_source(source: &str) -> Result<(), ValidationError> {
    let len = source.chars().count();
    if len > MAX_FIELD_LEN {
        return Err(ValidationError::SourceTooLong { len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn long(n: usize) -> String {
        "x".repeat(n)
    }

    fn example_fact() -> Fact {
        Fact::new("f1", "Cats purr", "wiki").unwrap()
    }

    #[test]
    fn new_fact_keeps_given_values() {
        let fact = Fact::new("f1", "Cats purr", "wiki").unwrap();
        assert_eq!(fact.id(), &FactId::from("f1"));
        assert_eq!(fact.text(), "Cats purr");
        assert_eq!(fact.source(), "wiki");
    }

    #[rstest]
    #[case("", "text", "source", ValidationError::EmptyField { field: "id" })]
    #[case("f1", "", "source", ValidationError::EmptyField { field: "text" })]
    #[case("f1", "text", "", ValidationError::EmptyField { field: "source" })]
    #[case("f1", long(1001), "source", ValidationError::TextTooLong { len: 1001 })]
    #[case("f1", "text", long(1001), ValidationError::SourceTooLong { len: 1001 })]
    fn new_fact_rejects_invalid_input(
        #[case] id: String,
        #[case] text: String,
        #[case] source: String,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(Fact::new(id, text, source), Err(expected));
    }

    #[test]
    fn limit_is_inclusive_and_counted_in_characters() {
        assert!(Fact::new("f1", long(1000), long(1000)).is_ok());

        // 1000 文字のマルチバイト文字列はバイト数では 1000 を超えるが許可される
        let kana = "ね".repeat(1000);
        assert!(Fact::new("f1", kana.clone(), kana).is_ok());
    }

    #[test]
    fn update_text_replaces_text_only() {
        let mut fact = example_fact();
        fact.update_text("Cats purr loudly").unwrap();
        assert_eq!(fact.text(), "Cats purr loudly");
        assert_eq!(fact.source(), "wiki");
    }

    #[test]
    fn too_long_updates_leave_state_unchanged() {
        let mut fact = example_fact();

        let err = fact.update_text(long(1001)).unwrap_err();
        assert_eq!(err, ValidationError::TextTooLong { len: 1001 });

        let err = fact.update_source(long(2000)).unwrap_err();
        assert_eq!(err, ValidationError::SourceTooLong { len: 2000 });

        assert_eq!(fact, example_fact());
    }

    #[test]
    fn empty_updates_are_allowed_overwrites() {
        let mut fact = example_fact();
        fact.update_text("").unwrap();
        fact.update_source("").unwrap();
        assert_eq!(fact.text(), "");
        assert_eq!(fact.source(), "");
    }

    #[test]
    fn rehydrate_accepts_empty_fields_but_not_oversized_ones() {
        let restored = Fact::rehydrate(FactId::from("f1"), String::new(), "wiki".into());
        assert!(restored.is_ok());

        let corrupt = Fact::rehydrate(FactId::from("f1"), long(1001), "wiki".into());
        assert_eq!(corrupt, Err(ValidationError::TextTooLong { len: 1001 }));
    }
}
