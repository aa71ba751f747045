//! Query trait - 読み取り専用の要求

use std::fmt::Debug;

/// Query は 1 つの読み取り要求を表す不変の値
///
/// `Output` で handler の戻り値の型を Query ごとに固定します。
/// `QueryHandler<FactById>` は必ず `Fact` を返す、とコンパイル時に保証されます。
pub trait Query: Debug + Send + Sync + 'static {
    const NAME: &'static str;

    type Output: Debug + Send + 'static;
}
