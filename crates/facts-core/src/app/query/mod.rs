//! Query - 読み取り専用のリクエストとその handler
//!
//! Query handler は `FactReadModel` にのみ依存し、ストアを変更しません。

mod all_facts;
mod fact_by_id;
mod fact_count;
mod random_fact;

pub use self::all_facts::{AllFacts, AllFactsHandler};
pub use self::fact_by_id::{FactById, FactByIdHandler};
pub use self::fact_count::{FactCount, FactCountHandler};
pub use self::random_fact::{RandomFact, RandomFactHandler};
