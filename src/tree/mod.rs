pub mod dump_builder;
pub mod merge;
pub mod node;
pub mod query_builder;
pub mod walker;
