pub mod comment;
pub mod enrichment;
pub mod error;
pub mod product;
pub mod types;
