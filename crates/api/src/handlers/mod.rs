pub mod comments;
pub mod products;
