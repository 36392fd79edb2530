pub mod common;
pub mod quote;
