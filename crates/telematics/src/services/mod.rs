pub mod feature_extraction;
pub mod pricing;
pub mod quote;
