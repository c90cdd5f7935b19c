pub mod chain;
pub mod survey;
