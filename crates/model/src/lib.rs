pub mod core;
pub mod issue;
pub mod records;
