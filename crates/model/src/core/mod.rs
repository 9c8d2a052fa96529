pub mod data_type;
pub mod time;
pub mod value;
