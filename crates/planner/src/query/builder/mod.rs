pub mod upsert;
