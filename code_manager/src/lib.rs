pub mod coordinator;
pub mod manager;
