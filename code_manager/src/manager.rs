//manager.rs
pub mod manager;
