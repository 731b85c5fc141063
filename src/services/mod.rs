// src/services/mod.rs
pub mod aggregate;
pub mod charts;
pub mod filter;
pub mod format;
pub mod report;
pub mod sales;
pub mod store;
