// src/handlers/mod.rs
pub mod error;
pub mod filters;
pub mod report;
pub mod sellers;
