// src/handlers/mod.rs

pub mod live;
pub mod quiz;
pub mod results;
