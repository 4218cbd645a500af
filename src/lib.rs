//! Food Nutrition Analyzer (FNA) Library
//!
//! Food catalog storage and nutrient analysis against recommended standards.

pub mod build_info;
pub mod cache;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
