//! FNA Tools module
//!
//! Tool implementations behind the MCP surface of the Food Nutrition Analyzer.

pub mod analysis;
pub mod foods;
pub mod lookup;
pub mod standards;
pub mod status;
