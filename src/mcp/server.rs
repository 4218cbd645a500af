//! FNA MCP Server Implementation
//!
//! Implements the MCP server with all FNA tools.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::context::AppContext;
use crate::error::FnaError;
use crate::models::StandardUpsert;
use crate::tools::status::StatusTracker;
use crate::tools::{analysis, foods, standards, status};

/// FNA MCP Service
#[derive(Clone)]
pub struct FnaService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    ctx: AppContext,
    tool_router: ToolRouter<FnaService>,
}

impl FnaService {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(ctx.config.database_path.clone()))),
            ctx,
            tool_router: Self::tool_router(),
        }
    }
}

/// Request problems become invalid_params, everything else internal_error
fn to_mcp_error(e: FnaError) -> McpError {
    if e.is_client_error() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        tracing::warn!("tool failed: {}", e);
        McpError::internal_error(e.to_string(), None)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Food Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFoodsParams {
    /// Page number, starting at 1 (default 1)
    pub page: Option<i64>,
    /// Foods per page, 1-100 (default 10)
    pub limit: Option<i64>,
    /// Only foods whose name contains this text
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodsParams {
    /// Full or partial food name
    pub query: String,
    /// Maximum results, 1-100 (default 10)
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodNameParams {
    /// Exact food name (case-insensitive)
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodNamesParams {
    /// Comma-separated food names, e.g. "Nasi Putih, Tempe Goreng"
    pub names: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ComparisonChartParams {
    /// Comma-separated food names (2-5)
    pub names: String,
    /// "all" for energy/protein/fat/carbohydrates (default) or a nutrient label such as "Iron (mg)"
    pub nutrient: Option<String>,
    /// Where to write the PNG file
    pub output_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NutritionChartParams {
    /// Exact food name (case-insensitive)
    pub name: String,
    /// Where to write the PNG file
    pub output_path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddFoodParams {
    pub name: String,
    /// Nutrient values keyed by label, e.g. {"Energy (kJ)": 540, "Protein (g)": 2.1}
    #[serde(default)]
    pub values: HashMap<String, Option<f64>>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateFoodParams {
    /// Current food name
    pub name: String,
    pub new_name: Option<String>,
    /// Values to change, keyed by nutrient label. null clears a value.
    #[serde(default)]
    pub values: HashMap<String, Option<f64>>,
}

// ============================================================================
// Standard Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetStandardParams {
    /// Nutrient label, e.g. "Protein (g)"
    pub nutrient: String,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Free-text daily recommendation
    pub daily_recommendation: Option<String>,
    /// What the nutrient does
    pub function_text: Option<String>,
    pub excess_effect: Option<String>,
    pub deficiency_effect: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl FnaService {
    // --- Status ---

    #[tool(description = "Get the current status of the FNA service including build info, database status, cache size, and process information")]
    async fn fna_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.ctx);
        json_result(&status)
    }

    #[tool(description = "Get instructions for analyzing and comparing foods. Call this when starting an analysis session or when unsure how to use the FNA tools.")]
    fn analysis_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ANALYSIS_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ANALYSIS_INSTRUCTIONS)]))
    }

    #[tool(description = "Clear all cached query results")]
    fn clear_cache(&self) -> Result<CallToolResult, McpError> {
        json_result(&status::clear_cache(&self.ctx))
    }

    // --- Foods ---

    #[tool(description = "List foods alphabetically with pagination and an optional name filter")]
    fn list_foods(&self, Parameters(p): Parameters<ListFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::list_foods(&self.ctx, p.page, p.limit, p.search.as_deref()).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Search foods by name. Exact matches first, then prefix matches, then other matches.")]
    fn search_foods(&self, Parameters(p): Parameters<SearchFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::search_foods(&self.ctx, &p.query, p.limit).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Get one food with all nutrient values by exact name (case-insensitive)")]
    fn get_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::get_food(&self.ctx, &p.name).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Get several foods by comma-separated names. Names with no match are listed as missing.")]
    fn get_multiple_foods(&self, Parameters(p): Parameters<FoodNamesParams>) -> Result<CallToolResult, McpError> {
        let result = foods::get_multiple_foods(&self.ctx, &p.names).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Add a food with nutrient values keyed by nutrient label")]
    fn add_food(&self, Parameters(p): Parameters<AddFoodParams>) -> Result<CallToolResult, McpError> {
        let result = foods::add_food(&self.ctx, &p.name, &p.values).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Rename a food and/or change individual nutrient values")]
    fn update_food(&self, Parameters(p): Parameters<UpdateFoodParams>) -> Result<CallToolResult, McpError> {
        let result = foods::update_food(&self.ctx, &p.name, p.new_name.as_deref(), &p.values)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a food by name")]
    fn delete_food(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = foods::delete_food(&self.ctx, &p.name).map_err(to_mcp_error)?;
        json_result(&result)
    }

    // --- Standards ---

    #[tool(description = "Get all nutrition standards (recommended ranges and guidance) sorted by nutrient")]
    fn get_standards(&self) -> Result<CallToolResult, McpError> {
        let result = standards::get_standards(&self.ctx).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Create or replace the standard for one nutrient")]
    fn set_standard(&self, Parameters(p): Parameters<SetStandardParams>) -> Result<CallToolResult, McpError> {
        let data = StandardUpsert {
            nutrient: p.nutrient,
            minimum: p.minimum,
            maximum: p.maximum,
            daily_recommendation: p.daily_recommendation,
            function_text: p.function_text,
            excess_effect: p.excess_effect,
            deficiency_effect: p.deficiency_effect,
        };
        let result = standards::set_standard(&self.ctx, data).map_err(to_mcp_error)?;
        json_result(&result)
    }

    // --- Analysis ---

    #[tool(description = "Compare one food against every nutrition standard: status per nutrient plus the share of nutrients in range")]
    fn get_nutrition_analysis(&self, Parameters(p): Parameters<FoodNameParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::get_nutrition_analysis(&self.ctx, &p.name).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Compare 2-5 foods side by side (comma-separated names): per-nutrient values, statuses, recommended ranges and insights")]
    fn compare_foods(&self, Parameters(p): Parameters<FoodNamesParams>) -> Result<CallToolResult, McpError> {
        let result = analysis::compare_foods(&self.ctx, &p.names).map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Write a PNG bar chart comparing 2-5 foods, either the major nutrients (\"all\") or one nutrient")]
    fn generate_comparison_chart(&self, Parameters(p): Parameters<ComparisonChartParams>) -> Result<CallToolResult, McpError> {
        let output_path = PathBuf::from(p.output_path);
        let result = analysis::generate_comparison_chart(&self.ctx, &p.names, p.nutrient.as_deref(), &output_path)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }

    #[tool(description = "Write a PNG bar chart of one food's values against the minimum and maximum of up to 10 bounded standards")]
    fn generate_nutrition_chart(&self, Parameters(p): Parameters<NutritionChartParams>) -> Result<CallToolResult, McpError> {
        let output_path = PathBuf::from(p.output_path);
        let result = analysis::generate_nutrition_chart(&self.ctx, &p.name, &output_path)
            .map_err(to_mcp_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for FnaService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "fna".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Food Nutrition Analyzer".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Food Nutrition Analyzer (FNA) - Compare foods against nutrition standards. \
                 IMPORTANT: Call analysis_instructions first. \
                 Foods: list_foods/search_foods/get_food/get_multiple_foods, add_food/update_food/delete_food. \
                 Standards: get_standards, set_standard. \
                 Analysis: get_nutrition_analysis (one food), compare_foods (2-5 foods), \
                 generate_comparison_chart (2-5 foods), generate_nutrition_chart (one food vs standards). \
                 Maintenance: fna_status, clear_cache."
                    .into(),
            ),
        }
    }
}
