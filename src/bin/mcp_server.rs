//! FRLG Dex MCP Server
//!
//! A Model Context Protocol server (rmcp, stdio transport) that exposes the dex
//! lookups, type calculators and team analysis as tools.

use std::borrow::Cow;
use std::sync::Arc;

use frlg_dex::mcp_interface::*;
use frlg_dex::{logging, Dex, DexConfig, DexResult, PokeApiClient};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ErrorData as McpError, *},
    schemars, tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use serde::Deserialize;
use tokio::io::{stdin, stdout};
use tracing::info;

#[derive(Debug, Clone)]
pub struct DexService {
    tool_router: ToolRouter<DexService>,
    dex: Arc<Dex<PokeApiClient>>,
}

// Tool request structures
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PokemonRequest {
    #[schemars(description = "Pokemon name or national dex number, e.g. 'charizard' or '6'")]
    pub pokemon: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TypesRequest {
    #[schemars(description = "One or two type names, e.g. ['ghost', 'dark']")]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MoveRequest {
    #[schemars(description = "Move name or id, e.g. 'thunder-punch'")]
    pub move_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListRequest {
    #[schemars(description = "Page size (default 151, at most 251)")]
    pub limit: Option<u32>,
    #[schemars(description = "Number of entries to skip (default 0)")]
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct EggGroupRequest {
    #[schemars(description = "Egg group API name, e.g. 'monster'. Omit to list all groups")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TeamRequest {
    #[schemars(description = "Up to six Pokemon names or dex numbers")]
    pub team: Vec<String>,
}

/// Request problems and unknown names are reported to the model as tool output;
/// upstream outages are protocol errors.
fn into_tool_result(result: DexResult<String>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(err) if err.is_retryable() => Err(McpError {
            code: ErrorCode(-32603),
            message: Cow::from(err.to_string()),
            data: None,
        }),
        Err(err) => Ok(CallToolResult::success(vec![Content::text(format_error(
            &err,
        ))])),
    }
}

#[tool_router]
impl DexService {
    pub fn new(dex: Dex<PokeApiClient>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            dex: Arc::new(dex),
        }
    }

    #[tool(description = "Look up a Pokemon: types, stats, FireRed/LeafGreen learnset, egg groups and defensive weaknesses")]
    async fn lookup_pokemon(
        &self,
        Parameters(request): Parameters<PokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.pokemon_detail(&request.pokemon).await;
        into_tool_result(result.map(|detail| format_pokemon_detail(&detail)))
    }

    #[tool(description = "Show which attacking types a Pokemon is weak to, resists or is immune to")]
    async fn pokemon_weaknesses(
        &self,
        Parameters(request): Parameters<PokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.pokemon_weaknesses(&request.pokemon).await;
        into_tool_result(result.map(|w| format_pokemon_weaknesses(&w)))
    }

    #[tool(description = "Generation 3 defensive chart for a combination of one or two types")]
    async fn type_weaknesses(
        &self,
        Parameters(request): Parameters<TypesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.type_weaknesses(&request.types);
        into_tool_result(result.map(|w| format_type_weaknesses(&w)))
    }

    #[tool(description = "Look up a move with its Generation 3 physical/special category")]
    async fn lookup_move(
        &self,
        Parameters(request): Parameters<MoveRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.move_detail(&request.move_name).await;
        into_tool_result(result.map(|detail| format_move_detail(&detail)))
    }

    #[tool(description = "List Pokemon in national dex order")]
    async fn list_pokemon(
        &self,
        Parameters(request): Parameters<ListRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.list_pokemon(request.limit, request.offset).await;
        into_tool_result(result.map(|listing| format_pokemon_list(&listing)))
    }

    #[tool(description = "List egg groups, or the Generation 1-3 members of one egg group")]
    async fn egg_groups(
        &self,
        Parameters(request): Parameters<EggGroupRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = match request.name {
            Some(name) => self
                .dex
                .egg_group_detail(&name)
                .await
                .map(|detail| format_egg_group_detail(&detail)),
            None => Ok(format_egg_groups(&self.dex.egg_groups())),
        };
        into_tool_result(result)
    }

    #[tool(description = "Show the evolution chain of a Pokemon with evolution conditions")]
    async fn evolution_chain(
        &self,
        Parameters(request): Parameters<PokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.evolution_chain(&request.pokemon).await;
        into_tool_result(result.map(|steps| format_evolution_chain(&steps)))
    }

    #[tool(description = "Where to catch a Pokemon in FireRed and LeafGreen")]
    async fn encounters(
        &self,
        Parameters(request): Parameters<PokemonRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.encounters(&request.pokemon).await;
        into_tool_result(result.map(|table| format_encounters(&table)))
    }

    #[tool(description = "Analyse the defensive type coverage of a team of up to six Pokemon")]
    async fn analyse_team(
        &self,
        Parameters(request): Parameters<TeamRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self.dex.analyse_team(&request.team).await;
        into_tool_result(result.map(|analysis| analysis.to_string()))
    }

    #[tool(description = "List every TM and HM in FireRed/LeafGreen with type and category")]
    async fn tms_hms(&self) -> Result<CallToolResult, McpError> {
        let text = format_teachable_moves("TMs and HMs", &self.dex.tms_hms());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "List the FireRed/LeafGreen move tutors")]
    async fn move_tutors(&self) -> Result<CallToolResult, McpError> {
        let text = format_teachable_moves("Move tutors", &self.dex.move_tutors());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Which types are physical and which are special in Generation 3")]
    async fn move_categories(&self) -> Result<CallToolResult, McpError> {
        let text = format_categories(&self.dex.categories());
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for DexService {}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(logging::DEFAULT_FILTER);
    info!("FRLG Dex MCP Server starting...");

    let config = DexConfig::load()?;
    info!(base_url = %config.base_url, "using upstream");
    let service = DexService::new(Dex::from_config(config)?);
    let transport = (stdin(), stdout());

    let server = service.serve(transport).await?;
    info!("Server running, waiting for shutdown...");
    let quit_reason = server.waiting().await?;

    info!(?quit_reason, "FRLG Dex MCP Server exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frlg_dex::DexError;

    #[test]
    fn only_retryable_failures_become_protocol_errors() {
        let outage = into_tool_result(Err(DexError::UpstreamUnavailable("HTTP 503".into())));
        assert_eq!(outage.unwrap_err().code.0, -32603);

        let missing = into_tool_result(Err(DexError::not_found("Pokemon", "missingno")));
        assert!(missing.is_ok());
    }
}
