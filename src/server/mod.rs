//! MCP server exposing the README tools over stdio

pub mod tools;

pub use tools::*;

use crate::config::Config;
use crate::error::{Error, Result};
use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    transport::stdio,
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
};
use std::sync::Arc;

/// MCP handler delegating to a [`Toolbox`]
#[derive(Clone)]
pub struct ReadmeServer {
    toolbox: Arc<Toolbox>,
    name: String,
    instructions: String,
}

impl ReadmeServer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            toolbox: Arc::new(Toolbox::new(config)?),
            name: config.server.name.clone(),
            instructions: config.server.instructions.clone(),
        })
    }

    /// Tool listing in MCP form
    pub fn tools(&self) -> Vec<Tool> {
        self.toolbox
            .definitions()
            .into_iter()
            .map(|def| Tool::new(def.name, def.description, Arc::new(def.input_schema)))
            .collect()
    }
}

impl ServerHandler for ReadmeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(self.instructions.clone()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        let toolbox = Arc::clone(&self.toolbox);
        let name = request.name.to_string();
        let arguments = request.arguments;

        let output = tokio::task::spawn_blocking(move || toolbox.dispatch(&name, arguments))
            .await
            .map_err(|e| McpError::internal_error(format!("tool task failed: {}", e), None))?;

        let content = vec![Content::text(output.text)];
        Ok(if output.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }
}

/// Serve the tools on stdin/stdout until the client disconnects
pub async fn serve(config: &Config) -> Result<()> {
    let server = ReadmeServer::new(config)?;
    tracing::info!("Starting {} on stdio", config.server.name);

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("serving error: {:?}", e))
        .map_err(|e| Error::server(e.to_string()))?;

    let reason = service
        .waiting()
        .await
        .map_err(|e| Error::server(e.to_string()))?;
    tracing::info!("Server stopped: {:?}", reason);
    Ok(())
}
