//! MCP capability and initialization types.

use sandtimer::json::Value;
use sandtimer::object;

/// Dated MCP revision, answered whatever revision the client asks for.
pub const MCP_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mcp-sandtimer";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolsCapability {
    pub list_changed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

impl ServerCapabilities {
    pub fn default_capabilities() -> Self {
        Self {
            tools: Some(ToolsCapability {
                list_changed: false,
            }),
        }
    }

    pub fn to_value(&self) -> Value {
        match &self.tools {
            Some(tools) => object! {
                "tools" => object! { "listChanged" => tools.list_changed },
            },
            None => object! {},
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: Implementation,
}

impl InitializeResult {
    pub fn default_result() -> Self {
        Self {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities::default_capabilities(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        }
    }

    pub fn to_value(&self) -> Value {
        object! {
            "protocolVersion" => self.protocol_version.as_str(),
            "capabilities" => self.capabilities.to_value(),
            "serverInfo" => object! {
                "name" => self.server_info.name.as_str(),
                "version" => self.server_info.version.as_str(),
            },
        }
    }
}
