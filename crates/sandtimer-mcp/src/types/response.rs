//! MCP response types for tools.

use sandtimer::json::Value;
use sandtimer::object;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn to_value(&self) -> Value {
        match self {
            ToolContent::Text { text } => object! {
                "type" => "text",
                "text" => text.as_str(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    pub fn to_value(&self) -> Value {
        object! {
            "content" => self.content.iter().map(ToolContent::to_value).collect::<Value>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn to_value(&self) -> Value {
        object! {
            "name" => self.name.as_str(),
            "description" => self.description.as_deref(),
            "inputSchema" => self.input_schema.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolListResult {
    pub tools: Vec<ToolDefinition>,
}

impl ToolListResult {
    pub fn to_value(&self) -> Value {
        object! {
            "tools" => self.tools.iter().map(ToolDefinition::to_value).collect::<Value>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_result() {
        let value = ToolCallResult::text("Reset timer 'tea'.").to_value();
        assert_eq!(
            value.dump().unwrap(),
            r#"{"content":[{"text":"Reset timer 'tea'.","type":"text"}]}"#
        );
    }

    #[test]
    fn test_definition_uses_camel_case_schema_key() {
        let def = ToolDefinition {
            name: "noop".into(),
            description: Some("Does nothing".into()),
            input_schema: object! { "type" => "object" },
        };
        let value = def.to_value();
        assert_eq!(value["inputSchema"]["type"], "object");
        assert_eq!(value["description"], "Does nothing");
    }
}
