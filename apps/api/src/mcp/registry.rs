//! Static catalog of tools and resources exposed over the protocol.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use jsonschema::Validator;
use serde::Serialize;
use serde_json::{json, Value};

use crate::mcp::protocol::RpcError;
use crate::models::resume::ResumeDocument;

pub const CV_RESOURCE_URI: &str = "cv:json";
const CV_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    AskCv,
    SendEmail,
}

impl ToolName {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ask_cv" => Some(ToolName::AskCv),
            "send_email" => Some(ToolName::SendEmail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::AskCv => "ask_cv",
            ToolName::SendEmail => "send_email",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceContents {
    pub uri: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    pub text: String,
}

/// Tool and resource catalog. Built once at startup; read-only afterwards.
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    validators: HashMap<ToolName, Validator>,
    resources: Vec<ResourceDescriptor>,
    /// Pretty-printed resume, rendered once since the document never changes.
    cv_text: String,
}

impl ToolRegistry {
    pub fn new(doc: Arc<ResumeDocument>) -> Result<Self> {
        let tools = vec![
            ToolDescriptor {
                name: ToolName::AskCv.as_str(),
                description: "Answer a natural language question about the CV",
                input_schema: json!({
                    "type": "object",
                    "required": ["question"],
                    "properties": {
                        "question": {
                            "type": "string",
                            "description": "Natural language question about the CV"
                        }
                    }
                }),
            },
            ToolDescriptor {
                name: ToolName::SendEmail.as_str(),
                description: "Send a plain-text email notification",
                input_schema: json!({
                    "type": "object",
                    "required": ["recipient", "subject", "body"],
                    "properties": {
                        "recipient": { "type": "string", "description": "Recipient email address" },
                        "subject": { "type": "string", "description": "Subject line" },
                        "body": { "type": "string", "description": "Plain-text message body" }
                    }
                }),
            },
        ];

        let mut validators = HashMap::new();
        for tool in &tools {
            let name = ToolName::parse(tool.name)
                .ok_or_else(|| anyhow!("Tool {} has no ToolName", tool.name))?;
            let validator = jsonschema::validator_for(&tool.input_schema)
                .map_err(|e| anyhow!("Invalid input schema for {}: {e}", tool.name))?;
            validators.insert(name, validator);
        }

        let resources = vec![ResourceDescriptor {
            uri: CV_RESOURCE_URI,
            name: "cv",
            description: "The full CV document as JSON",
            mime_type: CV_MIME_TYPE,
        }];

        let cv_text =
            serde_json::to_string_pretty(doc.as_ref()).context("Failed to serialize CV")?;

        Ok(Self {
            tools,
            validators,
            resources,
            cv_text,
        })
    }

    pub fn list_tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn list_resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    pub fn read_resource(&self, uri: &str) -> Result<ResourceContents, RpcError> {
        if uri != CV_RESOURCE_URI {
            return Err(RpcError::UnknownResource(uri.to_string()));
        }
        Ok(ResourceContents {
            uri: CV_RESOURCE_URI,
            mime_type: CV_MIME_TYPE,
            text: self.cv_text.clone(),
        })
    }

    /// Checks arguments against the tool's declared input schema.
    /// Returns every violation found, in validator order.
    pub fn validate_arguments(&self, tool: ToolName, args: &Value) -> Result<(), Vec<String>> {
        let Some(validator) = self.validators.get(&tool) else {
            return Err(vec![format!("No schema registered for {}", tool.as_str())]);
        };
        let errors: Vec<String> = validator.iter_errors(args).map(|e| e.to_string()).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_document;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(sample_document())).unwrap()
    }

    #[test]
    fn test_catalog_contents() {
        let r = registry();
        let names: Vec<_> = r.list_tools().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["ask_cv", "send_email"]);
        assert_eq!(r.list_resources().len(), 1);
        assert_eq!(r.list_resources()[0].uri, "cv:json");
        assert_eq!(r.list_resources()[0].mime_type, "application/json");
    }

    #[test]
    fn test_read_cv_resource_round_trips() {
        let contents = registry().read_resource("cv:json").unwrap();
        let parsed: ResumeDocument = serde_json::from_str(&contents.text).unwrap();
        assert_eq!(parsed, sample_document());
        assert!(contents.text.contains("\n  \"profile\""), "expected 2-space indent");
    }

    #[test]
    fn test_unknown_resource() {
        let err = registry().read_resource("cv:yaml").unwrap_err();
        assert_eq!(err.code(), -32602);
        assert_eq!(err.to_string(), "Unknown resource: cv:yaml");
    }

    #[test]
    fn test_send_email_requires_all_fields() {
        let r = registry();
        let errors = r
            .validate_arguments(
                ToolName::SendEmail,
                &json!({"recipient": "a@example.com", "subject": "Hi"}),
            )
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("body"), "{errors:?}");
    }

    #[test]
    fn test_ask_cv_rejects_non_string_question() {
        assert!(registry()
            .validate_arguments(ToolName::AskCv, &json!({"question": 42}))
            .is_err());
        assert!(registry()
            .validate_arguments(ToolName::AskCv, &json!({"question": "name?"}))
            .is_ok());
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in [ToolName::AskCv, ToolName::SendEmail] {
            assert_eq!(ToolName::parse(tool.as_str()), Some(tool));
        }
        assert_eq!(ToolName::parse("nope"), None);
    }
}
