//! Immutable registry of tools, prompts and resources.

use std::collections::HashMap;

use serde_json::{Map, Value};

use sensei_types::{PromptDescriptor, ResourceDescriptor, ToolDescriptor};

use crate::error::CatalogError;
use crate::loader::{parse_catalog, BUILTIN_CATALOG};
use crate::template::{render, RenderError};

/// Name-indexed, order-preserving registry.
///
/// Listing returns entries in declaration order; lookup is by exact key.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolDescriptor>,
    prompts: Vec<PromptDescriptor>,
    resources: Vec<ResourceDescriptor>,
    tool_index: HashMap<String, usize>,
    prompt_index: HashMap<String, usize>,
    resource_index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from already-validated descriptors.
    pub(crate) fn new(
        tools: Vec<ToolDescriptor>,
        prompts: Vec<PromptDescriptor>,
        resources: Vec<ResourceDescriptor>,
    ) -> Self {
        let tool_index = index(&tools, |t| &t.name);
        let prompt_index = index(&prompts, |p| &p.name);
        let resource_index = index(&resources, |r| &r.uri);
        Self {
            tools,
            prompts,
            resources,
            tool_index,
            prompt_index,
            resource_index,
        }
    }

    /// Parses the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded TOML is broken, which the crate's tests
    /// rule out.
    pub fn builtin() -> Result<Self, CatalogError> {
        parse_catalog(BUILTIN_CATALOG)
    }

    /// Parses a catalog from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        parse_catalog(content)
    }

    /// All tools, in declaration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// All prompts, in declaration order.
    pub fn prompts(&self) -> &[PromptDescriptor] {
        &self.prompts
    }

    /// All resources, in declaration order.
    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    /// Looks up a tool by exact name.
    pub fn find_tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tool_index.get(name).map(|&i| &self.tools[i])
    }

    /// Looks up a prompt by exact name.
    pub fn find_prompt(&self, name: &str) -> Option<&PromptDescriptor> {
        self.prompt_index.get(name).map(|&i| &self.prompts[i])
    }

    /// Looks up a resource by exact URI.
    pub fn find_resource(&self, uri: &str) -> Option<&ResourceDescriptor> {
        self.resource_index.get(uri).map(|&i| &self.resources[i])
    }
}

/// Renders a tool's instruction with the caller's arguments.
pub fn render_instruction(
    tool: &ToolDescriptor,
    arguments: &Map<String, Value>,
) -> Result<String, RenderError> {
    render(&tool.instruction, &tool.arguments, arguments)
}

/// Renders a prompt's template with the caller's arguments.
pub fn render_prompt(
    prompt: &PromptDescriptor,
    arguments: &Map<String, Value>,
) -> Result<String, RenderError> {
    render(&prompt.template, &prompt.arguments, arguments)
}

fn index<T>(items: &[T], key: impl Fn(&T) -> &String) -> HashMap<String, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (key(item).clone(), i))
        .collect()
}
