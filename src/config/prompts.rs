//! Prompt templates for Blogcast.
//!
//! Prompts can be customized by placing an `agent.toml` file in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
}

/// Prompts that drive the blog-to-podcast agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    /// One-line description of the agent's role.
    pub description: String,
    /// Ordered instructions, rendered as a list in the system prompt.
    pub instructions: Vec<String>,
    /// Task handed to the agent. `{{url}}` is replaced with the source URL.
    pub task: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            description: "You are an AI agent that can generate audio from blog articles.".to_string(),
            instructions: vec![
                "When the user provides a blog post URL:".to_string(),
                "1. Use the scrape_website tool to scrape the blog content.".to_string(),
                "2. Create a concise summary of the blog content no longer than {{max_chars}} characters.".to_string(),
                "3. The summary should capture the key ideas and be engaging.".to_string(),
                "4. Use the text_to_speech tool to convert the summary to audio.".to_string(),
                "5. Make sure the summary fits within the text-to-speech API limit.".to_string(),
                "When the audio has been generated, reply with the exact summary you converted.".to_string(),
            ],
            task: "Convert the blog to a podcast: {{url}}".to_string(),
        }
    }
}

impl AgentPrompts {
    /// Build the system prompt from the description and instructions.
    pub fn system_prompt(&self, max_chars: usize) -> String {
        let mut vars = HashMap::new();
        vars.insert("max_chars".to_string(), max_chars.to_string());

        let instructions = self
            .instructions
            .iter()
            .map(|line| Prompts::render(line, &vars))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{}\n\n## Instructions\n{}", self.description, instructions)
    }

    /// Render the task for a given source URL.
    pub fn task_for(&self, url: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("url".to_string(), url.to_string());
        Prompts::render(&self.task, &vars)
    }
}

impl Prompts {
    /// Load prompts, overriding defaults from a custom directory when given.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
