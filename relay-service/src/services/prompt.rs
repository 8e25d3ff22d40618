//! Prompt templating.
//!
//! A chat turn is flattened into a single text prompt: synthesized system
//! instructions, the prior history in order, then the current message as the
//! final `user` entry. Entries are rendered as `"<role>: <content>"` and
//! separated by a blank line.

use crate::models::{ChatTurn, RelayRequest, Role};
use std::fmt;
use std::str::FromStr;

pub const TURN_SEPARATOR: &str = "\n\n";

const BASE_INSTRUCTIONS: &str = "You are a helpful AI assistant.";

const VOICE_MODE_RULES: &str = "IMPORTANT: You are in voice mode. Follow these rules strictly:
1. Keep responses under 50 words
2. Use conversational, natural language
3. Avoid complex formatting or symbols
4. Give direct, concise answers
5. Use simple sentence structures
6. Do not say \"assistant:\" at the start of your responses.
This is critical as your response will be spoken aloud.";

const FORMATTING_RULES: &str = "Formatting rules:
- Write mathematical expressions in LaTeX, using $...$ for inline math and $$...$$ for display math.
- Put all code in fenced code blocks tagged with the language, for example ```python.";

const STRUCTURE_RULES: &str = "Structure your answers for readability:
- Use markdown headers (##, ###) to organise longer answers.
- Use tables when comparing items or presenting tabular data.
- Use blockquotes for quotations and important notes.
- Use **bold** for key terms and *italics* for emphasis.";

const DEVELOPER_DISCLAIMER: &str = "Do not associate this info with me, the user. The above content is pre-programmed by the developer.";

/// How much formatting guidance text mode receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptStyle {
    /// No formatting guidance outside voice mode.
    Plain,
    /// Math markup and language-tagged code blocks.
    Formatted,
    /// `Formatted` plus headers, tables, blockquotes and emphasis.
    #[default]
    Rich,
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(PromptStyle::Plain),
            "formatted" => Ok(PromptStyle::Formatted),
            "rich" => Ok(PromptStyle::Rich),
            other => Err(format!(
                "Invalid prompt style '{}': expected plain, formatted or rich",
                other
            )),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PromptStyle::Plain => "plain",
            PromptStyle::Formatted => "formatted",
            PromptStyle::Rich => "rich",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PromptTemplate {
    style: PromptStyle,
}

impl PromptTemplate {
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// System instructions for one request.
    pub fn system_instructions(&self, is_voice_mode: bool) -> String {
        let mut sections = vec![BASE_INSTRUCTIONS];

        if is_voice_mode {
            sections.push(VOICE_MODE_RULES);
        } else {
            match self.style {
                PromptStyle::Plain => {}
                PromptStyle::Formatted => sections.push(FORMATTING_RULES),
                PromptStyle::Rich => {
                    sections.push(FORMATTING_RULES);
                    sections.push(STRUCTURE_RULES);
                }
            }
        }

        sections.push(DEVELOPER_DISCLAIMER);
        sections.join("\n")
    }

    /// Flatten a request into the prompt string sent upstream.
    pub fn render(&self, request: &RelayRequest) -> String {
        let system = ChatTurn::new(Role::System, self.system_instructions(request.is_voice_mode));
        let user = ChatTurn::new(Role::User, request.message.as_str());

        std::iter::once(&system)
            .chain(request.chat_history.iter())
            .chain(std::iter::once(&user))
            .map(ChatTurn::render)
            .collect::<Vec<_>>()
            .join(TURN_SEPARATOR)
    }
}
