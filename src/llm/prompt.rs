//! Prompt templates with `{name}` placeholders.
//!
//! `{{` and `}}` render as literal braces. Chat templates render their
//! messages as `Role: text` lines, the form a completion endpoint expects.

use std::fmt;

use thiserror::Error;

/// Errors raised while parsing or formatting a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),
    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),
    #[error("missing value for prompt variable '{0}'")]
    MissingVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A single string template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    pub fn from_template(template: &str) -> Result<Self, PromptError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((idx, ch)) = chars.next() {
            match ch {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    text.push('{');
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    text.push('}');
                }
                '}' => return Err(PromptError::UnmatchedClose(idx)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(PromptError::Unterminated(idx));
                    }
                    let name = name.trim().to_string();
                    if name.is_empty() {
                        return Err(PromptError::EmptyPlaceholder(idx));
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Var(name));
                }
                other => text.push(other),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { segments })
    }

    pub fn format(&self, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = vars
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| PromptError::MissingVariable(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    Human,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::System => "System",
            Role::Human => "Human",
        };
        f.write_str(label)
    }
}

/// Ordered role-tagged templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<(Role, PromptTemplate)>,
}

impl ChatPromptTemplate {
    pub fn from_messages<'a, I>(messages: I) -> Result<Self, PromptError>
    where
        I: IntoIterator<Item = (Role, &'a str)>,
    {
        let messages = messages
            .into_iter()
            .map(|(role, text)| PromptTemplate::from_template(text).map(|t| (role, t)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { messages })
    }

    pub fn format(&self, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        let lines = self
            .messages
            .iter()
            .map(|(role, template)| template.format(vars).map(|text| format!("{role}: {text}")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}

/// Anything that turns variables into a finished prompt string.
pub trait FormatPrompt: Send + Sync {
    fn format_prompt(&self, vars: &[(&str, &str)]) -> Result<String, PromptError>;
}

impl FormatPrompt for ChatPromptTemplate {
    fn format_prompt(&self, vars: &[(&str, &str)]) -> Result<String, PromptError> {
        self.format(vars)
    }
}
