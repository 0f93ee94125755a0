use std::collections::VecDeque;

use anyhow::{Result, anyhow};
use inquire::{Confirm, Select, Text};

/// Seam between the booking flow and the terminal.
pub trait PromptDriver {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool>;
    fn input(&mut self, message: &str) -> Result<String>;
    fn select(&mut self, message: &str, options: &[String]) -> Result<usize>;
}

#[derive(Debug, Default)]
pub struct InquirePromptDriver;

impl InquirePromptDriver {
    pub fn new() -> Self {
        Self
    }
}

impl PromptDriver for InquirePromptDriver {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }

    fn input(&mut self, message: &str) -> Result<String> {
        Ok(Text::new(message).prompt()?)
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        let selected = Select::new(message, options.to_vec()).prompt()?;

        options
            .iter()
            .position(|option| option == &selected)
            .ok_or_else(|| anyhow!("selected option was not found in options list"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedPromptResponse {
    Confirm(bool),
    Input(String),
    Select(usize),
}

/// Replays canned answers; used to drive the booking flow in tests.
#[derive(Debug, Default)]
pub struct ScriptedPromptDriver {
    responses: VecDeque<ScriptedPromptResponse>,
    messages: Vec<String>,
}

impl ScriptedPromptDriver {
    pub fn new(responses: Vec<ScriptedPromptResponse>) -> Self {
        Self {
            responses: responses.into(),
            messages: Vec::new(),
        }
    }

    /// Prompt messages seen so far, in order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    fn next_response(&mut self, message: &str) -> Result<ScriptedPromptResponse> {
        self.messages.push(message.to_string());
        self.responses
            .pop_front()
            .ok_or_else(|| anyhow!("prompt response queue is empty at '{message}'"))
    }
}

impl PromptDriver for ScriptedPromptDriver {
    fn confirm(&mut self, message: &str, _default: bool) -> Result<bool> {
        match self.next_response(message)? {
            ScriptedPromptResponse::Confirm(value) => Ok(value),
            unexpected => Err(anyhow!(
                "expected confirm response for '{message}', got {unexpected:?}"
            )),
        }
    }

    fn input(&mut self, message: &str) -> Result<String> {
        match self.next_response(message)? {
            ScriptedPromptResponse::Input(value) => Ok(value),
            unexpected => Err(anyhow!(
                "expected input response for '{message}', got {unexpected:?}"
            )),
        }
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<usize> {
        match self.next_response(message)? {
            ScriptedPromptResponse::Select(value) if value < options.len() => Ok(value),
            ScriptedPromptResponse::Select(value) => Err(anyhow!(
                "scripted selection {value} is out of range for '{message}' ({} options)",
                options.len()
            )),
            unexpected => Err(anyhow!(
                "expected select response for '{message}', got {unexpected:?}"
            )),
        }
    }
}
