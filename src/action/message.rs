use super::{Action, required_text};
use crate::error::Result;

/// Writes a line to the batch's log sink. Touches nothing on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    message: String,
}

impl LogMessage {
    pub fn new(message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            message: required_text("LogMessage", "message", message)?,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Action for LogMessage {
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        format!("~ echo {}", self.message)
    }

    fn commit(&self, log: &mut dyn FnMut(&str)) -> Result<()> {
        log(&self.message);
        Ok(())
    }
}
