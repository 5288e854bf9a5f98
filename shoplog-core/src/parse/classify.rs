use crate::parse::error::ParseError;
use crate::parse::types::{ClientId, LogLine};
use regex::Regex;

pub const DEFAULT_LEVEL_MARKER: &str = "INFO";

/// Extracts the client identifier from `... <LEVEL>: <client_id> <rest>`.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    pattern: Regex,
}

impl LineClassifier {
    pub fn new(level_marker: &str) -> Self {
        // The marker is escaped, so the assembled pattern always compiles.
        let pattern = format!(r"{}: (?P<client>\S+)\s+\S", regex::escape(level_marker));
        Self {
            pattern: Regex::new(&pattern).expect("escaped level marker forms a valid regex"),
        }
    }

    pub fn client_id<'a>(&self, raw: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(raw)
            .and_then(|caps| caps.name("client"))
            .map(|m| m.as_str())
    }

    /// Classifies one raw line; a line without a client id fails the whole run.
    pub fn classify(&self, line_no: usize, raw: &str) -> Result<LogLine, ParseError> {
        let Some(client) = self.client_id(raw) else {
            return Err(ParseError::malformed(line_no, raw));
        };

        Ok(LogLine {
            line_no,
            client_id: ClientId(client.to_string()),
            raw: raw.to_string(),
        })
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL_MARKER)
    }
}
