use std::fmt;

#[derive(Debug)]
pub enum InspectError {
    /// Backend bridge process failed to spawn
    SubprocessSpawn { command: String, source: std::io::Error },

    /// Reading from or writing to the bridge process failed
    SessionIO(String),

    /// Bridge answered ok=false or broke the line protocol
    SessionProtocol { command: String, error: String },

    /// JSON parsing failed (bridge output, hierarchy dump)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (bridge request, report output)
    JsonSerialize { context: String, source: serde_json::Error },

    /// Dump endpoint could not be reached
    Http { url: String, source: reqwest::Error },

    /// Dump endpoint answered with a non-success status
    HttpStatus { url: String, status: u16 },

    /// A query result item was not an element record
    MalformedElement { query: String, payload: String },

    /// Action or accessor used on an empty element collection
    EmptyCollection(String),

    /// A required collaborator was not configured
    MissingState(String),
}

impl fmt::Display for InspectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectError::SubprocessSpawn { command, source } => {
                write!(f, "Failed to spawn backend bridge '{}': {}", command, source)
            }
            InspectError::SessionIO(msg) => {
                write!(f, "Bridge session I/O error: {}", msg)
            }
            InspectError::SessionProtocol { command, error } => {
                write!(f, "Bridge command '{}' failed: {}", command, error)
            }
            InspectError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            InspectError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            InspectError::Http { url, source } => {
                write!(f, "Could not fetch {}: {}", url, source)
            }
            InspectError::HttpStatus { url, status } => {
                write!(f, "{} answered with HTTP {}", url, status)
            }
            InspectError::MalformedElement { query, payload } => {
                write!(f, "Unsupported result format for query '{}': {}", query, payload)
            }
            InspectError::EmptyCollection(msg) => {
                write!(f, "{}", msg)
            }
            InspectError::MissingState(msg) => {
                write!(f, "Missing state: {}", msg)
            }
        }
    }
}

impl std::error::Error for InspectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InspectError::SubprocessSpawn { source, .. } => Some(source),
            InspectError::JsonParse { source, .. } => Some(source),
            InspectError::JsonSerialize { source, .. } => Some(source),
            InspectError::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
