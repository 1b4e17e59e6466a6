use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::executor::QueryExecutor;
use crate::error::InspectError;
use crate::trace::logger::TraceSink;
use crate::trace::trace::{BuildMode, TraceEvent};

/// Request sent to the backend bridge over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BridgeRequest {
    Query {
        cmd: &'static str,
        selector: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
    Quit {
        cmd: &'static str,
    },
}

impl BridgeRequest {
    pub fn query(selector: &str, args: &[&str]) -> Self {
        BridgeRequest::Query {
            cmd: "query",
            selector: selector.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn quit() -> Self {
        BridgeRequest::Quit { cmd: "quit" }
    }
}

/// Response received from the backend bridge over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub ready: Option<bool>,
}

/// A persistent session with the process that executes selector queries.
///
/// The bridge is launched once and kept alive; commands go out as NDJSON on
/// stdin and each one is answered by a single line on stdout.
pub struct BridgeSession<'a> {
    child: Child,
    stdin: Option<ChildStdin>,
    reader: BufReader<ChildStdout>,
    command: String,
    sink: &'a dyn TraceSink,
}

impl<'a> BridgeSession<'a> {
    /// Spawn `command args...` and wait for its ready signal.
    pub fn launch(
        command: &str,
        args: &[String],
        sink: &'a dyn TraceSink,
    ) -> Result<Self, InspectError> {
        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| InspectError::SubprocessSpawn {
                command: command.into(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            InspectError::SessionIO(format!("Failed to capture stdin of {}", command))
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            InspectError::SessionIO(format!("Failed to capture stdout of {}", command))
        })?;

        let mut session = BridgeSession {
            child,
            stdin: Some(stdin),
            reader: BufReader::new(stdout),
            command: command.to_string(),
            sink,
        };

        let response = session.read_response("ready signal")?;
        if !response.ok || response.ready != Some(true) {
            session
                .sink
                .log(&TraceEvent::now(BuildMode::Session, "ready_missing").with_detail(command));
            return Err(InspectError::SessionProtocol {
                command: "launch".into(),
                error: format!("Did not receive ready signal from {}", session.command),
            });
        }

        session
            .sink
            .log(&TraceEvent::now(BuildMode::Session, "session_ready").with_detail(command));
        Ok(session)
    }

    fn read_response(&mut self, context: &str) -> Result<BridgeResponse, InspectError> {
        let mut line = String::new();
        self.reader.read_line(&mut line).map_err(|e| {
            InspectError::SessionIO(format!("Failed to read {} from {}: {}", context, self.command, e))
        })?;

        if line.trim().is_empty() {
            return Err(InspectError::SessionIO(format!(
                "Empty response from {} (process may have died)",
                self.command
            )));
        }

        serde_json::from_str(line.trim()).map_err(|e| InspectError::JsonParse {
            context: format!("bridge {}", context),
            source: e,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BridgeRequest) -> Result<BridgeResponse, InspectError> {
        let json = serde_json::to_string(request).map_err(|e| InspectError::JsonSerialize {
            context: "BridgeRequest".into(),
            source: e,
        })?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| InspectError::SessionIO("Bridge session already closed".into()))?;

        writeln!(stdin, "{}", json).map_err(|e| {
            InspectError::SessionIO(format!("Failed to write to bridge stdin: {}", e))
        })?;

        stdin.flush().map_err(|e| {
            InspectError::SessionIO(format!("Failed to flush bridge stdin: {}", e))
        })?;

        self.read_response("response")
    }

    /// Quit the bridge. Safe to call more than once.
    pub fn quit(&mut self) -> Result<(), InspectError> {
        if self.stdin.is_none() {
            return Ok(());
        }
        // Best-effort: the process may already be gone
        let _ = self.send(&BridgeRequest::quit());
        self.stdin = None;
        let _ = self.child.wait();
        self.sink
            .log(&TraceEvent::now(BuildMode::Session, "session_closed").with_detail(&self.command));
        Ok(())
    }
}

impl QueryExecutor for BridgeSession<'_> {
    fn query(&mut self, selector: &str, args: &[&str]) -> Result<Vec<Value>, InspectError> {
        let response = self.send(&BridgeRequest::query(selector, args))?;
        if !response.ok {
            let error = response.error.unwrap_or_else(|| "Unknown error".into());
            self.sink.log(
                &TraceEvent::now(BuildMode::Session, "query_failed")
                    .with_selector(selector)
                    .with_detail(&error),
            );
            return Err(InspectError::SessionProtocol {
                command: format!("query {}", selector),
                error,
            });
        }

        match response.data {
            Some(Value::Array(items)) => Ok(items),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(InspectError::MalformedElement {
                query: selector.to_string(),
                payload: other.to_string(),
            }),
        }
    }
}

impl Drop for BridgeSession<'_> {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}
