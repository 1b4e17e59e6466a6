#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};
use ui_inspector::backend::executor::{DumpSource, QueryExecutor};
use ui_inspector::error::InspectError;
use ui_inspector::trace::logger::TraceSink;
use ui_inspector::trace::trace::TraceEvent;

/// In-memory backend answering from a selector -> results table.
///
/// Unknown selectors answer with an empty list. Every call is recorded.
#[derive(Default)]
pub struct ScriptedExecutor {
    pub answers: HashMap<String, Vec<Value>>,
    pub failing: Vec<String>,
    pub calls: Vec<(String, Vec<String>)>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, selector: &str, results: Vec<Value>) -> Self {
        self.answers.insert(selector.to_string(), results);
        self
    }

    pub fn fail_on(mut self, selector: &str) -> Self {
        self.failing.push(selector.to_string());
        self
    }

    pub fn calls_to(&self, selector: &str) -> usize {
        self.calls.iter().filter(|(s, _)| s == selector).count()
    }
}

impl QueryExecutor for ScriptedExecutor {
    fn query(&mut self, selector: &str, args: &[&str]) -> Result<Vec<Value>, InspectError> {
        self.calls
            .push((selector.to_string(), args.iter().map(|a| a.to_string()).collect()));

        if self.failing.iter().any(|s| s == selector) {
            return Err(InspectError::SessionProtocol {
                command: format!("query {}", selector),
                error: "backend unavailable".into(),
            });
        }

        let key = if args.is_empty() {
            selector.to_string()
        } else {
            format!("{} {}", selector, args.join(" "))
        };
        Ok(self.answers.get(&key).cloned().unwrap_or_default())
    }
}

/// Dump source returning a fixed body, or failing with an HTTP status.
pub struct StaticDump(pub Result<String, u16>);

impl StaticDump {
    pub fn body(body: &str) -> Self {
        StaticDump(Ok(body.to_string()))
    }

    pub fn status(status: u16) -> Self {
        StaticDump(Err(status))
    }
}

impl DumpSource for StaticDump {
    fn fetch_dump(&self) -> Result<String, InspectError> {
        match &self.0 {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(InspectError::HttpStatus {
                url: "http://localhost:34777/dump".into(),
                status: *status,
            }),
        }
    }
}

/// Sink keeping every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: RefCell<Vec<TraceEvent>>,
}

impl RecordingSink {
    pub fn names(&self) -> Vec<String> {
        self.events.borrow().iter().map(|e| e.event.clone()).collect()
    }
}

impl TraceSink for RecordingSink {
    fn log(&self, event: &TraceEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Raw backend element with the given class and id and a rect derived from `n`.
pub fn raw(class: &str, id: &str, n: f64) -> Value {
    json!({
        "class": class,
        "id": id,
        "enabled": true,
        "rect": {
            "x": n, "y": n, "width": 10.0, "height": 10.0,
            "center_x": n + 5.0, "center_y": n + 5.0
        }
    })
}
