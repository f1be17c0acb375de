//! Structural validation of a configuration document.
//!
//! The checks mirror the document shape only: required members and their
//! JSON types. Cross-field rules such as unique method names are not checked,
//! duplicates are legal and resolve to the first declaration.

use std::fmt;

use serde_json::{Map, Value};

const ROOT: &str = "(root)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// `(root)` or a dotted path such as `handlers.0.result.1.is_error`.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    #[inline]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Returns every violation in document order (empty if the document is valid).
pub fn validate(document: &Value) -> Vec<SchemaViolation> {
    let mut validator = Validator::default();
    validator.root(document);
    validator.violations
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn child_path(parent: &str, member: impl fmt::Display) -> String {
    if parent == ROOT {
        member.to_string()
    } else {
        format!("{parent}.{member}")
    }
}

#[derive(Default)]
struct Validator {
    violations: Vec<SchemaViolation>,
}

impl Validator {
    fn report(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(SchemaViolation::new(path, message));
    }

    fn invalid_type(&mut self, path: &str, expected: &str, given: &Value) {
        self.report(
            path,
            format!("Invalid type. Expected: {}, given: {}", expected, type_name(given)),
        );
    }

    fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.invalid_type(path, "object", other);
                None
            }
        }
    }

    fn array<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Vec<Value>> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.invalid_type(path, "array", other);
                None
            }
        }
    }

    fn required<'a>(
        &mut self,
        path: &str,
        map: &'a Map<String, Value>,
        member: &str,
    ) -> Option<&'a Value> {
        let value = map.get(member);
        if value.is_none() {
            self.report(path, format!("{member} is required"));
        }
        value
    }

    fn string(&mut self, path: &str, value: &Value) {
        if !value.is_string() {
            self.invalid_type(path, "string", value);
        }
    }

    fn boolean(&mut self, path: &str, value: &Value) {
        if !value.is_boolean() {
            self.invalid_type(path, "boolean", value);
        }
    }

    fn port(&mut self, path: &str, value: &Value) {
        match value {
            Value::Number(n) if n.is_u64() => {
                if n.as_u64().is_some_and(|port| port > u64::from(u16::MAX)) {
                    self.report(path, format!("Must be less than or equal to {}", u16::MAX));
                }
            }
            Value::Number(n) if n.is_i64() => {
                self.report(path, "Must be greater than or equal to 0");
            }
            other => self.invalid_type(path, "integer", other),
        }
    }

    fn root(&mut self, document: &Value) {
        let Some(map) = self.object(ROOT, document) else {
            return;
        };

        if let Some(port) = self.required(ROOT, map, "server_port") {
            self.port("server_port", port);
        }
        if let Some(prefix) = self.required(ROOT, map, "url_prefix") {
            self.string("url_prefix", prefix);
        }
        // Optional, defaults to the fixed header name.
        if let Some(header) = map.get("discriminator_header") {
            self.string("discriminator_header", header);
        }
        if let Some(handlers) = self.required(ROOT, map, "handlers") {
            if let Some(items) = self.array("handlers", handlers) {
                for (index, item) in items.iter().enumerate() {
                    self.handler(&child_path("handlers", index), item);
                }
            }
        }
    }

    fn handler(&mut self, path: &str, value: &Value) {
        let Some(map) = self.object(path, value) else {
            return;
        };

        if let Some(method) = self.required(path, map, "method") {
            self.string(&child_path(path, "method"), method);
        }
        if let Some(result) = self.required(path, map, "result") {
            let result_path = child_path(path, "result");
            if let Some(items) = self.array(&result_path, result) {
                for (index, item) in items.iter().enumerate() {
                    self.result_entry(&child_path(&result_path, index), item);
                }
            }
        }
    }

    fn result_entry(&mut self, path: &str, value: &Value) {
        let Some(map) = self.object(path, value) else {
            return;
        };

        if let Some(discriminator) = self.required(path, map, "discriminator") {
            self.string(&child_path(path, "discriminator"), discriminator);
        }
        if let Some(is_error) = self.required(path, map, "is_error") {
            self.boolean(&child_path(path, "is_error"), is_error);
        }
        // Any type, null included, as long as the member is present.
        self.required(path, map, "data");
    }
}
