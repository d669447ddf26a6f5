// Core data models and traits for sqlprobe

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::error::ScanError;

/// Supported HTTP methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::POST => write!(f, "POST"),
        }
    }
}

/// A single request descriptor to probe.
///
/// Form bodies keep their field order so the first field is the one that
/// gets mutated. JSON bodies keep key order through serde_json's
/// `preserve_order` feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<(String, String)>>,
    pub json: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl Target {
    /// Plain GET target
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            body: None,
            json: None,
            headers: HashMap::new(),
        }
    }

    /// Form-encoded POST target
    pub fn form(url: impl Into<String>, body: Vec<(String, String)>) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: Some(body),
            json: None,
            headers: HashMap::new(),
        }
    }

    /// JSON POST target
    pub fn json(url: impl Into<String>, json: Value) -> Self {
        Self {
            method: Method::POST,
            url: url.into(),
            body: None,
            json: Some(json),
            headers: HashMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn is_json(&self) -> bool {
        self.json.is_some()
    }
}

/// Injection technique named by a payload catalog key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionType {
    Boolean,
    Error,
    Time,
    /// Labels nobody checks for. Still iterated, never triggers.
    Other(String),
}

impl InjectionType {
    pub fn from_label(label: &str) -> Self {
        match label {
            "boolean" => InjectionType::Boolean,
            "error" => InjectionType::Error,
            "time" => InjectionType::Time,
            other => InjectionType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InjectionType::Boolean => "boolean",
            InjectionType::Error => "error",
            InjectionType::Time => "time",
            InjectionType::Other(label) => label,
        }
    }
}

impl fmt::Display for InjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Database engine guessed from a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Dbms {
    #[serde(rename = "mysql")]
    MySql,
    #[serde(rename = "postgresql")]
    PostgreSql,
    #[serde(rename = "oracle")]
    Oracle,
    #[serde(rename = "mssql")]
    MsSql,
    /// No error text, but the response was slow
    #[serde(rename = "unknown-time")]
    UnknownTime,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Dbms {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dbms::MySql => "mysql",
            Dbms::PostgreSql => "postgresql",
            Dbms::Oracle => "oracle",
            Dbms::MsSql => "mssql",
            Dbms::UnknownTime => "unknown-time",
            Dbms::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Dbms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Injection-type label to ordered payload strings, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayloadCatalog {
    entries: Vec<(String, Vec<String>)>,
}

impl PayloadCatalog {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(label, payloads)| (label.as_str(), payloads.as_slice()))
    }

    /// Number of injection types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_payloads(&self) -> usize {
        self.entries.iter().map(|(_, payloads)| payloads.len()).sum()
    }
}

/// A positive detection for one target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub url: String,
    pub dbms: Dbms,
    #[serde(rename = "type")]
    pub injection_type: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Trait for loading target lists from a file
pub trait TargetParser {
    /// Parse a target file and return the request descriptors in file order
    fn parse(&self, file_path: &str) -> Result<Vec<Target>, ScanError>;
}
