//! Performance data trailer formatting.
//!
//! Entries follow the monitoring-plugins convention `label=value`, separated
//! by single spaces, after a leading `|`.

use crate::types::TranslatedStatus;
use std::fmt;

/// Delimiter between plugin output and performance data
pub const TRAILER_DELIMITER: char = '|';

/// Value of a single perfdata entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerfdataValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for PerfdataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfdataValue::Int(v) => write!(f, "{}", v),
            PerfdataValue::Text(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '"' => f.write_str("\\\"")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
        }
    }
}

impl From<i64> for PerfdataValue {
    fn from(v: i64) -> Self {
        PerfdataValue::Int(v)
    }
}

impl From<i32> for PerfdataValue {
    fn from(v: i32) -> Self {
        PerfdataValue::Int(v.into())
    }
}

impl From<u16> for PerfdataValue {
    fn from(v: u16) -> Self {
        PerfdataValue::Int(v.into())
    }
}

impl From<String> for PerfdataValue {
    fn from(v: String) -> Self {
        PerfdataValue::Text(v)
    }
}

impl From<&str> for PerfdataValue {
    fn from(v: &str) -> Self {
        PerfdataValue::Text(v.to_string())
    }
}

/// One labeled value of the trailer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Perfdata {
    pub label: String,
    pub value: PerfdataValue,
}

impl Perfdata {
    pub fn new(label: impl Into<String>, value: impl Into<PerfdataValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Perfdata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.contains([' ', '=', '\'']) {
            write!(f, "'{}'", self.label.replace('\'', "''"))?;
        } else {
            f.write_str(&self.label)?;
        }
        write!(f, "={}", self.value)
    }
}

/// Ordered perfdata entries; order of insertion is kept on output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerfdataList(Vec<Perfdata>);

impl PerfdataList {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed `status`, `output`, `statuscode` entries of a probe check
    pub fn for_status(status: &TranslatedStatus, status_code: u16) -> Self {
        let mut list = Self::new();
        list.push(Perfdata::new("status", status.exit_code()));
        list.push(Perfdata::new("output", status.output.as_str()));
        list.push(Perfdata::new("statuscode", status_code));
        list
    }

    pub fn push(&mut self, entry: Perfdata) {
        self.0.push(entry);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Perfdata> {
        self.0.iter()
    }

    /// Render the trailer, e.g. `|status=0 output="OK - up" statuscode=200`
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PerfdataList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TRAILER_DELIMITER)?;
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl FromIterator<Perfdata> for PerfdataList {
    fn from_iter<I: IntoIterator<Item = Perfdata>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
