//! Hosts file format: the managed block and the content around it.
//!
//! Only the lines between [`BEGIN_MARKER`] and [`END_MARKER`] are edited.
//! Everything else is kept verbatim, line endings included.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::error::{Error, Result};
use crate::record::Record;

pub const BEGIN_MARKER: &str = "# === BEGIN MANAGED BY LHM ===";
pub const END_MARKER: &str = "# === END MANAGED BY LHM ===";

// Shape check used when reading entries back: dotted quad or hex/colon run.
static ADDRESS_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}(\.[0-9]{1,3}){3}|[0-9A-Fa-f:]+)$").expect("static regex")
});

/// Parsed hosts file: managed records plus the raw lines around the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsDocument {
    /// Lines before the block, each with its original line ending. When the
    /// file has no block this is the whole file.
    pub pre_lines: Vec<String>,
    pub post_lines: Vec<String>,
    pub records: Vec<Record>,
}

impl HostsDocument {
    pub fn parse(content: &str) -> Result<Self> {
        let lines: Vec<&str> = content.split_inclusive('\n').collect();

        let mut begin = None;
        let mut end = None;
        for (i, line) in lines.iter().enumerate() {
            let bare = line.trim_end_matches(['\n', '\r']);
            if bare == BEGIN_MARKER {
                if begin.is_some() {
                    return Err(malformed(i, "second begin marker"));
                }
                begin = Some(i);
            } else if bare == END_MARKER {
                if begin.is_none() {
                    return Err(malformed(i, "end marker before begin marker"));
                }
                if end.is_some() {
                    return Err(malformed(i, "second end marker"));
                }
                end = Some(i);
            }
        }

        let (begin, end) = match (begin, end) {
            (None, _) => {
                return Ok(Self {
                    pre_lines: lines.iter().map(|l| l.to_string()).collect(),
                    ..Self::default()
                })
            }
            (Some(b), None) => return Err(malformed(b, "begin marker without end marker")),
            (Some(b), Some(e)) => (b, e),
        };

        let mut records = Vec::new();
        for (offset, line) in lines[begin + 1..end].iter().enumerate() {
            match parse_entry(line) {
                Some(record) => records.push(record),
                None if !line.trim().is_empty() => {
                    warn!(line = begin + offset + 2, "dropping unrecognised line in managed block");
                }
                None => {}
            }
        }

        Ok(Self {
            pre_lines: lines[..begin].iter().map(|l| l.to_string()).collect(),
            post_lines: lines[end + 1..].iter().map(|l| l.to_string()).collect(),
            records,
        })
    }

    /// Full file content: surrounding lines with the block rendered in place.
    pub fn render(&self) -> String {
        render_with(&self.pre_lines, &self.post_lines, &self.records)
    }
}

/// Like [`HostsDocument::render`] but with `records` substituted for the
/// document's own.
pub fn render_with(pre_lines: &[String], post_lines: &[String], records: &[Record]) -> String {
    let mut out = String::new();
    for line in pre_lines {
        out.push_str(line);
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    if pre_lines.last().is_some_and(|l| !l.trim().is_empty()) {
        out.push('\n');
    }

    out.push_str(BEGIN_MARKER);
    out.push('\n');
    for record in records.iter().filter(|r| !r.is_blank()) {
        out.push_str(&render_entry(record));
        out.push('\n');
    }
    out.push_str(END_MARKER);
    out.push('\n');

    for line in post_lines {
        out.push_str(line);
    }
    out
}

/// Stands in for a missing address on a disabled line.
pub const NO_ADDRESS: &str = "-";

/// `address<TAB>host host…`, prefixed with `#` when disabled.
///
/// Disabled records may be incomplete: a missing address is written as
/// [`NO_ADDRESS`] and missing hostnames leave just the address, so
/// [`parse_entry`] reads the same record back.
pub fn render_entry(record: &Record) -> String {
    let address = if record.address.is_empty() && !record.enabled {
        NO_ADDRESS
    } else {
        record.address.as_str()
    };
    let line = format!("{address}\t{}", record.hosts_line());
    let line = line.trim_end();
    if record.enabled {
        line.to_string()
    } else {
        format!("#{line}")
    }
}

/// Accepts `1.2.3.4 a b`, `#1.2.3.4 a b` and `# 1.2.3.4 a b`; inline
/// comments are dropped. Disabled lines may also be `#1.2.3.4` or
/// `#- a b`. Anything else is not an entry.
pub fn parse_entry(raw: &str) -> Option<Record> {
    let mut s = raw.trim();
    let mut enabled = true;
    if let Some(rest) = s.strip_prefix('#') {
        enabled = false;
        s = rest.trim_start();
    }
    if let Some(i) = s.find('#') {
        s = &s[..i];
    }

    let mut parts = s.split_whitespace();
    let address = match parts.next()? {
        NO_ADDRESS if !enabled => "",
        a if ADDRESS_SHAPE.is_match(a) => a,
        _ => return None,
    };
    let hostnames: Vec<String> = parts.map(String::from).collect();
    if hostnames.is_empty() && (enabled || address.is_empty()) {
        return None;
    }
    Some(Record::new(enabled, address, hostnames))
}

fn malformed(index: usize, what: &str) -> Error {
    Error::LoadFailed(format!("line {}: {what}", index + 1))
}
