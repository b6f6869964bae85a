//! Doctor command: health checks for the hosts file and the managed block.

use std::path::Path;

use crate::hosts::HostsDocument;
use crate::platform::HostsStorage;

/// Result of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub ok: bool,
    pub message: String,
}

impl CheckResult {
    fn pass(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Run all checks against `storage`. Never writes.
pub fn run_checks(storage: &dyn HostsStorage) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let path = storage.path();

    // 1. File readable
    let content = match storage.read() {
        Ok(c) => {
            results.push(CheckResult::pass(format!("{} is readable", path.display())));
            c
        }
        Err(e) => {
            results.push(CheckResult::fail(e.to_string()));
            return results;
        }
    };

    // 2. Block structure
    let document = match HostsDocument::parse(&content) {
        Ok(d) => d,
        Err(e) => {
            results.push(CheckResult::fail(format!(
                "{e}. Fix the marker lines by hand before editing."
            )));
            return results;
        }
    };
    if content.lines().any(|l| l == crate::hosts::BEGIN_MARKER) {
        results.push(CheckResult::pass(format!(
            "Managed block found with {} entr{}",
            document.records.len(),
            if document.records.len() == 1 { "y" } else { "ies" }
        )));
    } else {
        results.push(CheckResult::pass(
            "No managed block yet; it will be appended on first apply.",
        ));
    }

    // 3. Entries committable as they stand
    for (index, record) in document.records.iter().enumerate() {
        if let Some(field) = record.commit_problem() {
            results.push(CheckResult::fail(format!(
                "[{index}] {} has an invalid {field}",
                record.address
            )));
        } else if !crate::validate::validate_host_list(&record.hosts_line()) {
            results.push(CheckResult::fail(format!(
                "[{index}] {} has hostnames that cannot be re-entered: {}",
                record.address,
                record.hosts_line()
            )));
        }
    }

    // 4. Directory writable for the temp-file replace
    results.push(writable_check(path));

    results
}

fn writable_check(path: &Path) -> CheckResult {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match tempfile::tempfile_in(dir) {
        Ok(_) => CheckResult::pass(format!("{} is writable", dir.display())),
        Err(e) => CheckResult::fail(format!(
            "{} is not writable ({e}); apply will need elevated privileges",
            dir.display()
        )),
    }
}
