//! Address and hostname validation.
//!
//! All checks are pure and ASCII-only. The IPv6 check is intentionally loose:
//! any string containing a colon and made only of hex digits and colons is
//! accepted, so malformed literals such as `1:::2` pass. Hosts files written
//! by hand commonly contain such near-misses and resolvers reject them anyway.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum total hostname length (RFC 1035).
pub const MAX_HOSTNAME_LEN: usize = 253;

static IPV4_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$").expect("static regex")
});

// alphanumeric and hyphens, 1-63 chars, no leading/trailing hyphen
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("static regex")
});

/// Empty input means "not yet specified" and is accepted here; commit-time
/// validation rejects it for enabled rows.
pub fn validate_address(s: &str) -> bool {
    if s.is_empty() {
        return true;
    }
    if let Some(caps) = IPV4_REGEX.captures(s) {
        return caps
            .iter()
            .skip(1)
            .flatten()
            .all(|octet| octet.as_str().parse::<u16>().is_ok_and(|n| n <= 255));
    }
    s.contains(':') && s.chars().all(|c| c == ':' || c.is_ascii_hexdigit())
}

pub fn validate_hostname(hostname: &str) -> bool {
    if hostname.is_empty() || hostname.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    hostname.split('.').all(|label| LABEL_REGEX.is_match(label))
}

/// Whitespace-separated list of hostnames. Blank input is accepted.
pub fn validate_host_list(s: &str) -> bool {
    s.split_whitespace().all(validate_hostname)
}
