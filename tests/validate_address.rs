//! Address validation: dotted quads, loose IPv6, empty input.

use lhm::validate::validate_address;

#[test]
fn ipv4_in_range_passes() {
    assert!(validate_address("192.168.1.1"));
    assert!(validate_address("0.0.0.0"));
    assert!(validate_address("255.255.255.255"));
    assert!(validate_address("10.0.0.1"));
}

#[test]
fn ipv4_octet_over_255_fails() {
    assert!(!validate_address("192.168.1.256"));
    assert!(!validate_address("300.1.1.1"));
}

#[test]
fn ipv4_wrong_shape_fails() {
    assert!(!validate_address("192.168.1"));
    assert!(!validate_address("1.2.3.4.5"));
    assert!(!validate_address("1.2.3.0001"));
    assert!(!validate_address("not-an-ip"));
    assert!(!validate_address(" 10.0.0.1"));
}

#[test]
fn empty_means_unspecified() {
    assert!(validate_address(""));
}

#[test]
fn ipv6_hex_and_colons_pass() {
    assert!(validate_address("::1"));
    assert!(validate_address("fe80::1"));
    assert!(validate_address("2001:0DB8:85a3::8a2e:0370:7334"));
}

#[test]
fn ipv6_check_is_loose() {
    // Not valid RFC 4291 literals, accepted anyway.
    assert!(validate_address("1:::2"));
    assert!(validate_address(":"));
}

#[test]
fn ipv6_non_hex_fails() {
    assert!(!validate_address("gg::1"));
    assert!(!validate_address("::ffff:192.168.1.1"));
    assert!(!validate_address("abcd"));
}
