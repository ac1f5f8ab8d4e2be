use super::*;
use proptest::prelude::*;

#[test]
fn test_parse_lowercases_and_strips_trailing_dot() {
    let domain = DomainName::parse("  Mail.EXAMPLE.com. ").unwrap();
    assert_eq!(domain.as_str(), "mail.example.com");
}

#[test]
fn test_parse_rejects_empty() {
    for input in ["", "   ", "."] {
        let err = DomainName::parse(input).unwrap_err();
        assert_eq!(err.reason, DomainRejection::Empty, "input {input:?}");
    }
}

#[test]
fn test_parse_rejects_ip_addresses() {
    let err = DomainName::parse("192.0.2.1").unwrap_err();
    assert_eq!(err.reason, DomainRejection::IpAddress);
    let err = DomainName::parse("2001:db8::1").unwrap_err();
    assert_eq!(err.reason, DomainRejection::IpAddress);
}

#[test]
fn test_parse_rejects_single_label() {
    let err = DomainName::parse("localhost").unwrap_err();
    assert_eq!(err.reason, DomainRejection::SingleLabel);
}

#[test]
fn test_parse_rejects_malformed_labels() {
    assert_eq!(
        DomainName::parse("example..com").unwrap_err().reason,
        DomainRejection::EmptyLabel
    );
    assert_eq!(
        DomainName::parse("-example.com").unwrap_err().reason,
        DomainRejection::HyphenBoundary
    );
    assert_eq!(
        DomainName::parse("exa mple.com").unwrap_err().reason,
        DomainRejection::InvalidCharacter
    );
    assert_eq!(
        DomainName::parse("user@example.com").unwrap_err().reason,
        DomainRejection::InvalidCharacter
    );
    let long_label = format!("{}.com", "a".repeat(64));
    assert_eq!(
        DomainName::parse(&long_label).unwrap_err().reason,
        DomainRejection::LabelTooLong
    );
}

#[test]
fn test_parse_rejects_too_long() {
    let label = "a".repeat(60);
    let long = vec![label.as_str(); 5].join(".");
    assert!(long.len() > 253);
    assert_eq!(
        DomainName::parse(&long).unwrap_err().reason,
        DomainRejection::TooLong
    );
}

#[test]
fn test_parse_converts_idn_to_punycode() {
    let domain = DomainName::parse("münchen.de").unwrap();
    assert_eq!(domain.as_str(), "xn--mnchen-3ya.de");
}

#[test]
fn test_parse_accepts_underscore_labels() {
    assert!(DomainName::parse("_dmarc.example.com").is_ok());
}

#[test]
fn test_prefixed() {
    let domain = DomainName::parse("example.com").unwrap();
    assert_eq!(domain.prefixed("_dmarc"), "_dmarc.example.com");
    assert_eq!(
        domain.prefixed("selector1._domainkey"),
        "selector1._domainkey.example.com"
    );
}

#[test]
fn test_error_message_names_input() {
    let err = DomainName::parse("localhost").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid domain 'localhost': needs at least two labels"
    );
}

proptest! {
    #[test]
    fn test_parse_idempotent(domain in "[a-z]{1,20}(\\.[a-z]{2,10}){1,3}") {
        let first = DomainName::parse(&domain).unwrap();
        let second = DomainName::parse(first.as_str()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_parse_case_insensitive(domain in "[a-zA-Z]{1,20}\\.[a-zA-Z]{2,10}") {
        let upper = DomainName::parse(&domain.to_uppercase()).unwrap();
        let lower = DomainName::parse(&domain.to_lowercase()).unwrap();
        prop_assert_eq!(upper, lower);
    }

    #[test]
    fn test_parse_never_panics(input in "\\PC{0,80}") {
        let _ = DomainName::parse(&input);
    }
}
