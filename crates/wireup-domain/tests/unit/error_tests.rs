//! Unit tests for the error taxonomy

use wireup_domain::{Error, Token};

#[test]
fn test_missing_provider_message_names_token() {
    let err = Error::missing_provider(&Token::from("Unknown"));
    assert_eq!(err.to_string(), "no provider registered for 'Unknown'");
}

#[test]
fn test_missing_provider_strips_at_suffix() {
    let err = Error::missing_provider(&Token::from("Repository@tenant-4"));
    assert_eq!(err.to_string(), "no provider registered for 'Repository'");
}

#[test]
fn test_alias_cycle_message() {
    let err = Error::alias_cycle(&Token::from("Abstract"));
    assert!(err.to_string().contains("alias cycle"));
    assert!(err.to_string().contains("Abstract"));
}

#[test]
fn test_provider_error_carries_message() {
    let err = Error::provider(&Token::from("Db@main"), "connection refused");
    let text = err.to_string();
    assert!(text.contains("Db"));
    assert!(text.contains("connection refused"));
    assert!(!text.contains("@main"));
}

#[test]
fn test_provider_error_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing socket");
    let err = Error::provider_with_source(&Token::from("Db"), "connect failed", io);
    let source = std::error::Error::source(&err).expect("source should be attached");
    assert!(source.to_string().contains("missing socket"));
}

#[test]
fn test_invalid_capacity_message() {
    let err = Error::InvalidCapacity { given: 0 };
    assert_eq!(err.to_string(), "pool capacity must be at least 1, got 0");
}
