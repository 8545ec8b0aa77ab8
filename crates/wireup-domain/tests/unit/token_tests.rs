//! Unit tests for the Token value object

use std::collections::HashMap;

use wireup_domain::Token;

#[test]
fn test_token_round_trips_raw_form() {
    let token = Token::from("Database@primary");
    assert_eq!(token.as_str(), "Database@primary");
}

#[test]
fn test_token_name_strips_at_suffix() {
    let token = Token::from("Database@primary");
    assert_eq!(token.name(), "Database");
}

#[test]
fn test_token_name_strips_at_first_at_only() {
    let token = Token::from("Cache@tier@2");
    assert_eq!(token.name(), "Cache");
}

#[test]
fn test_token_name_without_suffix_is_raw() {
    let token = Token::from("Logger");
    assert_eq!(token.name(), "Logger");
}

#[test]
fn test_token_display_uses_stripped_name() {
    let token = Token::from("Session@req-17");
    assert_eq!(format!("{token}"), "Session");
}

#[test]
fn test_token_equality_uses_raw_form() {
    // Two tokens sharing a display name are still distinct identities
    let a = Token::from("Store@a");
    let b = Token::from("Store@b");
    assert_ne!(a, b);
    assert_eq!(a, Token::from("Store@a"));
}

#[test]
fn test_token_as_map_key() {
    let mut map = HashMap::new();
    map.insert(Token::from("Engine"), 1);
    map.insert(Token::from("Engine@spare"), 2);
    assert_eq!(map.get(&Token::from("Engine")), Some(&1));
    assert_eq!(map.get(&Token::from("Engine@spare")), Some(&2));
}

#[test]
fn test_token_from_string_and_ref() {
    let owned = Token::from(String::from("Widget"));
    let reference = Token::from(&owned);
    assert_eq!(owned, reference);
}
