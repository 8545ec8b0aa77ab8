//! Unit tests for the token registry

use std::rc::Rc;

use wireup_domain::{CachePolicy, Instance, Token};
use wireup_resolver::{Constructor, Provider, TokenRegistry};

fn provider_returning(value: u32) -> Provider {
    Rc::new(move |_, _| Ok(Rc::new(value) as Instance))
}

#[test]
fn test_empty_registry() {
    let registry = TokenRegistry::default();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
    assert!(registry.provider(&Token::from("T")).is_none());
}

#[test]
fn test_set_provider_registers_token() {
    let mut registry = TokenRegistry::default();
    registry.set_provider(Token::from("T"), provider_returning(1), None);
    assert_eq!(registry.len(), 1);
    assert!(registry.provider(&Token::from("T")).is_some());
    assert!(registry.policy(&Token::from("T")).is_none());
}

#[test]
fn test_set_provider_overwrites_prior_provider() {
    let scope = wireup_resolver::Scope::create();
    let mut registry = TokenRegistry::default();
    registry.set_provider(Token::from("T"), provider_returning(1), None);
    registry.set_provider(Token::from("T"), provider_returning(2), None);

    let provider = registry.provider(&Token::from("T")).unwrap();
    let instance = provider(&scope, None).unwrap();
    let value = instance.downcast_rc::<u32>().ok().unwrap();
    assert_eq!(*value, 2);
}

#[test]
fn test_reprovide_without_policy_clears_policy() {
    let mut registry = TokenRegistry::default();
    registry.set_provider(
        Token::from("T"),
        provider_returning(1),
        Some(CachePolicy::Singleton),
    );
    assert_eq!(
        registry.policy(&Token::from("T")),
        Some(CachePolicy::Singleton)
    );

    registry.set_provider(Token::from("T"), provider_returning(1), None);
    assert!(registry.policy(&Token::from("T")).is_none());
}

#[test]
fn test_alias_and_policy_are_independent_lookups() {
    let mut registry = TokenRegistry::default();
    registry.set_alias(Token::from("Abstract"), Token::from("Concrete"));
    registry.set_policy(Token::from("Abstract"), CachePolicy::pool(2).unwrap());

    assert_eq!(
        registry.alias_target(&Token::from("Abstract")),
        Some(Token::from("Concrete"))
    );
    assert_eq!(
        registry.policy(&Token::from("Abstract")),
        Some(CachePolicy::pool(2).unwrap())
    );
    // The concrete side carries neither
    assert!(registry.alias_target(&Token::from("Concrete")).is_none());
    assert!(registry.policy(&Token::from("Concrete")).is_none());
}

#[test]
fn test_hint_is_stored_per_token() {
    let mut registry = TokenRegistry::default();
    let hint = Constructor::new(["Dep"], |scope| scope.make("Dep"));
    registry.set_hint(Token::from("Concrete"), hint);

    let stored = registry.hint(&Token::from("Concrete")).unwrap();
    assert_eq!(stored.params(), &[Token::from("Dep")]);
    assert!(registry.hint(&Token::from("Other")).is_none());
}

#[test]
fn test_tokens_are_sorted_for_display() {
    let mut registry = TokenRegistry::default();
    registry.set_provider(Token::from("Zeta"), provider_returning(1), None);
    registry.set_provider(Token::from("Alpha"), provider_returning(2), None);
    registry.set_alias(Token::from("Mid"), Token::from("Zeta"));

    let tokens = registry.tokens();
    assert_eq!(
        tokens,
        vec![Token::from("Alpha"), Token::from("Mid"), Token::from("Zeta")]
    );
}
