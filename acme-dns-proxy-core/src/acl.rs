//! Ordered access control list: domain pattern -> bearer token.

use serde::Deserialize;

use crate::dns01::un_fqdn;
use crate::error::{CoreError, CoreResult};
use crate::pattern::Pattern;

/// One `[[acl]]` entry as it appears in the configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    #[serde(default)]
    pub token: String,
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct AccessRule {
    pub pattern: Pattern,
    pub token: String,
}

impl AccessRule {
    /// Plain equality against the rule's token.
    pub fn check_auth(&self, supplied_token: &str) -> bool {
        self.token == supplied_token
    }
}

/// Rules in configuration order; the first match wins.
///
/// Immutable after [`build`](Self::build), so lookups need no locking.
#[derive(Debug, Clone)]
pub struct AccessControlList {
    rules: Vec<AccessRule>,
}

impl AccessControlList {
    /// Compile every rule, failing on the first bad one.
    pub fn build<'a, I>(rules: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a RuleConfig>,
    {
        let rules = rules
            .into_iter()
            .map(|cfg| {
                let pattern = Pattern::compile(&cfg.pattern)?;
                if cfg.token.is_empty() {
                    return Err(CoreError::MissingToken {
                        pattern: cfg.pattern.clone(),
                    });
                }
                Ok(AccessRule {
                    pattern,
                    token: cfg.token.clone(),
                })
            })
            .collect::<CoreResult<Vec<_>>>()?;

        if rules.is_empty() {
            return Err(CoreError::EmptyRuleSet);
        }
        log::debug!("loaded {} access rules", rules.len());
        Ok(Self { rules })
    }

    /// First rule whose pattern matches `domain` (trailing dot ignored).
    pub fn search(&self, domain: &str) -> CoreResult<&AccessRule> {
        let domain = un_fqdn(domain);
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(domain))
            .ok_or_else(|| CoreError::NotFound(domain.to_string()))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessRule> {
        self.rules.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &str, token: &str) -> RuleConfig {
        RuleConfig {
            pattern: pattern.to_string(),
            token: token.to_string(),
        }
    }

    fn three_rules() -> AccessControlList {
        AccessControlList::build(&[
            rule("abc.test", "123"),
            rule("foo.dev", "bar"),
            rule("*.test.local", "secret"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_config_is_rejected() {
        let err = AccessControlList::build(&Vec::<RuleConfig>::new()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyRuleSet));
        assert!(err.to_string().contains("no access rules defined"));
    }

    #[test]
    fn rule_without_token_is_rejected() {
        let err = AccessControlList::build(&[rule("abc", "")]).unwrap_err();
        assert!(matches!(err, CoreError::MissingToken { ref pattern } if pattern == "abc"));
        assert!(err.to_string().contains("'token' not specified"));
    }

    #[test]
    fn bad_pattern_is_rejected() {
        let err = AccessControlList::build(&[rule("ok.test", "t"), rule("[bad", "t")]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPattern { .. }));
    }

    #[test]
    fn builds_all_rules_in_order() {
        let acl = three_rules();
        assert_eq!(acl.len(), 3);
        let patterns: Vec<_> = acl.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, ["abc.test", "foo.dev", "*.test.local"]);
    }

    #[test]
    fn search_finds_wildcard_rule() {
        let acl = three_rules();
        let found = acl.search("abc.test.local").unwrap();
        assert_eq!(found.pattern.as_str(), "*.test.local");
        assert_eq!(found.token, "secret");
    }

    #[test]
    fn search_ignores_trailing_dot() {
        let acl = three_rules();
        assert_eq!(acl.search("foo.dev.").unwrap().token, "bar");
    }

    #[test]
    fn search_misses() {
        let acl = three_rules();
        assert!(matches!(
            acl.search("test.unknown"),
            Err(CoreError::NotFound(ref d)) if d == "test.unknown"
        ));
    }

    #[test]
    fn first_match_wins_over_more_specific_rule() {
        let acl = AccessControlList::build(&[
            rule("*.test.local", "t1"),
            rule("private.test.local", "t2"),
        ])
        .unwrap();
        assert_eq!(acl.search("private.test.local").unwrap().token, "t1");
    }

    #[test]
    fn check_auth_is_exact() {
        let acl = AccessControlList::build(&[rule("", "1234567890")]).unwrap();
        let rule = acl.search("").unwrap();
        assert!(rule.check_auth("1234567890"));
        assert!(!rule.check_auth("abc"));
        assert!(!rule.check_auth("123456789"));
        assert!(!rule.check_auth("12345678901"));
    }
}
