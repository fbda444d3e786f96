use crate::domain::access::models::AccessRule;
use crate::domain::access::models::Decision;
use crate::domain::access::models::UnmatchedPathPolicy;
use crate::domain::account::models::Principal;

/// Ordered access matrix.
///
/// Read-only after construction. The first rule whose pattern matches decides;
/// later rules are never consulted for that path.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    unmatched: UnmatchedPathPolicy,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>, unmatched: UnmatchedPathPolicy) -> Self {
        Self { rules, unmatched }
    }

    /// Decide whether `principal` (absent when anonymous) may request `path`.
    pub fn evaluate(&self, path: &str, principal: Option<&Principal>) -> Decision {
        match self.rules.iter().find(|rule| rule.pattern.matches(path)) {
            Some(rule) => rule.requirement.decide(principal),
            None => self.unmatched.decide(principal),
        }
    }
}
