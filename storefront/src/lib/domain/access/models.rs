use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use crate::domain::access::errors::PatternError;
use crate::domain::account::models::Principal;
use crate::domain::account::models::Role;

/// Request path matcher.
///
/// Either an exact path, or a subtree written with a trailing `/*` or `/**`.
/// A subtree matches its base path and everything beneath it at any depth:
/// `/admin/**` matches `/admin`, `/admin/home` and `/admin/brands/7/edit`,
/// but not `/administrator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    Subtree(String),
}

impl PathPattern {
    /// Parse a pattern as written in configuration.
    ///
    /// # Errors
    /// * `MissingLeadingSlash` - Pattern is not absolute
    /// * `MisplacedWildcard` - `*` appears anywhere but the final segment
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::MissingLeadingSlash(pattern.to_string()));
        }

        let (base, subtree) = match pattern
            .strip_suffix("/**")
            .or_else(|| pattern.strip_suffix("/*"))
        {
            Some(base) => (base, true),
            None => (pattern, false),
        };

        if base.contains('*') {
            return Err(PatternError::MisplacedWildcard(pattern.to_string()));
        }

        Ok(if subtree {
            PathPattern::Subtree(base.to_string())
        } else {
            PathPattern::Exact(base.to_string())
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Subtree(base) => {
                path == base
                    || path
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Exact(exact) => f.write_str(exact),
            PathPattern::Subtree(base) => write!(f, "{}/**", base),
        }
    }
}

/// What a request must bring to pass a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Public,
    /// Principal holding one of the roles; an empty set admits any principal.
    RequireAnyRole(BTreeSet<Role>),
}

impl Requirement {
    pub fn any_role(roles: impl IntoIterator<Item = Role>) -> Self {
        Requirement::RequireAnyRole(roles.into_iter().collect())
    }

    pub fn authenticated() -> Self {
        Requirement::RequireAnyRole(BTreeSet::new())
    }

    pub fn decide(&self, principal: Option<&Principal>) -> Decision {
        match (self, principal) {
            (Requirement::Public, _) => Decision::Allow,
            (Requirement::RequireAnyRole(_), None) => Decision::DenyRequireLogin,
            (Requirement::RequireAnyRole(roles), Some(principal)) => {
                if roles.is_empty() || roles.contains(&principal.role) {
                    Decision::Allow
                } else {
                    Decision::DenyForbidden
                }
            }
        }
    }
}

/// One line of the access matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRule {
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl AccessRule {
    pub fn new(pattern: &str, requirement: Requirement) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            requirement,
        })
    }
}

/// Outcome of evaluating the access matrix for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    DenyForbidden,
    DenyRequireLogin,
}

/// Treatment of paths that no rule matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedPathPolicy {
    /// Any logged-in principal
    #[default]
    Authenticated,
    /// Nobody; anonymous requests are still sent to the login page first
    Deny,
    /// Everybody
    Permit,
}

impl UnmatchedPathPolicy {
    pub fn decide(&self, principal: Option<&Principal>) -> Decision {
        match (self, principal) {
            (UnmatchedPathPolicy::Authenticated, _) => Requirement::authenticated().decide(principal),
            (UnmatchedPathPolicy::Permit, _) => Decision::Allow,
            (UnmatchedPathPolicy::Deny, None) => Decision::DenyRequireLogin,
            (UnmatchedPathPolicy::Deny, Some(_)) => Decision::DenyForbidden,
        }
    }
}
