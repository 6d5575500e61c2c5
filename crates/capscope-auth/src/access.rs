//! Per-request capability matching.
//!
//! This is the enforcement point that turns an abstract scope string into
//! concrete per-endpoint access control, independent of the "does this token
//! exist and is it unexpired" check done by the validator.
//!
//! Matching is OR across the capability slugs on the token and OR across the
//! rules within one capability. A rule matches when its method equals the
//! request method and its pattern matches the full request path: patterns are
//! compiled anchored (`^(?:pattern)$`) so a rule for `/v1/o/tokens/` cannot
//! be satisfied by `/v1/o/tokens/5/` or by prefix injection.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use regex::Regex;

use crate::AuthResult;
use crate::scopes::ScopeSet;
use crate::store::CapabilityStore;

/// Decides allow/deny for (method, path) against a token's scope set.
///
/// Compiled patterns are cached keyed by pattern string; capability rules are
/// administratively updated and read-mostly, so the cache never invalidates.
pub struct AccessMatrix {
    capabilities: Arc<dyn CapabilityStore>,
    compiled: RwLock<HashMap<String, Option<Regex>>>,
}

impl AccessMatrix {
    /// Creates an access matrix over a capability store.
    #[must_use]
    pub fn new(capabilities: Arc<dyn CapabilityStore>) -> Self {
        Self {
            capabilities,
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// Whether any capability in `scope` carries a rule allowing
    /// `method path`.
    ///
    /// Unknown slugs resolve to empty rule sets and rules with invalid
    /// patterns never match, so bad data degrades to deny rather than
    /// aborting the request.
    ///
    /// # Errors
    ///
    /// Returns an error only if the capability store fails.
    pub async fn allows(&self, method: &str, path: &str, scope: &ScopeSet) -> AuthResult<bool> {
        let method = method.to_ascii_uppercase();
        for slug in scope.iter() {
            for rule in self.capabilities.rules_for(slug).await? {
                if rule.method != method {
                    continue;
                }
                if self.pattern_matches(&rule.path_pattern, path) {
                    tracing::debug!(%method, %path, capability = %slug, "Request allowed");
                    return Ok(true);
                }
            }
        }
        tracing::debug!(%method, %path, scope = %scope, "Request denied");
        Ok(false)
    }

    /// Matches `path` against the anchored compilation of `pattern`.
    fn pattern_matches(&self, pattern: &str, path: &str) -> bool {
        if let Ok(cache) = self.compiled.read()
            && let Some(entry) = cache.get(pattern)
        {
            return entry.as_ref().is_some_and(|re| re.is_match(path));
        }

        let compiled = compile_anchored(pattern);
        let matched = compiled.as_ref().is_some_and(|re| re.is_match(path));
        if let Ok(mut cache) = self.compiled.write() {
            cache.insert(pattern.to_string(), compiled);
        }
        matched
    }
}

/// Compiles a rule pattern anchored to the full path.
///
/// Returns `None` for invalid patterns; the caller treats those as
/// non-matching.
fn compile_anchored(pattern: &str) -> Option<Regex> {
    match Regex::new(&format!("^(?:{pattern})$")) {
        Ok(re) => Some(re),
        Err(error) => {
            tracing::warn!(%pattern, %error, "Invalid capability rule pattern");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_compilation() {
        let re = compile_anchored(r"/v1/o/tokens/").unwrap();
        assert!(re.is_match("/v1/o/tokens/"));
        assert!(!re.is_match("/v1/o/tokens/5/"));
        assert!(!re.is_match("/prefix/v1/o/tokens/"));

        let re = compile_anchored(r"/v1/o/tokens/\d+/").unwrap();
        assert!(re.is_match("/v1/o/tokens/5/"));
        assert!(!re.is_match("/v1/o/tokens/"));
    }

    #[test]
    fn test_invalid_pattern_is_none() {
        assert!(compile_anchored(r"/v1/(unclosed").is_none());
    }

    #[test]
    fn test_alternation_stays_anchored() {
        // Without the non-capturing group the `$` would bind to the second
        // alternative only.
        let re = compile_anchored(r"/a|/b").unwrap();
        assert!(re.is_match("/a"));
        assert!(re.is_match("/b"));
        assert!(!re.is_match("/a/evil"));
        assert!(!re.is_match("x/b"));
    }
}
