//! Read-only access to the cookies that identify the current user.

use std::collections::HashMap;
use std::sync::Arc;

/// Name of the cookie holding the user's identity token.
pub const IDENTITY_COOKIE: &str = "GU_U";

/// Anything that can answer "what is the value of cookie `name` right now".
///
/// Looked up on every request, never cached by the client.
pub trait CookieSource {
    fn cookie(&self, name: &str) -> Option<String>;
}

/// A cookie source that never has anything, for anonymous callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieSource for NoCookies {
    fn cookie(&self, _name: &str) -> Option<String> {
        None
    }
}

impl CookieSource for HashMap<String, String> {
    fn cookie(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}

impl<C: CookieSource + ?Sized> CookieSource for &C {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

impl<C: CookieSource + ?Sized> CookieSource for Arc<C> {
    fn cookie(&self, name: &str) -> Option<String> {
        (**self).cookie(name)
    }
}

/// Cookies parsed from a `document.cookie` / `Cookie:` header style string,
/// e.g. `"theme=dark; GU_U=abc123"`.
#[derive(Debug, Clone, Default)]
pub struct CookieHeader {
    pairs: Vec<(String, String)>,
}

impl CookieHeader {
    pub fn parse(header: &str) -> Self {
        let pairs = header
            .split(';')
            .filter_map(|part| {
                let (name, value) = part.split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();
        Self { pairs }
    }
}

impl CookieSource for CookieHeader {
    // First occurrence wins.
    fn cookie(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    }
}
