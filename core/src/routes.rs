//! Process-wide route registry: symbolic keys mapped to URL templates.
//!
//! # Design
//! Every concrete client registers its routes here during `initialize` and
//! resolves them on each request, so no client ever hand-writes a URL. A
//! template carries optional placeholder segments (`/:name` path style,
//! `=:name` query style); resolution substitutes supplied arguments and
//! elides the rest, which lets one template serve both the "by key" and
//! "whole collection" shapes of the same base path: `api/heroes/:id` with no
//! `id` argument degrades to `api/heroes`.
//!
//! The registry is written once per key at startup and read on every request.
//! Backing it with `DashMap` makes a reentrant re-`add` of an existing key
//! safe — last write wins — without any explicit locking at call sites.

use std::collections::HashMap;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Joins a prefix to a route key: `Hero` + `get` -> `Hero.get`.
const KEY_SEPARATOR: char = '.';

/// Argument bag consumed by placeholder substitution.
pub type RouteArgs = HashMap<String, String>;

/// Matches a placeholder segment: `/:name` or `=:name`, name up to the next `/`.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:/:|=:)([^/]+)").expect("placeholder pattern is valid"));

/// Registry storing URL templates indexed by a symbolic key.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    routes: DashMap<String, String>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the template under `key`, overwriting any previous entry.
    ///
    /// The template is not validated: a malformed placeholder simply never
    /// matches during resolution and passes through literally.
    pub fn add(&self, key: &str, template: &str) {
        tracing::debug!(key, template, "route registered");
        self.routes.insert(key.to_string(), template.to_string());
    }

    /// Resolves `key` (namespaced with `prefix` when given) into a concrete
    /// path, substituting placeholders from `args`.
    ///
    /// An unknown key yields `None`, never an error. A placeholder whose
    /// argument is absent or empty is removed together with its separator.
    pub fn resolve(&self, key: &str, args: &RouteArgs, prefix: Option<&str>) -> Option<String> {
        let full_key = match prefix {
            Some(p) => format!("{p}{KEY_SEPARATOR}{key}"),
            None => key.to_string(),
        };
        let template = self.routes.get(&full_key)?;
        let resolved = PLACEHOLDER.replace_all(template.value(), |caps: &Captures| {
            // The separator is the first character of the whole match.
            let matched = &caps[0];
            let separator = &matched[..1];
            match caps.get(1).and_then(|name| args.get(name.as_str())) {
                Some(value) if !value.is_empty() => format!("{separator}{value}"),
                _ => String::new(),
            }
        });
        Some(resolved.into_owned())
    }
}
