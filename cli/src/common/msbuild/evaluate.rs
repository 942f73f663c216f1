//! # MSBuild Property Expansion
//!
//! File: cli/src/common/msbuild/evaluate.rs
//!
//! ## Overview
//!
//! A small subset of MSBuild's property evaluation: `$(Name)` references are
//! replaced with the value currently visible for `Name`. Lookup order matches
//! MSBuild's precedence:
//!
//! 1. Global properties (solution/project locations, configured extras). These
//!    cannot be redefined by the project.
//! 2. Properties defined earlier in the project (or applied from imports).
//! 3. Environment variables.
//!
//! Unknown names expand to the empty string. Property functions and anything
//! else that is not a plain name (`$([System.IO.Path]::Combine(...))`) are left
//! verbatim. Names are case-insensitive.
//!
use std::collections::HashMap;
use tracing::debug;

/// Environment variables of the current process. Entries whose name or value
/// is not valid UTF-8 cannot be referenced from a project and are skipped.
pub fn process_environment() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
            (Ok(name), Ok(value)) => Some((name, value)),
            (name, _) => {
                debug!("Skipping non UTF-8 environment variable {:?}", name);
                None
            }
        })
        .collect()
}

/// The set of property values visible while evaluating a project.
#[derive(Debug, Clone, Default)]
pub struct PropertyScope {
    global: HashMap<String, String>,
    project: HashMap<String, String>,
    environment: HashMap<String, String>,
}

impl PropertyScope {
    /// Creates a scope from global properties and environment variables.
    pub fn new<G, E>(global: G, environment: E) -> Self
    where
        G: IntoIterator<Item = (String, String)>,
        E: IntoIterator<Item = (String, String)>,
    {
        Self {
            global: global
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
            project: HashMap::new(),
            environment: environment
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.global.contains_key(&name.to_lowercase())
    }

    /// Records a project-level value. Global properties keep their value.
    pub fn define(&mut self, name: &str, value: String) {
        let key = name.to_lowercase();
        if self.global.contains_key(&key) {
            return;
        }
        self.project.insert(key, value);
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        let key = name.to_lowercase();
        self.global
            .get(&key)
            .or_else(|| self.project.get(&key))
            .or_else(|| self.environment.get(&key))
            .map(String::as_str)
    }

    /// Expands every `$(Name)` reference in `raw`.
    pub fn expand(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(start) = rest.find("$(") {
            out.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];
            match matching_paren(after_open) {
                Some(close) => {
                    let inner = &after_open[..close];
                    if is_property_name(inner) {
                        out.push_str(self.lookup(inner).unwrap_or(""));
                    } else {
                        out.push_str("$(");
                        out.push_str(inner);
                        out.push(')');
                    }
                    rest = &after_open[close + 1..];
                }
                None => {
                    // Unbalanced reference; keep the remainder untouched.
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Index of the `)` closing a reference whose `$(` has already been consumed.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn is_property_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
