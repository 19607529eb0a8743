//! Rendering of ordered node sequences
//!
//! The ordering engine stops at a `Vec` of nodes. This module turns such a
//! sequence into text for the CLI: one node per line, a JSON array, or
//! `using Alias = Full.Name;` directives.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// One node per line
    #[default]
    Plain,
    /// `using Short = Full;` per node
    Alias,
    /// JSON array
    Json,
}

impl fmt::Display for Format {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Format::Plain => write!(f, "plain"),
            Format::Alias => write!(f, "alias"),
            Format::Json => write!(f, "json"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Format::Plain),
            "alias" => Ok(Format::Alias),
            "json" => Ok(Format::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// An alias directive: `using {alias} = {target};`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDirective {
    pub alias: String,
    pub target: String,
}

impl fmt::Display for AliasDirective {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "using {} = {};", self.alias, self.target)
    }
}

/// Last path segment of a qualified name, split on `.` or `::`.
///
/// # Examples
///
/// ```
/// use ordo::emit::short_name;
///
/// assert_eq!(short_name("Newtonsoft.Json.JsonToken"), "JsonToken");
/// assert_eq!(short_name("std::collections::HashMap"), "HashMap");
/// assert_eq!(short_name("Plain"), "Plain");
/// ```
pub fn short_name(full: &str) -> &str {
    let after_dot = full.rfind('.').map(|i| i + 1);
    let after_path = full.rfind("::").map(|i| i + 2);
    let start = after_dot.max(after_path).unwrap_or(0);
    match &full[start..] {
        "" => full,
        short => short,
    }
}

/// Build alias directives for a sequence of qualified names.
///
/// Names keep their sequence order. When two different targets share a short
/// name the first one wins and the clash is logged.
pub fn alias_directives<N: fmt::Display>(nodes: &[N]) -> Vec<AliasDirective> {
    let mut by_alias: IndexMap<String, String> = IndexMap::with_capacity(nodes.len());
    for node in nodes {
        let target = node.to_string();
        let alias = short_name(&target).to_string();
        match by_alias.get(&alias) {
            Some(existing) if *existing != target => {
                warn!(%alias, kept = %existing, dropped = %target, "alias clash");
            }
            Some(_) => {}
            None => {
                by_alias.insert(alias, target);
            }
        }
    }
    by_alias
        .into_iter()
        .map(|(alias, target)| AliasDirective { alias, target })
        .collect()
}

/// Render a sequence in the given format.
///
/// # Errors
///
/// Returns `EmitError::Json` if JSON encoding fails.
pub fn render<N: fmt::Display>(
    nodes: &[N],
    format: Format,
) -> Result<String, EmitError> {
    let text = match format {
        Format::Plain => lines(nodes.iter()),
        Format::Alias => lines(alias_directives(nodes).iter()),
        Format::Json => {
            let names: Vec<String> = nodes.iter().map(ToString::to_string).collect();
            serde_json::to_string_pretty(&names)?
        }
    };
    Ok(text)
}

/// Render dependency levels in the given format.
///
/// Plain and alias output number each level; JSON output is an array of
/// arrays.
pub fn render_levels<N: fmt::Display>(
    levels: &[Vec<N>],
    format: Format,
) -> Result<String, EmitError> {
    if format == Format::Json {
        let names: Vec<Vec<String>> = levels
            .iter()
            .map(|level| level.iter().map(ToString::to_string).collect())
            .collect();
        return Ok(serde_json::to_string_pretty(&names)?);
    }

    let mut out = String::new();
    for (depth, level) in levels.iter().enumerate() {
        out.push_str(&format!("level {}:\n", depth));
        for line in render(level, format)?.lines() {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    Ok(out)
}

fn lines<T: fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}
