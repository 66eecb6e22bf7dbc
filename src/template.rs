//! File-backed template renderer.
//!
//! [`TemplateRenderer`] is the [`Renderer`] used by the command line. A
//! render id names a template file relative to the renderer's root, and
//! the file is rendered by substituting variables.
//!
//! # Syntax
//!
//! - `${name}` - replaced with the value of `name`
//! - `$${name}` - produces literal `${name}` in output
//!
//! Because an escaped directive survives one rendering pass as a live
//! `${name}`, a cache entry loaded in [`LoadMode::Execute`](crate::config::LoadMode::Execute)
//! is evaluated again on every load.
//!
//! # Example
//!
//! ```
//! use rendercache::template::render_str;
//! use std::collections::HashMap;
//!
//! let vars = HashMap::from([("title".to_string(), "Books".to_string())]);
//! assert_eq!(render_str("<h1>${title}</h1>", &vars).unwrap(), "<h1>Books</h1>");
//! ```

use anyhow::{bail, Context};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::host::Renderer;

/// A segment of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Split a template into literal text and variable references.
///
/// An unterminated `${` is kept as literal text.
pub fn parse_template(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                // $$ becomes $, so $${x} renders as ${x}
                chars.next();
                literal.push('$');
            }
            Some('{') => {
                chars.next();
                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if closed {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Variable(name.trim().to_string()));
                } else {
                    literal.push_str("${");
                    literal.push_str(&name);
                }
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Render a template string against `vars`.
///
/// # Errors
///
/// Fails on the first variable that has no value.
pub fn render_str(input: &str, vars: &HashMap<String, String>) -> anyhow::Result<String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_template(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => match vars.get(&name) {
                Some(value) => result.push_str(value),
                None => bail!("Unresolved variable: ${{{}}}", name),
            },
        }
    }

    Ok(result)
}

/// Renders template files from a root directory.
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    root: PathBuf,
    vars: HashMap<String, String>,
}

impl TemplateRenderer {
    /// Create a renderer resolving render ids against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            vars: HashMap::new(),
        }
    }

    /// Assign a variable.
    pub fn assign(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Assign a variable, builder style.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.assign(name, value);
        self
    }

    /// Currently assigned variables.
    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl Renderer for TemplateRenderer {
    fn render_to_string(&self, render_id: &str) -> anyhow::Result<String> {
        let path = self.root.join(render_id);
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read template {}", path.display()))?;
        render_str(&source, &self.vars).with_context(|| format!("In template {}", render_id))
    }

    fn evaluate(&self, source: &str) -> anyhow::Result<String> {
        render_str(source, &self.vars)
    }
}
