// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Template helpers consumed by the generator's handlebars templates.
//!
//! | Helper              | Purpose                                                |
//! |---------------------|--------------------------------------------------------|
//! | `filter`            | Hide configured function names from the docs           |
//! | `formatDescription` | Collapse line breaks and space runs into single spaces |
//! | `gt`                | Render the block if `a > b`, the inverse otherwise     |
//!
//! The generator loads helpers from a JavaScript module (`docs/helpers.js`).
//! [`TemplateHelpers::render_module`] writes that module from the same rules the Rust
//! functions here implement, so the excluded names live in `docify.json5` instead of
//! being edited by hand.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of `\r`, `\n` and spaces.
static DESCRIPTION_WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\r\n ]+").expect("Invalid description whitespace regex")
});

/// Which side of a block helper a template renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateBranch {
    /// The helper's main block (`options.fn`).
    Block,
    /// The `{{else}}` block (`options.inverse`).
    Inverse,
}

impl TemplateBranch {
    pub fn select<T>(self, block: T, inverse: T) -> T {
        match self {
            TemplateBranch::Block => block,
            TemplateBranch::Inverse => inverse,
        }
    }
}

/// Trim, then collapse every run of line breaks and spaces into one space.
///
/// Source descriptions are hard wrapped and aligned for reading in the editor, which
/// renders badly in markdown tables.
#[must_use]
pub fn format_description(text: &str) -> String {
    DESCRIPTION_WHITESPACE_REGEX
        .replace_all(text.trim(), " ")
        .into_owned()
}

/// `{{#gt a b}}…{{else}}…{{/gt}}`.
pub fn gt<T: PartialOrd + ?Sized>(a: &T, b: &T) -> TemplateBranch {
    if a > b {
        TemplateBranch::Block
    } else {
        TemplateBranch::Inverse
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateHelpers {
    pub excluded_functions: Vec<String>,
}

impl TemplateHelpers {
    #[must_use]
    pub fn new(excluded_functions: Vec<String>) -> Self { Self { excluded_functions } }

    /// `true` if `name` should appear in the generated docs.
    #[must_use]
    pub fn filter(&self, name: &str) -> bool {
        !self.excluded_functions.iter().any(|excluded| excluded == name)
    }

    /// Render the helpers module loaded by the generator via `--helpers`.
    ///
    /// # Errors
    ///
    /// Returns an error if the excluded names cannot be serialized.
    pub fn render_module(&self) -> Result<String, serde_json::Error> {
        let excluded = serde_json::to_string(&self.excluded_functions)?;
        Ok(format!(
            r#"// Generated by docify. Edit `excluded_functions` in docify.json5 instead.
const EXCLUDED_FUNCTIONS = {excluded};

module.exports = {{
  filter: (name) => !EXCLUDED_FUNCTIONS.includes(name),

  formatDescription: function (options) {{
    return options
      .fn(this)
      .trim()
      .replace(/[\r\n ]+/gm, " ");
  }},

  gt: function (a, b) {{
    const next = arguments[arguments.length - 1];
    return a > b ? next.fn(this) : next.inverse(this);
  }},
}};
"#
        ))
    }
}
