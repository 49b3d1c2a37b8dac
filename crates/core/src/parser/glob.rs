use regex::Regex;

use crate::error::{Error, Result};

/// Compiled hierarchical filter for directory scanning
///
/// Matches entry paths relative to the scanned root, with `/` as the segment
/// separator. `*` matches within one segment, `**` matches across segments.
/// No filter (or an empty one) means "immediate children only, any name".
#[derive(Debug, Clone)]
pub struct FilterMatcher {
    pattern: String,
    regex: Regex,
}

impl FilterMatcher {
    /// Compile a filter expression; `None` compiles the immediate-children
    /// default
    pub fn compile(filter: Option<&str>) -> Result<Self> {
        let trimmed = filter.map(|f| f.trim_start_matches('/')).unwrap_or("");
        let pattern = if trimmed.is_empty() { "*" } else { trimmed };

        let mut source = String::from("^");
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '*' if chars.peek() == Some(&'*') => {
                    chars.next();
                    // `**/` also matches zero directories
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        source.push_str("(?:.*/)?");
                    } else {
                        source.push_str(".*");
                    }
                }
                '*' => source.push_str("[^/]*"),
                _ => source.push_str(&regex::escape(&c.to_string())),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| {
            Error::MalformedSpec(format!("invalid filter '{pattern}': {e}"))
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Match a `/`-separated path relative to the scanned root
    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}
