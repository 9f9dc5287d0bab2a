/// Question templates: parsing and core substitution.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Name of the single substitution slot: `{x}`.
pub const PLACEHOLDER: &str = "x";

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
    #[error("unknown placeholder '{{{0}}}', expected '{{x}}'")]
    UnknownPlaceholder(String),
    #[error("template must contain exactly one placeholder, found {0}")]
    PlaceholderCount(usize),
}

/// A segment of a parsed question template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// The core substitution slot.
    Placeholder,
}

/// A parsed question template such as `Qui perd vraiment quand {x} devient la règle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTemplate {
    pub source: String,
    pub segments: Vec<TemplateSegment>,
}

impl QuestionTemplate {
    /// Parse a template string.
    ///
    /// Syntax:
    /// - `{x}` → `Placeholder`
    /// - `{{` / `}}` → literal `{` / `}`
    /// - Everything else → `Literal`
    ///
    /// Exactly one placeholder must be present.
    pub fn parse(input: &str) -> Result<QuestionTemplate, TemplateError> {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            match chars[i] {
                '{' => {
                    if i + 1 < len && chars[i + 1] == '{' {
                        literal_buf.push('{');
                        i += 2;
                        continue;
                    }

                    if !literal_buf.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let start = i + 1;
                    let mut end = start;
                    while end < len && chars[end] != '}' {
                        if chars[end] == '{' {
                            return Err(TemplateError::Parse(
                                "nested braces are not allowed".to_string(),
                            ));
                        }
                        end += 1;
                    }
                    if end == len {
                        return Err(TemplateError::Parse("unclosed brace".to_string()));
                    }

                    let name: String = chars[start..end].iter().collect();
                    if name.is_empty() {
                        return Err(TemplateError::Parse("empty braces".to_string()));
                    }
                    if name != PLACEHOLDER {
                        return Err(TemplateError::UnknownPlaceholder(name));
                    }

                    segments.push(TemplateSegment::Placeholder);
                    i = end + 1;
                }
                '}' => {
                    if i + 1 < len && chars[i + 1] == '}' {
                        literal_buf.push('}');
                        i += 2;
                        continue;
                    }
                    return Err(TemplateError::Parse(
                        "unmatched closing brace".to_string(),
                    ));
                }
                c => {
                    literal_buf.push(c);
                    i += 1;
                }
            }
        }

        if !literal_buf.is_empty() {
            segments.push(TemplateSegment::Literal(literal_buf));
        }

        let placeholders = segments
            .iter()
            .filter(|s| matches!(s, TemplateSegment::Placeholder))
            .count();
        if placeholders != 1 {
            return Err(TemplateError::PlaceholderCount(placeholders));
        }

        Ok(QuestionTemplate {
            source: input.to_string(),
            segments,
        })
    }

    /// Substitute `core` into the placeholder.
    pub fn render(&self, core: &str) -> String {
        let mut out = String::with_capacity(self.source.len() + core.len());
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Placeholder => out.push_str(core),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_placeholder() {
        let t = QuestionTemplate::parse("Qui perd vraiment quand {x} devient la règle").unwrap();
        assert_eq!(
            t.segments,
            vec![
                TemplateSegment::Literal("Qui perd vraiment quand ".to_string()),
                TemplateSegment::Placeholder,
                TemplateSegment::Literal(" devient la règle".to_string()),
            ]
        );
    }

    #[test]
    fn render_substitutes_core() {
        let t = QuestionTemplate::parse("Quel acteur aura intérêt à saboter {x} en silence").unwrap();
        assert_eq!(
            t.render("une banque du temps"),
            "Quel acteur aura intérêt à saboter une banque du temps en silence"
        );
    }

    #[test]
    fn placeholder_at_edges() {
        let t = QuestionTemplate::parse("{x}").unwrap();
        assert_eq!(t.segments, vec![TemplateSegment::Placeholder]);
        assert_eq!(t.render("seul"), "seul");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let t = QuestionTemplate::parse("{{ {x} }}").unwrap();
        assert_eq!(t.render("a"), "{ a }");
    }

    #[test]
    fn no_placeholder_error() {
        assert_eq!(
            QuestionTemplate::parse("Pas de trou ici"),
            Err(TemplateError::PlaceholderCount(0))
        );
    }

    #[test]
    fn two_placeholders_error() {
        assert_eq!(
            QuestionTemplate::parse("{x} contre {x}"),
            Err(TemplateError::PlaceholderCount(2))
        );
    }

    #[test]
    fn unknown_placeholder_error() {
        assert_eq!(
            QuestionTemplate::parse("Qui perd quand {y} gagne"),
            Err(TemplateError::UnknownPlaceholder("y".to_string()))
        );
    }

    #[test]
    fn malformed_braces_error() {
        assert!(QuestionTemplate::parse("Bad {} here").is_err());
        assert!(QuestionTemplate::parse("Bad {outer{x}} here").is_err());
        assert!(QuestionTemplate::parse("Bad {x here").is_err());
        assert!(QuestionTemplate::parse("Bad } {x}").is_err());
    }
}
