//! Minimal CSS selector support for querying the render tree.
//!
//! Only compound selectors are supported (no combinators): an optional type
//! selector followed by any number of `#id`, `.class` and `[attr]`
//! components. A selector list is a comma-separated list of compound
//! selectors and matches if any member matches.

use thiserror::Error;

use crate::Element;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,
    #[error("Unexpected character '{found}' at position {position} in selector \"{selector}\"")]
    UnexpectedChar {
        selector: String,
        found: char,
        position: usize,
    },
    #[error("Unterminated attribute selector in \"{0}\"")]
    UnterminatedAttribute(String),
    #[error("Unsupported combinator in \"{0}\"")]
    Combinator(String),
}

/// Attribute selector operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]`
    Exists,
    /// `[attr=val]`
    Eq,
    /// `[attr^=val]`
    Prefix,
    /// `[attr$=val]`
    Suffix,
    /// `[attr*=val]`
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Type(String),
    Universal,
    Id(String),
    Class(String),
    Attribute {
        name: String,
        op: AttrOp,
        value: Option<String>,
    },
}

impl SimpleSelector {
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Type(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Universal => true,
            Self::Id(id) => element.str_id.as_deref() == Some(id.as_str()),
            Self::Class(class) => element.has_class(class),
            Self::Attribute { name, op, value } => {
                let Some(actual) = element.attribute(name) else {
                    return false;
                };
                let expected = value.as_deref().unwrap_or_default();
                match op {
                    AttrOp::Exists => true,
                    AttrOp::Eq => actual == expected,
                    AttrOp::Prefix => !expected.is_empty() && actual.starts_with(expected),
                    AttrOp::Suffix => !expected.is_empty() && actual.ends_with(expected),
                    AttrOp::Substring => !expected.is_empty() && actual.contains(expected),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.simples.iter().all(|x| x.matches(element))
    }
}

/// A parsed, comma-separated selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub alternatives: Vec<CompoundSelector>,
}

impl Selector {
    /// Parse a selector list such as `"section, .project-card"`.
    ///
    /// # Errors
    ///
    /// * If the selector is empty
    /// * If the selector contains a combinator or an unsupported character
    /// * If an attribute selector is not terminated
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let alternatives = input
            .split(',')
            .map(|part| parse_compound(part.trim(), input))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { alternatives })
    }

    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        self.alternatives.iter().any(|x| x.matches(element))
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], mut pos: usize) -> (String, usize) {
    let start = pos;
    while pos < chars.len() && is_ident_char(chars[pos]) {
        pos += 1;
    }
    (chars[start..pos].iter().collect(), pos)
}

fn parse_compound(part: &str, full: &str) -> Result<CompoundSelector, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty);
    }

    let chars = part.chars().collect::<Vec<_>>();
    let mut simples = vec![];
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        match c {
            '*' => {
                simples.push(SimpleSelector::Universal);
                pos += 1;
            }
            '#' | '.' => {
                let (ident, next) = take_ident(&chars, pos + 1);
                if ident.is_empty() {
                    return Err(SelectorError::UnexpectedChar {
                        selector: full.to_string(),
                        found: c,
                        position: pos,
                    });
                }
                simples.push(if c == '#' {
                    SimpleSelector::Id(ident)
                } else {
                    SimpleSelector::Class(ident)
                });
                pos = next;
            }
            '[' => {
                let (simple, next) = parse_attribute(&chars, pos + 1, full)?;
                simples.push(simple);
                pos = next;
            }
            c if c.is_whitespace() || c == '>' || c == '+' || c == '~' => {
                return Err(SelectorError::Combinator(full.to_string()));
            }
            c if is_ident_char(c) && simples.is_empty() => {
                let (ident, next) = take_ident(&chars, pos);
                simples.push(SimpleSelector::Type(ident));
                pos = next;
            }
            c => {
                return Err(SelectorError::UnexpectedChar {
                    selector: full.to_string(),
                    found: c,
                    position: pos,
                });
            }
        }
    }

    Ok(CompoundSelector { simples })
}

fn parse_attribute(
    chars: &[char],
    pos: usize,
    full: &str,
) -> Result<(SimpleSelector, usize), SelectorError> {
    let (name, mut pos) = take_ident(chars, pos);
    if name.is_empty() {
        return Err(SelectorError::UnterminatedAttribute(full.to_string()));
    }

    let op = match chars.get(pos) {
        Some(']') => {
            return Ok((
                SimpleSelector::Attribute {
                    name,
                    op: AttrOp::Exists,
                    value: None,
                },
                pos + 1,
            ));
        }
        Some('=') => {
            pos += 1;
            AttrOp::Eq
        }
        Some(c @ ('^' | '$' | '*')) if chars.get(pos + 1) == Some(&'=') => {
            pos += 2;
            match c {
                '^' => AttrOp::Prefix,
                '$' => AttrOp::Suffix,
                _ => AttrOp::Substring,
            }
        }
        _ => return Err(SelectorError::UnterminatedAttribute(full.to_string())),
    };

    let value = match chars.get(pos) {
        Some(quote @ ('"' | '\'')) => {
            let start = pos + 1;
            let Some(len) = chars[start..].iter().position(|x| x == quote) else {
                return Err(SelectorError::UnterminatedAttribute(full.to_string()));
            };
            pos = start + len + 1;
            chars[start..start + len].iter().collect::<String>()
        }
        _ => {
            let (ident, next) = take_ident(chars, pos);
            pos = next;
            ident
        }
    };

    if chars.get(pos) != Some(&']') {
        return Err(SelectorError::UnterminatedAttribute(full.to_string()));
    }

    Ok((
        SimpleSelector::Attribute {
            name,
            op,
            value: Some(value),
        },
        pos + 1,
    ))
}
