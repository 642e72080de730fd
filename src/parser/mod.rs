/*! Pattern validation and parsing.

[`validate`] checks a pattern string in a single left-to-right pass and
rejects anything malformed before parsing starts. [`Parser`] is a small
recursive-descent parser that turns a validated pattern into an
[`Expression`] tree. The parser still fails safely on malformed input that
only a programmer error could feed it; it never loops or panics.
*/

use crate::ast::{Expression, Quantifier};
use crate::scanner::CARET_MARK;
use crate::Error;


/// Characters that may follow a backslash. `\c` stands for the reserved
/// caret marker, see [`CARET_MARK`].
const ALLOWED_ESCAPES: [char; 7] = ['\\', '?', '*', '+', '(', ')', 'c'];

/// Checks that `pattern` is well-formed.
///
/// Rules, applied in one pass:
///
/// * every character must be ASCII;
/// * `\` must not be the last character, and may only escape one of
///   `\ ? * + ( ) c`;
/// * a quantifier (`?`, `*`, `+`) must be preceded by `)` or `\`;
/// * groups must be balanced and non-empty.
///
/// The first violated rule fails the whole pattern with
/// [`Error::InvalidPattern`].
pub fn validate(pattern: &str) -> Result<(), Error> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut groups: Vec<usize> = Vec::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii() {
            return Err(Error::InvalidPattern);
        }

        if c == '\\' {
            match chars.get(i + 1) {
                Some(next) if ALLOWED_ESCAPES.contains(next) => {}
                _ => return Err(Error::InvalidPattern),
            }
        }

        if matches!(c, '?' | '*' | '+')
            && (i == 0 || !matches!(chars[i - 1], '\\' | ')'))
        {
            return Err(Error::InvalidPattern);
        }

        if c == '(' && (i == 0 || chars[i - 1] != '\\') {
            groups.push(i);
        }

        if c == ')' && (i == 0 || chars[i - 1] != '\\') {
            match groups.pop() {
                // No matching `(`.
                None => return Err(Error::InvalidPattern),
                // `()`, an empty group.
                Some(open) if open + 1 == i => return Err(Error::InvalidPattern),
                Some(_) => {}
            }
        }
    }

    if groups.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidPattern)
    }
}

/// Recursive-descent parser over a single pattern string.
pub struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    /// Creates a parser for `pattern`. The pattern is expected to have been
    /// accepted by [`validate`] already.
    pub fn new(pattern: &str) -> Self {
        Self { chars: pattern.chars().collect(), pos: 0 }
    }

    /// Parses the whole pattern into an [`Expression`].
    ///
    /// An empty pattern has no expression to return and fails with
    /// [`Error::InvalidPattern`], as does a group with no content.
    pub fn parse(&mut self) -> Result<Expression, Error> {
        self.level()?.ok_or(Error::InvalidPattern)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Parses one nesting level: literal runs and groups, joined into a
    /// left-leaning chain of [`Expression::Sequence`] nodes in the order
    /// they are discovered. Stops at `)` (group boundary) or end of input.
    /// Returns `None` if the level contained nothing.
    fn level(&mut self) -> Result<Option<Expression>, Error> {
        let mut buffer = String::new();
        let mut expression: Option<Expression> = None;

        while let Some(c) = self.current() {
            match c {
                '\\' => {
                    self.advance();
                    if let Some(escaped) = self.current() {
                        // `\c` contributes the reserved caret marker, every
                        // other escape contributes its unescaped form.
                        buffer.push(if escaped == 'c' { CARET_MARK } else { escaped });
                        self.advance();
                    }
                }
                '(' => {
                    if !buffer.is_empty() {
                        let literal = Expression::Exact(std::mem::take(&mut buffer));
                        expression = Some(join(expression, literal));
                    }
                    let group = self.group()?;
                    expression = Some(join(expression, group));
                }
                // The enclosing `group()` call consumes the `)`.
                ')' => break,
                _ => {
                    buffer.push(c);
                    self.advance();
                }
            }
        }

        if !buffer.is_empty() {
            expression = Some(join(expression, Expression::Exact(buffer)));
        }
        Ok(expression)
    }

    /// Parses `(...)` followed by an optional quantifier. The cursor is on
    /// the opening parenthesis when called.
    fn group(&mut self) -> Result<Expression, Error> {
        self.advance();
        let inner = self.level()?.ok_or(Error::InvalidPattern)?;
        self.advance();

        let quantifier = match self.current() {
            Some('?') => {
                self.advance();
                Quantifier::Optional
            }
            Some('*') => {
                self.advance();
                Quantifier::Repeat
            }
            Some('+') => {
                self.advance();
                Quantifier::AtLeast
            }
            _ => Quantifier::None,
        };

        Ok(Expression::group(inner, quantifier))
    }
}

fn join(expression: Option<Expression>, next: Expression) -> Expression {
    match expression {
        None => next,
        Some(expression) => Expression::sequence(expression, next),
    }
}
