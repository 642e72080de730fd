/*! Abstract syntax tree for the pattern language.

A pattern string is parsed into an immutable [`Expression`] tree. Equality
is structural: two trees are equal iff they have the same shape, the same
literal values and the same quantifiers. The tree is acyclic and finite by
construction, so every recursive traversal over it terminates.
*/

use std::fmt::{Display, Formatter};

/// Repetition policy attached to a group.
///
/// Pure data; the only behavior is the display symbol used when rendering
/// an expression back into pattern form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quantifier {
    /// The group occurs exactly once.
    None,
    /// `?`, the group occurs once or not at all.
    Optional,
    /// `*`, the group occurs zero or more times.
    Repeat,
    /// `+`, the group occurs one or more times.
    AtLeast,
}

impl Quantifier {
    /// The symbol that follows a group in pattern form.
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantifier::None => "",
            Quantifier::Optional => "?",
            Quantifier::Repeat => "*",
            Quantifier::AtLeast => "+",
        }
    }
}

/// A node in the pattern tree.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Expression {
    /// Literal text matched verbatim.
    Exact(String),
    /// A parenthesized sub-expression with its repetition policy.
    Group(Box<Expression>, Quantifier),
    /// Ordered concatenation of two expressions.
    Sequence(Box<Expression>, Box<Expression>),
}

impl Expression {
    /// Literal text node.
    pub fn exact(value: impl Into<String>) -> Self {
        Expression::Exact(value.into())
    }

    /// Group node wrapping `inner`.
    pub fn group(inner: Expression, quantifier: Quantifier) -> Self {
        Expression::Group(Box::new(inner), quantifier)
    }

    /// Concatenation of `first` then `second`.
    pub fn sequence(first: Expression, second: Expression) -> Self {
        Expression::Sequence(Box::new(first), Box::new(second))
    }
}

impl Display for Expression {
    /// Renders the expression back into pattern form: literals verbatim,
    /// groups parenthesized with their quantifier symbol appended.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Exact(value) => f.write_str(value),
            Expression::Group(inner, quantifier) => {
                write!(f, "({}){}", inner, quantifier.symbol())
            }
            Expression::Sequence(first, second) => write!(f, "{}{}", first, second),
        }
    }
}
