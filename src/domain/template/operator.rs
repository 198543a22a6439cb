// Operator table for URI template expressions

/// Expansion rule selected by the first character of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operator {
    /// Prefix character as written in the template, `None` for simple expansion
    pub prefix: Option<char>,
    /// Emitted once before the expression's expansion
    pub insertion: &'static str,
    pub separator: char,
    /// Whether values expand as `name=value`
    pub named: bool,
}

impl Operator {
    const fn new(prefix: Option<char>, insertion: &'static str, separator: char, named: bool) -> Self {
        Self {
            prefix,
            insertion,
            separator,
            named,
        }
    }
}

pub const DEFAULT_OPERATOR: Operator = Operator::new(None, "", ',', false);

const OPERATORS: [Operator; 7] = [
    Operator::new(Some('+'), "", ',', false),
    Operator::new(Some('#'), "#", ',', false),
    Operator::new(Some('.'), ".", '.', false),
    Operator::new(Some('/'), "/", '/', false),
    Operator::new(Some(';'), ";", ';', true),
    Operator::new(Some('?'), "?", '&', true),
    Operator::new(Some('&'), "&", '&', true),
];

/// Look up the operator for a prefix character.
///
/// Total: anything that is not a recognized prefix resolves to the default
/// (simple, comma-separated, unnamed) operator.
pub fn lookup(prefix: char) -> Operator {
    find(prefix).unwrap_or(DEFAULT_OPERATOR)
}

/// Like [`lookup`], but reports whether the character is a recognized prefix
pub fn find(prefix: char) -> Option<Operator> {
    OPERATORS.iter().copied().find(|op| op.prefix == Some(prefix))
}
