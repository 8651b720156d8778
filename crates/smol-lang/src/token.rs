use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The receiver of the first message.
    InitialObject(String),
    /// A unary message.
    Selector(String),
    /// A keyword message (`name:`) with a flat argument.
    ComplexSelector(String, String),
    /// A keyword message whose argument is a bracketed sub-expression.
    ComplexSelectorWithExpression(String, String),
    /// A bracketed sub-expression in selector position; its value replaces
    /// the running receiver.
    InnerExpression(String),
}

impl Token {
    /// The selector sent by this token, if it sends one.
    pub fn selector(&self) -> Option<&str> {
        match self {
            Token::Selector(name)
            | Token::ComplexSelector(name, _)
            | Token::ComplexSelectorWithExpression(name, _) => Some(name),
            Token::InitialObject(_) | Token::InnerExpression(_) => None,
        }
    }
}

impl Display for Token {
    /// Writes the token back as source text.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::InitialObject(name) | Token::Selector(name) => write!(f, "{}", name),
            Token::ComplexSelector(name, argument) => write!(f, "{} {}", name, argument),
            Token::ComplexSelectorWithExpression(name, inner) => write!(f, "{} [{}]", name, inner),
            Token::InnerExpression(inner) => write!(f, "[{}]", inner),
        }
    }
}
