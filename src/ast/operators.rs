//! Operator enums for assignment, infix, prefix and postfix expressions.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    Assign,
    PlusAssign,
    MinusAssign,
    TimesAssign,
    DivideAssign,
    RemainderAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    LeftShiftAssign,
    RightShiftSignedAssign,
    RightShiftUnsignedAssign,
}

impl AssignmentOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::PlusAssign => "+=",
            AssignmentOperator::MinusAssign => "-=",
            AssignmentOperator::TimesAssign => "*=",
            AssignmentOperator::DivideAssign => "/=",
            AssignmentOperator::RemainderAssign => "%=",
            AssignmentOperator::BitAndAssign => "&=",
            AssignmentOperator::BitOrAssign => "|=",
            AssignmentOperator::BitXorAssign => "^=",
            AssignmentOperator::LeftShiftAssign => "<<=",
            AssignmentOperator::RightShiftSignedAssign => ">>=",
            AssignmentOperator::RightShiftUnsignedAssign => ">>>=",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::PlusAssign,
            "-=" => AssignmentOperator::MinusAssign,
            "*=" => AssignmentOperator::TimesAssign,
            "/=" => AssignmentOperator::DivideAssign,
            "%=" => AssignmentOperator::RemainderAssign,
            "&=" => AssignmentOperator::BitAndAssign,
            "|=" => AssignmentOperator::BitOrAssign,
            "^=" => AssignmentOperator::BitXorAssign,
            "<<=" => AssignmentOperator::LeftShiftAssign,
            ">>=" => AssignmentOperator::RightShiftSignedAssign,
            ">>>=" => AssignmentOperator::RightShiftUnsignedAssign,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InfixOperator {
    ConditionalOr,
    ConditionalAnd,
    Or,
    Xor,
    And,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    LeftShift,
    RightShiftSigned,
    RightShiftUnsigned,
    Plus,
    Minus,
    Times,
    Divide,
    Remainder,
}

impl InfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfixOperator::ConditionalOr => "||",
            InfixOperator::ConditionalAnd => "&&",
            InfixOperator::Or => "|",
            InfixOperator::Xor => "^",
            InfixOperator::And => "&",
            InfixOperator::Equals => "==",
            InfixOperator::NotEquals => "!=",
            InfixOperator::Less => "<",
            InfixOperator::Greater => ">",
            InfixOperator::LessEquals => "<=",
            InfixOperator::GreaterEquals => ">=",
            InfixOperator::LeftShift => "<<",
            InfixOperator::RightShiftSigned => ">>",
            InfixOperator::RightShiftUnsigned => ">>>",
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Times => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Remainder => "%",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "||" => InfixOperator::ConditionalOr,
            "&&" => InfixOperator::ConditionalAnd,
            "|" => InfixOperator::Or,
            "^" => InfixOperator::Xor,
            "&" => InfixOperator::And,
            "==" => InfixOperator::Equals,
            "!=" => InfixOperator::NotEquals,
            "<" => InfixOperator::Less,
            ">" => InfixOperator::Greater,
            "<=" => InfixOperator::LessEquals,
            ">=" => InfixOperator::GreaterEquals,
            "<<" => InfixOperator::LeftShift,
            ">>" => InfixOperator::RightShiftSigned,
            ">>>" => InfixOperator::RightShiftUnsigned,
            "+" => InfixOperator::Plus,
            "-" => InfixOperator::Minus,
            "*" => InfixOperator::Times,
            "/" => InfixOperator::Divide,
            "%" => InfixOperator::Remainder,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PrefixOperator {
    Increment,
    Decrement,
    Plus,
    Minus,
    Not,
    Complement,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Increment => "++",
            PrefixOperator::Decrement => "--",
            PrefixOperator::Plus => "+",
            PrefixOperator::Minus => "-",
            PrefixOperator::Not => "!",
            PrefixOperator::Complement => "~",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Some(match token {
            "++" => PrefixOperator::Increment,
            "--" => PrefixOperator::Decrement,
            "+" => PrefixOperator::Plus,
            "-" => PrefixOperator::Minus,
            "!" => PrefixOperator::Not,
            "~" => PrefixOperator::Complement,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl PostfixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "++" => Some(PostfixOperator::Increment),
            "--" => Some(PostfixOperator::Decrement),
            _ => None,
        }
    }
}
