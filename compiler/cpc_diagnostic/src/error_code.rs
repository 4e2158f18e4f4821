//! Error codes for all front-end diagnostics.

use std::fmt;

use cpc_ir::LexError;

/// Error codes.
///
/// Format: E#### where the first digit is the stage:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Type errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Unexpected character
    E0002,
    /// Unrecognised number suffix
    E0003,
    /// Unterminated character literal
    E0004,
    /// More than one character in a character literal
    E0005,
    /// Unterminated block comment
    E0006,
    /// `@` not followed by an identifier or `!`
    E0007,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected type
    E1003,
    /// Invalid assignment target
    E1004,
    /// Expected identifier
    E1005,
    /// Numeric literal out of range
    E1006,

    // Type Errors (E2xxx)
    /// Operator cannot be applied to the operand types
    E2001,
    /// Invalid return type
    E2002,
    /// Invalid print type
    E2003,
    /// Undefined variable
    E2004,
    /// No overload matches the call arguments
    E2005,
    /// Undefined function
    E2006,
    /// Initializer does not match the declared type
    E2007,
    /// Unknown struct field
    E2008,
    /// Condition is not boolean or integer
    E2009,
    /// Unknown type name
    E2010,
    /// Assigned value does not match the target type
    E2011,

    // Internal Errors (E9xxx)
    /// Allocator reservation exhausted
    E9001,
    /// Too many errors
    E9002,
}

/// Front-end stage that reported a diagnostic.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Stage {
    Lexer,
    Parser,
    Checker,
    Internal,
}

impl Stage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Lexer => "lexer",
            Stage::Parser => "parser",
            Stage::Checker => "checker",
            Stage::Internal => "internal",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            // Lexer
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            // Parser
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            // Type
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            // Internal
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    pub const fn stage(self) -> Stage {
        match self {
            ErrorCode::E0001
            | ErrorCode::E0002
            | ErrorCode::E0003
            | ErrorCode::E0004
            | ErrorCode::E0005
            | ErrorCode::E0006
            | ErrorCode::E0007 => Stage::Lexer,
            ErrorCode::E1001
            | ErrorCode::E1002
            | ErrorCode::E1003
            | ErrorCode::E1004
            | ErrorCode::E1005
            | ErrorCode::E1006 => Stage::Parser,
            ErrorCode::E2001
            | ErrorCode::E2002
            | ErrorCode::E2003
            | ErrorCode::E2004
            | ErrorCode::E2005
            | ErrorCode::E2006
            | ErrorCode::E2007
            | ErrorCode::E2008
            | ErrorCode::E2009
            | ErrorCode::E2010
            | ErrorCode::E2011 => Stage::Checker,
            ErrorCode::E9001 | ErrorCode::E9002 => Stage::Internal,
        }
    }

    /// Code for an error token produced by the lexer.
    pub const fn from_lex_error(error: LexError) -> Self {
        match error {
            LexError::UnterminatedString => ErrorCode::E0001,
            LexError::UnexpectedCharacter => ErrorCode::E0002,
            LexError::InvalidNumberSuffix => ErrorCode::E0003,
            LexError::UnterminatedChar => ErrorCode::E0004,
            LexError::CharLiteralTooLong => ErrorCode::E0005,
            LexError::UnterminatedComment => ErrorCode::E0006,
            LexError::InvalidTag => ErrorCode::E0007,
        }
    }

    pub fn is_lexer_error(self) -> bool {
        self.stage() == Stage::Lexer
    }

    pub fn is_parser_error(self) -> bool {
        self.stage() == Stage::Parser
    }

    pub fn is_type_error(self) -> bool {
        self.stage() == Stage::Checker
    }

    pub fn is_internal_error(self) -> bool {
        self.stage() == Stage::Internal
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
