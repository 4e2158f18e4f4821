//! Literal values from token lexemes.
//!
//! The scanner only classifies literals; the parser calls these to obtain
//! values. `None` means the lexeme is well-formed but not representable.

pub fn int_value(lexeme: &str) -> Option<i32> {
    lexeme.parse().ok()
}

pub fn long_value(lexeme: &str) -> Option<i64> {
    lexeme.strip_suffix(['l', 'L'])?.parse().ok()
}

pub fn float_value(lexeme: &str) -> Option<f32> {
    lexeme.strip_suffix(['f', 'F'])?.parse().ok()
}

pub fn double_value(lexeme: &str) -> Option<f64> {
    lexeme
        .strip_suffix(['d', 'D'])
        .unwrap_or(lexeme)
        .parse()
        .ok()
}

/// Value of a character literal such as `'a'` or `'\n'`. Only ASCII
/// characters fit in a `char`.
pub fn char_value(lexeme: &str) -> Option<u8> {
    let body = lexeme.strip_prefix('\'')?.strip_suffix('\'')?.as_bytes();
    match body {
        [b'\\', escaped] => escape(*escaped),
        [c] if c.is_ascii() => Some(*c),
        _ => None,
    }
}

/// Contents of a string literal without its quotes. Escapes are kept as
/// written.
pub fn string_contents(lexeme: &str) -> &str {
    lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme)
}

fn escape(c: u8) -> Option<u8> {
    Some(match c {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        b'0' => 0,
        b'\\' => b'\\',
        b'\'' => b'\'',
        b'"' => b'"',
        _ => return None,
    })
}
