//! Keyword recognition.
//!
//! A hand-built trie: the first one to three bytes select a candidate, and
//! the remainder is compared in one slice equality.

use cpc_ir::TokenKind;

/// Classify an identifier lexeme.
pub fn classify(ident: &[u8]) -> TokenKind {
    use TokenKind as T;

    let rest = |skip: usize, tail: &[u8], kind: TokenKind| {
        if ident.get(skip..) == Some(tail) {
            kind
        } else {
            T::Ident
        }
    };

    match ident {
        [b'b', b'o', ..] => rest(2, b"ol", T::Bool),
        [b'b', b'r', ..] => rest(2, b"eak", T::Break),
        [b'c', b'a', ..] => rest(2, b"se", T::Case),
        [b'c', b'h', ..] => rest(2, b"ar", T::Char),
        [b'c', b'i', b'n', b'c', ..] => rest(4, b"lude", T::Cinclude),
        [b'c', b'i', b'n', b's', ..] => rest(4, b"ert", T::Cinsert),
        [b'c', b'o', b'n', b't', ..] => rest(4, b"inue", T::Continue),
        [b'c', b'o', b'n', b's', ..] => rest(4, b"t", T::Const),
        [b'c', b's', ..] => rest(2, b"tring", T::Cstring),
        [b'd', b'e', ..] => rest(2, b"fault", T::Default),
        [b'd', b'o'] => T::Do,
        [b'd', b'o', ..] => rest(2, b"uble", T::Double),
        [b'e', b'l', ..] => rest(2, b"se", T::Else),
        [b'e', b'n', ..] => rest(2, b"um", T::Enum),
        [b'f', b'a', ..] => rest(2, b"lse", T::False),
        [b'f', b'l', b'a', ..] => rest(3, b"genum", T::FlagEnum),
        [b'f', b'l', b'o', ..] => rest(3, b"at", T::Float),
        [b'f', b'o', ..] => rest(2, b"r", T::For),
        [b'f', b'u', ..] => rest(2, b"nc", T::Func),
        [b'i', b'f'] => T::If,
        [b'i', b'm', ..] => rest(2, b"port", T::Import),
        [b'i', b'n', ..] => rest(2, b"t", T::Int),
        [b'l', ..] => rest(1, b"ong", T::Long),
        [b'm', ..] => rest(1, b"atch", T::Match),
        [b'n', b'a', b't', ..] => rest(3, b"ive", T::Native),
        [b'n', b'a', b'm', ..] => rest(3, b"espace", T::Namespace),
        [b'n', b'u', b'l', b'l'] => T::Null,
        [b'n', b'u', ..] => rest(2, b"llptr", T::Nullptr),
        [b'o', b'f', ..] => rest(2, b"fsetof", T::Offsetof),
        [b'o', b'p', ..] => rest(2, b"erator", T::Operator),
        [b'p', ..] => rest(1, b"rint", T::Print),
        [b'r', ..] => rest(1, b"eturn", T::Return),
        [b's', b'h', ..] => rest(2, b"ort", T::Short),
        [b's', b'i', ..] => rest(2, b"zeof", T::Sizeof),
        [b's', b't', ..] => rest(2, b"ruct", T::Struct),
        [b's', b'w', ..] => rest(2, b"itch", T::Switch),
        [b't', b'r', ..] => rest(2, b"ue", T::True),
        [b't', b'y', ..] => rest(2, b"pedef", T::Typedef),
        [b'u', b'c', ..] => rest(2, b"har", T::Uchar),
        [b'u', b'i', ..] => rest(2, b"nt", T::Uint),
        [b'u', b'l', ..] => rest(2, b"ong", T::Ulong),
        [b'u', b'n', ..] => rest(2, b"ion", T::Union),
        [b'u', b's', b'h', ..] => rest(3, b"ort", T::Ushort),
        [b'u', b's', b'i', ..] => rest(3, b"ng", T::Using),
        [b'v', ..] => rest(1, b"oid", T::Void),
        [b'w', ..] => rest(1, b"hile", T::While),
        _ => T::Ident,
    }
}

#[cfg(test)]
mod tests;
