use pretty_assertions::assert_eq;

use super::*;

#[test]
fn every_keyword_round_trips() {
    let keywords = [
        ("struct", TokenKind::Struct),
        ("enum", TokenKind::Enum),
        ("union", TokenKind::Union),
        ("flagenum", TokenKind::FlagEnum),
        ("return", TokenKind::Return),
        ("break", TokenKind::Break),
        ("continue", TokenKind::Continue),
        ("import", TokenKind::Import),
        ("null", TokenKind::Null),
        ("nullptr", TokenKind::Nullptr),
        ("const", TokenKind::Const),
        ("if", TokenKind::If),
        ("else", TokenKind::Else),
        ("do", TokenKind::Do),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("switch", TokenKind::Switch),
        ("match", TokenKind::Match),
        ("case", TokenKind::Case),
        ("default", TokenKind::Default),
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("native", TokenKind::Native),
        ("namespace", TokenKind::Namespace),
        ("using", TokenKind::Using),
        ("sizeof", TokenKind::Sizeof),
        ("offsetof", TokenKind::Offsetof),
        ("cinclude", TokenKind::Cinclude),
        ("cinsert", TokenKind::Cinsert),
        ("operator", TokenKind::Operator),
        ("typedef", TokenKind::Typedef),
        ("func", TokenKind::Func),
        ("print", TokenKind::Print),
        ("int", TokenKind::Int),
        ("cstring", TokenKind::Cstring),
        ("float", TokenKind::Float),
        ("bool", TokenKind::Bool),
        ("double", TokenKind::Double),
        ("char", TokenKind::Char),
        ("short", TokenKind::Short),
        ("long", TokenKind::Long),
        ("void", TokenKind::Void),
        ("uchar", TokenKind::Uchar),
        ("ushort", TokenKind::Ushort),
        ("uint", TokenKind::Uint),
        ("ulong", TokenKind::Ulong),
    ];
    assert_eq!(keywords.len(), TokenKind::COUNT - TokenKind::Struct.index());
    for (text, kind) in keywords {
        assert_eq!(classify(text.as_bytes()), kind, "{text}");
        assert_eq!(kind.describe(), text);
    }
}

#[test]
fn prefixes_and_extensions_are_identifiers() {
    for text in ["i", "in", "integer", "d", "dou", "doubles", "nul", "nullp", "u", "us", "x", "_", "Int"] {
        assert_eq!(classify(text.as_bytes()), TokenKind::Ident, "{text}");
    }
}
