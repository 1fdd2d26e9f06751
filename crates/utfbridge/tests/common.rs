#![allow(missing_docs)]
#![allow(dead_code)]

/// Mixed-script text: long ASCII stretches, Latin-1, CJK, astral emoji and
/// combining marks.
pub const MIXED: &str = "The quick brown fox jumps over the lazy dog. \
Ça va? Größe, naïve café. Ελληνικά και Русский текст. \
日本語のテキストと中文字符。 한국어 문장. \
Emoji 😀🚀👍🏽 and math 𝔸𝔹ℂ, music 𝄞. \
e\u{301} vs é, then a long ASCII tail to exercise the wide lanes: \
0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// `MIXED` with malformed bytes spliced in, and the same text as decoded by
/// a lossy decoder.
pub fn mixed_with_garbage() -> (Vec<u8>, String) {
    let mut bytes = Vec::new();
    for (i, piece) in MIXED.split(' ').enumerate() {
        if i > 0 {
            bytes.push(b' ');
        }
        bytes.extend_from_slice(piece.as_bytes());
        match i % 4 {
            0 => bytes.push(0xFF),
            1 => bytes.extend_from_slice(b"\xE2\x82"),
            2 => bytes.extend_from_slice(b"\xED\xA0\x80"),
            _ => {}
        }
    }
    let lossy = String::from_utf8_lossy(&bytes).into_owned();
    (bytes, lossy)
}
