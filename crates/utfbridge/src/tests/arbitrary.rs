use alloc::{boxed::Box, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{Backend, LaneWidth};

/// Bytes that sit on the edges of the well-formedness table.
const EDGE_BYTES: [u8; 16] = [
    0x7F, 0x80, 0x8F, 0x90, 0x9F, 0xA0, 0xBF, 0xC0, 0xC1, 0xC2, 0xDF, 0xE0, 0xED, 0xF0, 0xF4, 0xF5,
];

/// Units that sit on the edges of the surrogate ranges.
const EDGE_UNITS: [u16; 8] = [0x7F, 0x80, 0x7FF, 0x800, 0xD7FF, 0xD800, 0xDBFF, 0xDFFF];

/// Mostly-UTF-8 bytes: long ASCII runs, whole sequences, cut-off sequences,
/// table edge bytes and plain noise.
#[derive(Debug, Clone)]
pub(crate) struct Utf8Soup(pub Vec<u8>);

impl Arbitrary for Utf8Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() * 4 + 1);
        let mut bytes = Vec::with_capacity(len + 40);
        while bytes.len() < len {
            let mut buf = [0u8; 4];
            match u8::arbitrary(g) % 8 {
                0 | 1 => {
                    let run = 1 + usize::arbitrary(g) % 40;
                    bytes.extend((0..run).map(|_| u8::arbitrary(g) & 0x7F));
                }
                2 | 3 => {
                    let encoded = char::arbitrary(g).encode_utf8(&mut buf);
                    bytes.extend_from_slice(encoded.as_bytes());
                }
                4 => {
                    let encoded = char::arbitrary(g).encode_utf8(&mut buf).as_bytes();
                    let cut = 1 + usize::arbitrary(g) % encoded.len();
                    bytes.extend_from_slice(&encoded[..cut]);
                }
                5 | 6 => bytes.push(*g.choose(&EDGE_BYTES).expect("non-empty")),
                _ => bytes.push(u8::arbitrary(g)),
            }
        }
        Self(bytes)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

/// Mostly-UTF-16 units: ASCII runs, BMP characters, surrogate pairs and
/// unpaired halves.
#[derive(Debug, Clone)]
pub(crate) struct Utf16Soup(pub Vec<u16>);

impl Arbitrary for Utf16Soup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() * 2 + 1);
        let mut units = Vec::with_capacity(len + 40);
        while units.len() < len {
            let mut buf = [0u16; 2];
            match u8::arbitrary(g) % 6 {
                0 | 1 => {
                    let run = 1 + usize::arbitrary(g) % 40;
                    units.extend((0..run).map(|_| u16::arbitrary(g) & 0x7F));
                }
                2 | 3 => units.extend_from_slice(char::arbitrary(g).encode_utf16(&mut buf)),
                4 => units.push(*g.choose(&EDGE_UNITS).expect("non-empty")),
                _ => units.push(u16::arbitrary(g)),
            }
        }
        Self(units)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Self))
    }
}

impl Arbitrary for LaneWidth {
    fn arbitrary(g: &mut Gen) -> Self {
        const WIDTHS: [LaneWidth; 5] = [
            LaneWidth::X2,
            LaneWidth::X4,
            LaneWidth::X8,
            LaneWidth::X16,
            LaneWidth::X32,
        ];
        *g.choose(&WIDTHS).expect("non-empty")
    }
}

impl Arbitrary for Backend {
    /// Only backends the running CPU supports.
    fn arbitrary(g: &mut Gen) -> Self {
        let available: Vec<Backend> = Backend::available().collect();
        *g.choose(&available).expect("scalar is always available")
    }
}

#[test]
fn soups_hit_the_interesting_cases() {
    let mut g = Gen::new(64);
    let mut saw_invalid = false;
    let mut saw_multibyte = false;
    for _ in 0..200 {
        let Utf8Soup(bytes) = Utf8Soup::arbitrary(&mut g);
        saw_invalid |= core::str::from_utf8(&bytes).is_err();
        saw_multibyte |= bytes.iter().any(|&b| b >= 0xC2);
    }
    assert!(saw_invalid && saw_multibyte);

    let mut saw_surrogate = false;
    for _ in 0..200 {
        let Utf16Soup(units) = Utf16Soup::arbitrary(&mut g);
        saw_surrogate |= units.iter().any(|u| (0xD800..=0xDFFF).contains(u));
    }
    assert!(saw_surrogate);
}
