//! Letter feature encoding for the four-letter word model.
//!
//! Each letter is drawn from 14 line segments (the Rumelhart & McClelland
//! font). A position's input is two 14-vectors: which segments are visibly
//! present and which are visibly absent. A fully visible letter has
//! `absent = 1 - present`; a partially occluded one has both zero for the
//! hidden segments.

use ndarray::{Array1, Array2};

/// Segments per letter.
pub const N_FEATURES: usize = 14;
/// Letters per position (a..z).
pub const N_LETTERS: usize = 26;
/// Letter positions per word.
pub const WORD_LENGTH: usize = 4;

/// Segment table, one row per letter a..z.
#[rustfmt::skip]
pub const LETTER_FEATURES: [[u8; N_FEATURES]; N_LETTERS] = [
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // a
    [1, 0, 1, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0], // b
    [1, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // c
    [1, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0, 0], // d
    [1, 1, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // e
    [1, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // f
    [1, 0, 1, 1, 1, 0, 0, 1, 0, 1, 0, 0, 0, 0], // g
    [0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // h
    [1, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0], // i
    [0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 0, 0, 0], // j
    [0, 1, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 0, 1], // k
    [0, 0, 0, 1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0], // l
    [0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 1, 0, 0], // m
    [0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 1], // n
    [1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // o
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 0], // p
    [1, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 1], // q
    [1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 0, 1], // r
    [1, 1, 1, 1, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0], // s
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 0, 0], // t
    [0, 0, 0, 1, 1, 0, 1, 1, 0, 1, 0, 0, 0, 0], // u
    [0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 0], // v
    [0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 0, 0, 1, 1], // w
    [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1], // x
    [0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0], // y
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0], // z
];

/// Index of `c` in a..z, case-insensitive.
pub fn letter_index(c: char) -> Option<usize> {
    let c = c.to_ascii_lowercase();
    c.is_ascii_lowercase().then(|| (c as u8 - b'a') as usize)
}

/// Letter at `index` in a..z.
pub fn index_letter(index: usize) -> Option<char> {
    (index < N_LETTERS).then(|| (b'a' + index as u8) as char)
}

/// Segment vector of `c`, or `None` if it is not a letter.
pub fn letter_features(c: char) -> Option<Array1<f64>> {
    let row = &LETTER_FEATURES[letter_index(c)?];
    Some(row.iter().map(|&f| f64::from(f)).collect())
}

/// Post-stimulus mask: every segment of O or X.
pub fn mask_features() -> Array1<f64> {
    let o = &LETTER_FEATURES[14];
    let x = &LETTER_FEATURES[23];
    o.iter().zip(x).map(|(&a, &b)| f64::from(a | b)).collect()
}

/// What one letter position shows on a given tick.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionInput {
    pub present: Array1<f64>,
    pub absent: Array1<f64>,
}

impl PositionInput {
    /// Fully visible segments: `absent = 1 - present`.
    pub fn from_features(present: Array1<f64>) -> Self {
        let absent = present.mapv(|f| 1.0 - f);
        Self { present, absent }
    }

    pub fn letter(c: char) -> Option<Self> {
        letter_features(c).map(Self::from_features)
    }

    /// An empty position: no segment present, every segment visibly absent.
    pub fn blank() -> Self {
        Self::from_features(Array1::zeros(N_FEATURES))
    }

    /// A partially visible letter. Hidden segments are zero in both vectors.
    pub fn ambiguous(present: Array1<f64>, absent: Array1<f64>) -> Self {
        Self { present, absent }
    }

    pub fn mask() -> Self {
        Self::from_features(mask_features())
    }
}

/// Encode `text` as four positions: lowercased, first four characters,
/// padded with blanks. Non-letters become blanks.
pub fn text_to_inputs(text: &str) -> [PositionInput; WORD_LENGTH] {
    let mut chars = text.chars();
    std::array::from_fn(|_| {
        chars
            .next()
            .and_then(PositionInput::letter)
            .unwrap_or_else(PositionInput::blank)
    })
}

fn table_weights(exc: f64, inh: f64, has_feature: impl Fn(u8) -> bool) -> Array2<f64> {
    Array2::from_shape_fn((N_FEATURES, N_LETTERS), |(j, i)| {
        if has_feature(LETTER_FEATURES[i][j]) {
            exc
        } else {
            -inh
        }
    })
}

/// Feature-present → letter weights, `(N_FEATURES, N_LETTERS)`.
///
/// `exc` where the letter contains the segment, `-inh` where it does not.
pub fn feature_letter_weights(exc: f64, inh: f64) -> Array2<f64> {
    table_weights(exc, inh, |f| f == 1)
}

/// Feature-absent → letter weights: the same mapping over the inverted table.
pub fn feature_absence_letter_weights(exc: f64, inh: f64) -> Array2<f64> {
    table_weights(exc, inh, |f| f == 0)
}
