use crate::model::WordSize;

pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Measurement collaborator: the pixel box a word needs at a font size.
///
/// Implementations must be synchronous and return the same size for the
/// same `(word, font_size)` pair, otherwise placement is not reproducible.
pub trait Measure {
    fn measure(&self, word: &str, font_size: f64) -> WordSize;
}

impl<F> Measure for F
where
    F: Fn(&str, f64) -> WordSize,
{
    fn measure(&self, word: &str, font_size: f64) -> WordSize {
        self(word, font_size)
    }
}

/// Returns the same box for every word. Mostly useful in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedMeasurer(pub WordSize);

impl Measure for FixedMeasurer {
    fn measure(&self, _word: &str, _font_size: f64) -> WordSize {
        self.0
    }
}

/// Font-free estimate from per-character advance factors.
#[derive(Debug, Clone, Copy)]
pub struct CharWidthMeasurer {
    pub line_height: f64,
    pub padding: f64,
}

impl Default for CharWidthMeasurer {
    fn default() -> Self {
        Self {
            line_height: DEFAULT_LINE_HEIGHT,
            padding: 0.0,
        }
    }
}

impl Measure for CharWidthMeasurer {
    fn measure(&self, word: &str, font_size: f64) -> WordSize {
        padded_size(
            estimate_text_width(word, font_size),
            font_size,
            self.line_height,
            self.padding,
        )
    }
}

pub(crate) fn padded_size(width: f64, font_size: f64, line_height: f64, padding: f64) -> WordSize {
    WordSize::new(
        width + 2.0 * padding,
        font_size * line_height + 2.0 * padding,
    )
}

pub(crate) fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(char_width_factor).sum::<f64>() * font_size
}

pub(crate) fn char_width_factor(ch: char) -> f64 {
    // Advance widths as a fraction of the em for a sans-serif stack.
    match ch {
        ' ' => 0.306,
        '_' => 0.500,
        '\\' | '.' | ',' | ':' | ';' | '|' | '!' | '(' | ')' | '[' | ']' | '{' | '}' => 0.321,
        '\'' => 0.191,
        'A' => 0.652,
        'B' => 0.648,
        'C' => 0.734,
        'D' => 0.723,
        'E' => 0.594,
        'F' => 0.575,
        'G' | 'H' => 0.742,
        'I' => 0.272,
        'J' => 0.557,
        'K' => 0.648,
        'L' => 0.559,
        'M' => 0.903,
        'N' => 0.763,
        'O' => 0.754,
        'P' => 0.623,
        'Q' => 0.755,
        'R' => 0.637,
        'S' => 0.633,
        'T' => 0.599,
        'U' => 0.746,
        'V' => 0.661,
        'W' => 0.958,
        'X' => 0.655,
        'Y' => 0.646,
        'Z' => 0.621,
        'a' => 0.550,
        'b' => 0.603,
        'c' => 0.547,
        'd' => 0.609,
        'e' => 0.570,
        'f' => 0.340,
        'g' | 'h' => 0.600,
        'i' => 0.235,
        'j' => 0.227,
        'k' => 0.522,
        'l' => 0.239,
        'm' => 0.867,
        'n' => 0.585,
        'o' => 0.574,
        'p' => 0.595,
        'q' => 0.585,
        'r' => 0.364,
        's' => 0.523,
        't' => 0.305,
        'u' => 0.585,
        'v' => 0.545,
        'w' => 0.811,
        'x' => 0.538,
        'y' => 0.556,
        'z' => 0.550,
        '0' => 0.613,
        '1' => 0.396,
        '2' => 0.609,
        '3' => 0.597,
        '4' => 0.614,
        '5' => 0.586,
        '6' => 0.608,
        '7' => 0.559,
        '8' => 0.611,
        '9' => 0.595,
        '@' | '#' | '%' | '&' => 0.946,
        _ => 0.568,
    }
}
