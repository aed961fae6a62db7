//! Approximate text metrics and word wrapping for box labels.

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Space kept between a box's edge and its label, per side.
pub const TEXT_PADDING: f64 = 5.0;

/// Marker appended to lines that had to be shortened.
pub const ELLIPSIS: char = '…';

/// Font metrics used to size and wrap labels.
///
/// Glyph widths are approximated from the font size, the same way a
/// renderer would before it has shaped the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font size in canvas units.
    pub font_size: f64,
    /// Average glyph width as a fraction of the font size.
    pub char_width_factor: f64,
    /// Line height as a multiple of the font size.
    pub line_height_factor: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            char_width_factor: 0.55,
            line_height_factor: 1.2,
        }
    }
}

impl TextStyle {
    pub fn char_width(&self) -> f64 {
        self.font_size * self.char_width_factor
    }

    pub fn line_height(&self) -> f64 {
        self.font_size * self.line_height_factor
    }

    /// Width of a single line of text.
    pub fn line_width(&self, line: &str) -> f64 {
        line.chars().count() as f64 * self.char_width()
    }

    /// Natural (unwrapped) size of `text`. Empty text still occupies one line.
    pub fn measure(&self, text: &str) -> Size {
        let lines: Vec<&str> = text.split('\n').collect();
        let width = lines
            .iter()
            .map(|line| self.line_width(line))
            .fold(0.0, f64::max);
        Size::new(width, lines.len() as f64 * self.line_height())
    }

    /// Natural size plus padding on every side.
    pub fn padded_size(&self, text: &str) -> Size {
        let natural = self.measure(text);
        Size::new(
            natural.width + 2.0 * TEXT_PADDING,
            natural.height + 2.0 * TEXT_PADDING,
        )
    }

    /// Greedy word wrap of `text` into lines no wider than `max_width`.
    ///
    /// Explicit newlines always break. Words longer than a line are split
    /// at character boundaries; every line holds at least one character.
    pub fn wrap(&self, text: &str, max_width: f64) -> Vec<String> {
        let max_chars = ((max_width / self.char_width()).floor() as usize).max(1);
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            let mut current_len = 0usize;

            for word in paragraph.split_whitespace() {
                let mut word: Vec<char> = word.chars().collect();

                let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
                if needed <= max_chars {
                    if current_len > 0 {
                        current.push(' ');
                        current_len += 1;
                    }
                    current.extend(word.iter());
                    current_len += word.len();
                    continue;
                }

                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                while word.len() > max_chars {
                    let rest = word.split_off(max_chars);
                    lines.push(word.into_iter().collect());
                    word = rest;
                }
                current_len = word.len();
                current = word.into_iter().collect();
            }

            lines.push(current);
        }

        lines
    }

    /// Shorten `line` so it fits in `max_width`, ending with an ellipsis.
    pub fn elide(&self, line: &str, max_width: f64) -> String {
        if self.line_width(line) <= max_width {
            return line.to_string();
        }
        let fit = (max_width / self.char_width()).floor() as usize;
        if fit == 0 {
            return String::new();
        }
        let mut out: String = line.chars().take(fit - 1).collect();
        out.push(ELLIPSIS);
        out
    }
}
