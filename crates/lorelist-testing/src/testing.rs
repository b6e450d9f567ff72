//! Test doubles for the application's external capabilities.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use lorelist_core::TextGenerator;

/// Installs `env_logger` for tests; repeated calls are harmless.
///
/// Honors `RUST_LOG`, defaulting to `warn`.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .is_test(true)
        .try_init();
}

/// Text generator that hands out queued texts first, then numbered ones.
///
/// Numbered texts get `n % 3` extra paragraphs so rows differ in height.
#[derive(Clone, Debug, Default)]
pub struct ScriptedGenerator {
    queued: VecDeque<String>,
    next: usize,
}

impl ScriptedGenerator {
    pub fn new<I, T>(texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            queued: texts.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }

    pub fn numbered() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>) {
        self.queued.push_back(text.into());
    }

    fn numbered_text(&mut self) -> String {
        let n = self.next;
        self.next += 1;
        let mut text = format!("item {n}");
        for _ in 0..n % 3 {
            text.push_str("\n\nmore text for a taller row");
        }
        text
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&mut self, count: NonZeroUsize) -> Vec<String> {
        (0..count.get())
            .map(|_| match self.queued.pop_front() {
                Some(text) => text,
                None => self.numbered_text(),
            })
            .collect()
    }
}

/// Stands in for the browser's layout engine when measuring a mounted row.
pub trait RowMeasurer {
    fn measure(&self, index: usize, text: &str, width: f32) -> f32;
}

impl<F> RowMeasurer for F
where
    F: Fn(usize, &str, f32) -> f32,
{
    fn measure(&self, index: usize, text: &str, width: f32) -> f32 {
        self(index, text, width)
    }
}

/// Every row measures the same.
#[derive(Clone, Copy, Debug)]
pub struct FixedHeight(pub f32);

impl RowMeasurer for FixedHeight {
    fn measure(&self, _index: usize, _text: &str, _width: f32) -> f32 {
        self.0
    }
}

/// Monospace line-wrapping estimate of a row's rendered height.
#[derive(Clone, Copy, Debug)]
pub struct TextMeasurer {
    pub line_height: f32,
    pub char_width: f32,
    pub horizontal_padding: f32,
    /// Padding plus the index label line.
    pub vertical_chrome: f32,
}

impl Default for TextMeasurer {
    fn default() -> Self {
        Self {
            line_height: 20.0,
            char_width: 8.0,
            horizontal_padding: 56.0,
            vertical_chrome: 48.0,
        }
    }
}

impl RowMeasurer for TextMeasurer {
    fn measure(&self, _index: usize, text: &str, width: f32) -> f32 {
        let usable = (width - self.horizontal_padding).max(self.char_width);
        let per_line = (usable / self.char_width).floor().max(1.0) as usize;
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum();
        self.vertical_chrome + lines as f32 * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queued_texts_come_first() {
        let mut generator = ScriptedGenerator::new(["A", "B"]);
        let texts = generator.generate(NonZeroUsize::new(3).unwrap());
        assert_eq!(texts, ["A", "B", "item 0"]);
    }

    #[test]
    fn numbered_texts_vary_in_length() {
        let mut generator = ScriptedGenerator::numbered();
        let texts = generator.generate(NonZeroUsize::new(3).unwrap());
        assert_eq!(texts[0], "item 0");
        assert_eq!(texts[2].matches("\n\n").count(), 2);
    }

    #[test]
    fn text_measurer_wraps_long_lines() {
        let measurer = TextMeasurer::default();
        let short = measurer.measure(0, "short", 300.0);
        let long = measurer.measure(0, &"x".repeat(200), 300.0);
        let paragraphs = measurer.measure(0, "a\n\nb", 300.0);
        assert_eq!(short, 68.0);
        assert!(long > short);
        assert_eq!(paragraphs, 48.0 + 3.0 * 20.0);
    }
}
