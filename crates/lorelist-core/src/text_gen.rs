//! Placeholder text generation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;

/// Produces `count` opaque text blocks.
pub trait TextGenerator {
    fn generate(&mut self, count: NonZeroUsize) -> Vec<String>;
}

const LOREM_OPENING: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Seeded lorem-ipsum generator.
///
/// Each block holds 1–3 paragraphs separated by a blank line.
#[derive(Clone, Debug)]
pub struct LoremGenerator {
    rng: SmallRng,
    start_with_lorem_ipsum: bool,
    paragraphs: (usize, usize),
    sentences: (usize, usize),
    words: (usize, usize),
}

impl LoremGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            start_with_lorem_ipsum: true,
            paragraphs: (1, 3),
            sentences: (3, 6),
            words: (5, 12),
        }
    }

    pub fn with_start_with_lorem_ipsum(mut self, enabled: bool) -> Self {
        self.start_with_lorem_ipsum = enabled;
        self
    }

    /// Inclusive bounds on paragraphs per block. `min` is raised to 1.
    pub fn with_paragraphs(mut self, min: usize, max: usize) -> Self {
        let min = min.max(1);
        self.paragraphs = (min, max.max(min));
        self
    }

    fn block(&mut self) -> String {
        let count = self.rng.gen_range(self.paragraphs.0..=self.paragraphs.1);
        let paragraphs: Vec<String> = (0..count)
            .map(|i| self.paragraph(i == 0 && self.start_with_lorem_ipsum))
            .collect();
        paragraphs.join("\n\n")
    }

    fn paragraph(&mut self, lorem_opening: bool) -> String {
        let count = self.rng.gen_range(self.sentences.0..=self.sentences.1);
        let mut sentences = Vec::with_capacity(count + 1);
        if lorem_opening {
            sentences.push(LOREM_OPENING.to_string());
        }
        for _ in 0..count {
            sentences.push(self.sentence());
        }
        sentences.join(" ")
    }

    fn sentence(&mut self) -> String {
        let count = self.rng.gen_range(self.words.0..=self.words.1);
        let mut sentence = String::new();
        for i in 0..count {
            let word = WORDS[self.rng.gen_range(0..WORDS.len())];
            if i == 0 {
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    sentence.extend(first.to_uppercase());
                    sentence.push_str(chars.as_str());
                }
            } else {
                sentence.push(' ');
                sentence.push_str(word);
            }
        }
        sentence.push('.');
        sentence
    }
}

impl TextGenerator for LoremGenerator {
    fn generate(&mut self, count: NonZeroUsize) -> Vec<String> {
        (0..count.get()).map(|_| self.block()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(count: usize) -> NonZeroUsize {
        NonZeroUsize::new(count).unwrap()
    }

    #[test]
    fn generates_requested_count() {
        let mut generator = LoremGenerator::new(7);
        assert_eq!(generator.generate(n(5)).len(), 5);
    }

    #[test]
    fn blocks_have_one_to_three_paragraphs() {
        let mut generator = LoremGenerator::new(42);
        for block in generator.generate(n(200)) {
            let paragraphs = block.split("\n\n").count();
            assert!((1..=3).contains(&paragraphs), "{paragraphs} paragraphs");
        }
    }

    #[test]
    fn blocks_open_with_lorem_ipsum_by_default() {
        let mut generator = LoremGenerator::new(1);
        for block in generator.generate(n(10)) {
            assert!(block.starts_with("Lorem ipsum dolor sit amet"));
        }
    }

    #[test]
    fn opening_can_be_disabled() {
        let mut generator = LoremGenerator::new(1).with_start_with_lorem_ipsum(false);
        let blocks = generator.generate(n(20));
        assert!(blocks.iter().all(|b| !b.starts_with(LOREM_OPENING)));
        assert!(blocks.iter().all(|b| b.ends_with('.')));
    }

    #[test]
    fn same_seed_same_text() {
        let a = LoremGenerator::new(99).generate(n(3));
        let b = LoremGenerator::new(99).generate(n(3));
        assert_eq!(a, b);
    }

    #[test]
    fn paragraph_bounds_are_respected() {
        let mut generator = LoremGenerator::new(3).with_paragraphs(2, 2);
        for block in generator.generate(n(20)) {
            assert_eq!(block.split("\n\n").count(), 2);
        }
    }
}
