use bitflags::bitflags;
use regex::Regex;
use std::borrow::Cow;

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct NormalizeFlags: u8 {
        const NONE = 0b00;
        /// Trim, collapse whitespace runs to one space and lowercase.
        const IGNORE_SPACES_CASE = 0b01;
        /// Whitespace-only lines compare equal to empty lines.
        const IGNORE_BLANK = 0b10;
    }
}

/// Engine-side comparison options.
///
/// The strip pattern is an already validated `Regex`; turning a user string
/// into one is the caller's job (see `areas::pattern`).
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub flags: NormalizeFlags,
    pub pattern: Option<Regex>,
}

impl DiffOptions {
    pub fn new(flags: NormalizeFlags, pattern: Option<Regex>) -> Self {
        Self { flags, pattern }
    }

    pub fn normalizer(&self) -> Normalizer<'_> {
        Normalizer::new(self)
    }
}

/// Maps a raw line to the key used for equality comparison.
///
/// Transformations run in a fixed order: pattern strip (plus trailing
/// whitespace trim), then space/case folding, then blank folding.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'o> {
    options: &'o DiffOptions,
}

impl<'o> Normalizer<'o> {
    pub fn new(options: &'o DiffOptions) -> Self {
        Self { options }
    }

    pub fn key<'l>(&self, line: &'l str) -> Cow<'l, str> {
        let mut key = Cow::Borrowed(line);

        if let Some(pattern) = &self.options.pattern
            && !pattern.as_str().is_empty()
        {
            let stripped = pattern.replace_all(&key, "").trim_end().to_string();
            key = Cow::Owned(stripped);
        }

        if self.options.flags.contains(NormalizeFlags::IGNORE_SPACES_CASE) {
            let folded = key
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            key = Cow::Owned(folded);
        }

        if self.options.flags.contains(NormalizeFlags::IGNORE_BLANK) && key.trim().is_empty() {
            key = Cow::Borrowed("");
        }

        key
    }

    pub fn keys(&self, lines: &[String]) -> Vec<String> {
        lines.iter().map(|line| self.key(line).into_owned()).collect()
    }
}
