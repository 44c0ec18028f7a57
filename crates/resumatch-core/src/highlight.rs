//! Keyword highlighting for resume text and search evidence.

use regex::{Regex, RegexBuilder};

/// A slice of the input text, marked when it matched a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Case-insensitive, literal keyword matcher.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();

        // Longest first so "java" does not shadow "javascript"
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        let pattern = (!words.is_empty())
            .then(|| {
                let alternation = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join("|");
                RegexBuilder::new(&alternation)
                    .case_insensitive(true)
                    .build()
                    .ok()
            })
            .flatten();

        Self { pattern }
    }

    /// Keywords are the whitespace-separated words of a search query.
    pub fn from_query(query: &str) -> Self {
        Self::new(query.split_whitespace())
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Some(pattern) = &self.pattern else {
            return plain(text);
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for found in pattern.find_iter(text) {
            if found.start() > cursor {
                segments.push(Segment {
                    text: &text[cursor..found.start()],
                    matched: false,
                });
            }
            segments.push(Segment {
                text: found.as_str(),
                matched: true,
            });
            cursor = found.end();
        }
        if cursor < text.len() {
            segments.push(Segment {
                text: &text[cursor..],
                matched: false,
            });
        }
        segments
    }

    /// Render with each match wrapped in `open`/`close` markers.
    pub fn render(&self, text: &str, open: &str, close: &str) -> String {
        self.segments(text)
            .into_iter()
            .map(|segment| {
                if segment.matched {
                    format!("{open}{}{close}", segment.text)
                } else {
                    segment.text.to_string()
                }
            })
            .collect()
    }
}

fn plain(text: &str) -> Vec<Segment<'_>> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![Segment {
            text,
            matched: false,
        }]
    }
}
