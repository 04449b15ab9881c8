use thiserror::Error;
use translit_plugin::traits::Transliterator;
use translit_plugin::types::Suggestion;

#[derive(Debug, Clone, Default)]
pub struct MockLanguage {
    pub entries: Vec<(String, String)>,
    /// Return every prefix match regardless of the requested limit.
    pub ignore_limit: bool,
}

impl MockLanguage {
    pub fn tamil() -> Self {
        let entries = [
            ("vanakkam", "வணக்கம்"),
            ("vaanam", "வானம்"),
            ("vanam", "வனம்"),
            ("vandi", "வண்டி"),
            ("nandri", "நன்றி"),
            ("naan", "நான்"),
            ("amma", "அம்மா"),
            ("tamil", "தமிழ்"),
        ];
        Self {
            entries: entries
                .iter()
                .map(|(i, o)| (i.to_string(), o.to_string()))
                .collect(),
            ignore_limit: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockEngineError {
    #[error("language has no dictionary entries")]
    EmptyDictionary,
}

/// Dictionary engine: whole-word lookups, prefix suggestions.
#[derive(Debug, Clone)]
pub struct MockEngine {
    entries: Vec<(String, String)>,
    ignore_limit: bool,
}

pub fn is_tamil(c: char) -> bool {
    ('\u{0B80}'..='\u{0BFF}').contains(&c)
}

impl MockEngine {
    fn lookup(&self, word: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(input, _)| input == word)
            .map(|(_, output)| output.as_str())
    }
}

impl Transliterator for MockEngine {
    type Config = MockLanguage;
    type Error = MockEngineError;

    fn from_config(config: &MockLanguage) -> Result<Self, MockEngineError> {
        if config.entries.is_empty() {
            return Err(MockEngineError::EmptyDictionary);
        }
        let mut entries = config.entries.clone();
        entries.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));
        Ok(Self {
            entries,
            ignore_limit: config.ignore_limit,
        })
    }

    fn transliterate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word = String::new();
        let flush = |word: &mut String, out: &mut String| {
            let w = word.as_str();
            out.push_str(self.lookup(w).unwrap_or(w));
            word.clear();
        };
        for c in text.chars() {
            if c.is_whitespace() {
                flush(&mut word, &mut out);
                out.push(c);
            } else {
                word.push(c);
            }
        }
        flush(&mut word, &mut out);
        out
    }

    fn suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let matches = self
            .entries
            .iter()
            .filter(|(input, _)| input.starts_with(query))
            .map(|(input, output)| Suggestion::new(input.as_str(), output.as_str()));
        if self.ignore_limit {
            matches.collect()
        } else {
            matches.take(limit).collect()
        }
    }

    fn contains_target_script(&self, text: &str) -> bool {
        text.chars().any(is_tamil)
    }
}
