//! Using the transliteration engine outside of an editor.

use crate::traits::Transliterator;
use crate::types::Suggestion;

/// An engine wrapped with the same conventions the editor plugin applies.
#[derive(Debug, Clone)]
pub struct StandaloneTransliterator<E> {
    engine: E,
}

/// Builds an engine from `config` for use without an editor.
pub fn create_transliterator<E: Transliterator>(
    config: &E::Config,
) -> Result<StandaloneTransliterator<E>, E::Error> {
    Ok(StandaloneTransliterator::new(E::from_config(config)?))
}

impl<E: Transliterator> StandaloneTransliterator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// At most `limit` ranked suggestions for `query`.
    pub fn get_suggestions(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        if limit == 0 {
            return Vec::new();
        }
        let mut list = self.engine.suggestions(query, limit);
        list.truncate(limit);
        list
    }

    pub fn transliterate(&self, text: &str) -> String {
        self.engine.transliterate(text)
    }

    pub fn contains_target_script(&self, text: &str) -> bool {
        self.engine.contains_target_script(text)
    }
}
