// Stand-in terms for demos that must not show real search queries.
// The mapping is owned by the caller; nothing here is global.

use std::collections::HashMap;
use thiserror::Error;

use crate::model::Tag;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("no unused alias for {term:?} after {attempts} attempts")]
    Exhausted { term: String, attempts: usize },

    #[error("alias table is full ({capacity} entries)")]
    Full { capacity: usize },
}

/// Produces candidate aliases. `attempt` counts retries for the same term.
pub trait AliasGenerator {
    fn candidate(&mut self, term: &str, attempt: usize) -> String;
}

impl<F> AliasGenerator for F
where
    F: FnMut(&str, usize) -> String,
{
    fn candidate(&mut self, term: &str, attempt: usize) -> String {
        self(term, attempt)
    }
}

/// Cycles through a fixed word list, skipping ahead on retries.
#[derive(Debug, Clone)]
pub struct WordListGenerator {
    words: Vec<String>,
    next: usize,
}

impl WordListGenerator {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl AliasGenerator for WordListGenerator {
    fn candidate(&mut self, _term: &str, attempt: usize) -> String {
        if self.words.is_empty() {
            return String::new();
        }
        let idx = self.next % self.words.len();
        self.next += 1;
        if attempt == 0 {
            self.words[idx].clone()
        } else {
            format!("{}_{}", self.words[idx], attempt)
        }
    }
}

/// Bidirectional real ↔ alias mapping with a capacity bound.
#[derive(Debug, Clone)]
pub struct AliasTable<G> {
    generator: G,
    max_attempts: usize,
    capacity: usize,
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl<G: AliasGenerator> AliasTable<G> {
    pub fn new(generator: G, max_attempts: usize, capacity: usize) -> Self {
        Self {
            generator,
            max_attempts: max_attempts.max(1),
            capacity,
            forward: HashMap::new(),
            reverse: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Alias for `term`, allocating one on first use.
    pub fn alias(&mut self, term: &str) -> Result<String, AliasError> {
        if let Some(existing) = self.forward.get(term) {
            return Ok(existing.clone());
        }
        if self.forward.len() >= self.capacity {
            return Err(AliasError::Full {
                capacity: self.capacity,
            });
        }
        for attempt in 0..self.max_attempts {
            let candidate = self.generator.candidate(term, attempt);
            if candidate.is_empty()
                || self.reverse.contains_key(&candidate)
                || self.forward.contains_key(&candidate)
            {
                continue;
            }
            self.forward.insert(term.to_string(), candidate.clone());
            self.reverse.insert(candidate.clone(), term.to_string());
            return Ok(candidate);
        }
        Err(AliasError::Exhausted {
            term: term.to_string(),
            attempts: self.max_attempts,
        })
    }

    pub fn real_term(&self, alias: &str) -> Option<&str> {
        self.reverse.get(alias).map(String::as_str)
    }

    /// Replace every tag's text with its alias, keeping counts.
    pub fn mask_tags(&mut self, tags: &[Tag]) -> Result<Vec<Tag>, AliasError> {
        tags.iter()
            .map(|tag| -> Result<Tag, AliasError> {
                Ok(Tag::new(self.alias(&tag.text)?, tag.count))
            })
            .collect()
    }
}
