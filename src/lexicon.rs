use std::str::FromStr;

use crate::{
    error::{Error, Result},
    quark::{Quark, StringTable},
};

/// The hidden alphabet: an ordered list of distinct tag symbols.
///
/// The last tag is the boundary tag, the one assigned to the sentinel that
/// opens every observation.
#[derive(Debug, Clone)]
pub struct Tagset {
    tags: Quark,
}

impl Tagset {
    pub fn parse(s: &str) -> Result<Self> {
        let mut tags = Quark::default();
        for tag in s.split_whitespace() {
            if tags.insert(tag).is_none() {
                return Err(Error::DuplicateTag(tag.to_string()));
            }
        }
        if tags.is_empty() {
            return Err(Error::EmptyTagset);
        }
        Ok(Self { tags })
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn id(&self, tag: &str) -> Option<usize> {
        self.tags.to_id(tag)
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.tags.to_str(id)
    }
}

impl FromStr for Tagset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Words with the tags they may realize.
///
/// Entries keep the order they were supplied in; that order fixes the rows of
/// the emission matrix.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: Quark,
    categories: Vec<Vec<usize>>,
}

impl Lexicon {
    /// Builds a lexicon from `(word, categories)` pairs, where categories is a
    /// comma-separated list of tags from `tagset`. A repeated word replaces
    /// the categories of its earlier entry.
    pub fn new<I, W, C>(entries: I, tagset: &Tagset) -> Result<Self>
    where
        I: IntoIterator<Item = (W, C)>,
        W: AsRef<str>,
        C: AsRef<str>,
    {
        let mut words = Quark::default();
        let mut categories = Vec::new();
        for (word, cats) in entries {
            let word = word.as_ref();
            let tags = parse_categories(word, cats.as_ref(), tagset)?;
            let id = words.find_or_insert(word);
            if id == categories.len() {
                categories.push(tags);
            } else {
                categories[id] = tags;
            }
        }
        if words.is_empty() {
            return Err(Error::EmptyLexicon);
        }
        Ok(Self { words, categories })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.to_id(word).is_some()
    }

    pub fn id(&self, word: &str) -> Option<usize> {
        self.words.to_id(word)
    }

    /// Tag ids admissible for the word with id `word`.
    pub fn categories(&self, word: usize) -> &[usize] {
        &self.categories[word]
    }

    pub fn words(&self) -> &Quark {
        &self.words
    }
}

fn parse_categories(word: &str, cats: &str, tagset: &Tagset) -> Result<Vec<usize>> {
    let mut tags = Vec::new();
    for tag in cats.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let id = tagset.id(tag).ok_or_else(|| Error::UnknownTag {
            word: word.to_string(),
            tag: tag.to_string(),
        })?;
        if !tags.contains(&id) {
            tags.push(id);
        }
    }
    if tags.is_empty() {
        return Err(Error::NoCategories(word.to_string()));
    }
    Ok(tags)
}
