use std::{collections::HashMap, fmt};

use crate::lexicon::Lexicon;

/// Characters separating corpus tokens. Each of them is also a token.
pub const DELIMITERS: &[char] = &[' ', '\t', '\n', '.', ','];

/// Iterator over the tokens of a corpus, delimiters included.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let end = match self.rest.find(DELIMITERS) {
            Some(0) => self.rest.chars().next().map_or(1, char::len_utf8),
            Some(pos) => pos,
            None => self.rest.len(),
        };
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

pub fn tokenize(corpus: &str) -> Tokens<'_> {
    Tokens { rest: corpus }
}

/// Occurrence counts of lexicon words in a corpus.
///
/// Words that never occur are absent and count as zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Frequencies {
    counts: HashMap<String, usize>,
}

impl Frequencies {
    pub fn get(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or_default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(w, &n)| (w.as_str(), n))
    }
}

impl fmt::Display for Frequencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable();
        for (word, n) in entries {
            writeln!(f, "{word}: {n}")?;
        }
        Ok(())
    }
}

/// Counts how often each lexicon word occurs in `corpus`.
pub fn count_lexems(corpus: &str, lexicon: &Lexicon) -> Frequencies {
    let mut counts = HashMap::new();
    for token in tokenize(corpus).filter(|t| lexicon.contains(t)) {
        *counts.entry(token.to_string()).or_default() += 1;
    }
    Frequencies { counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Tagset;

    fn lexicon(words: &[&str]) -> Lexicon {
        let tagset = Tagset::parse("x").unwrap();
        Lexicon::new(words.iter().map(|w| (*w, "x")), &tagset).unwrap()
    }

    #[test]
    fn tokens_include_delimiters() {
        let tokens: Vec<_> = tokenize("that fly layers. that,\tfood").collect();
        assert_eq!(
            tokens,
            vec!["that", " ", "fly", " ", "layers", ".", " ", "that", ",", "\t", "food"]
        );
    }

    #[test]
    fn tokens_of_empty_corpus() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn count_exact_matches() {
        let freq = count_lexems("a b a", &lexicon(&["a", "b"]));
        assert_eq!(freq.get("a"), 2);
        assert_eq!(freq.get("b"), 1);
        assert_eq!(freq.len(), 2);
    }

    #[test]
    fn only_lexicon_words_are_counted() {
        let freq = count_lexems("ab a b c", &lexicon(&["a", "b"]));
        assert!(freq.iter().all(|(w, _)| w == "a" || w == "b"));
        assert_eq!(freq.get("a"), 1);
        assert!(!freq.contains("ab"));
    }

    #[test]
    fn delimiters_can_be_lexicon_words() {
        let freq = count_lexems("that fly. layers.", &lexicon(&[".", "fly"]));
        assert_eq!(freq.get("."), 2);
        assert_eq!(freq.get("fly"), 1);
    }

    #[test]
    fn unseen_words_are_absent() {
        let freq = count_lexems("a a", &lexicon(&["a", "b"]));
        assert!(!freq.contains("b"));
        assert_eq!(freq.get("b"), 0);
    }

    #[test]
    fn empty_corpus() {
        assert!(count_lexems("", &lexicon(&["a"])).is_empty());
    }

    #[test]
    fn display_is_sorted() {
        let freq = count_lexems("b a b", &lexicon(&["a", "b"]));
        assert_eq!(freq.to_string(), "a: 1\nb: 2\n");
    }
}
