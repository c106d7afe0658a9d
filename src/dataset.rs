use std::io::{BufRead, BufReader, Read};

use crate::error::{Error, Result};

/// A sentence with its reference tags.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sentence {
    pub words: Vec<String>,
    pub tags: Vec<String>,
}

impl Sentence {
    pub fn push(&mut self, word: &str, tag: &str) {
        self.words.push(word.to_string());
        self.tags.push(tag.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

/// Gold-tagged sentences.
///
/// The text format has one `TAG<TAB>WORD` item per line; an empty line ends
/// a sentence.
#[derive(Debug, Default)]
pub struct Dataset {
    pub v: Vec<Sentence>,
}

impl Dataset {
    pub fn read<R: Read>(&mut self, rdr: R) -> Result<()> {
        let mut seq = Sentence::default();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            if !line.trim().is_empty() {
                match parse_line(&line) {
                    Ok((tag, word)) => seq.push(word, tag),
                    Err(e) => log::warn!("{e}"),
                }
            } else if !seq.is_empty() {
                self.v.push(std::mem::take(&mut seq));
            }
        }
        if !seq.is_empty() {
            self.v.push(seq);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.v.iter()
    }

    pub fn max_length(&self) -> usize {
        self.v.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_items(&self) -> usize {
        self.v.iter().map(|x| x.len()).sum()
    }
}

fn parse_line(line: &str) -> Result<(&str, &str)> {
    match line.split_once('\t') {
        Some((tag, word)) if !tag.trim().is_empty() && !word.trim().is_empty() => {
            Ok((tag.trim(), word.trim()))
        }
        _ => Err(Error::InvalidLine(line.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_sentences() {
        let data = "det\tthat\nvn\tfly\nperiod\t.\n\nn\tfood\n";
        let mut ds = Dataset::default();
        ds.read(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.v[0].words, vec!["that", "fly", "."]);
        assert_eq!(ds.v[0].tags, vec!["det", "vn", "period"]);
        assert_eq!(ds.v[1].words, vec!["food"]);
        assert_eq!(ds.max_length(), 3);
        assert_eq!(ds.total_items(), 4);
    }

    #[test]
    fn invalid_lines_are_skipped() {
        let data = "det\tthat\nfly\n\tfood\nperiod\t.\n\n\n";
        let mut ds = Dataset::default();
        ds.read(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.v[0].words, vec!["that", "."]);
    }

    #[test]
    fn empty_input() {
        let mut ds = Dataset::default();
        ds.read(&b""[..]).unwrap();
        assert!(ds.is_empty());
        assert_eq!(ds.max_length(), 0);
    }
}
