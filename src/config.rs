use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    hmm::{Likelihood, DEFAULT_BOUND},
};

/// Everything a tagger needs besides the sentence to tag.
///
/// ```json
/// {
///   "lexicon": { "fly": "vn", "that": "det,rp", ".": "period" },
///   "tagset": "det rp vn period",
///   "corpus": "that fly. that, that fly.",
///   "bound": 0.01,
///   "likelihood": "normalized",
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggerConfig {
    /// Word to comma-separated admissible tags.
    pub lexicon: BTreeMap<String, String>,
    /// Whitespace-separated tags; the last one is the boundary tag.
    pub tagset: String,
    /// Untagged training text.
    pub corpus: String,
    #[serde(default = "default_bound")]
    pub bound: f64,
    #[serde(default)]
    pub likelihood: Likelihood,
    /// Seed for the transition perturbations. Unseeded taggers draw fresh
    /// entropy for every request.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_bound() -> f64 {
    DEFAULT_BOUND
}

impl TaggerConfig {
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        Ok(serde_json::from_reader(rdr)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("reading configuration from {}", path.display());
        Self::from_reader(File::open(path)?)
    }

    /// A toy configuration: words that may be verbs or nouns share the
    /// category `vn`, and `period` marks clause boundaries.
    pub fn sample() -> Self {
        let lexicon = [
            ("fly", "vn"),
            ("layers", "vn"),
            ("sneaks", "v"),
            ("food", "n"),
            ("that", "det,rp"),
            (".", "period"),
        ]
        .into_iter()
        .map(|(w, c)| (w.to_string(), c.to_string()))
        .collect();
        Self {
            lexicon,
            tagset: "det rp vn v n period".to_string(),
            corpus: "that fly layers. that fly sneaks. that, that sneaks food layers. that fly layers that food. layers.".to_string(),
            bound: DEFAULT_BOUND,
            likelihood: Likelihood::Normalized,
            seed: None,
        }
    }
}
