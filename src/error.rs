use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The tagset string contains no tag.
    #[error("empty tagset")]
    EmptyTagset,
    #[error("empty lexicon")]
    EmptyLexicon,
    #[error("tag `{0}` appears more than once in the tagset")]
    DuplicateTag(String),
    /// A lexicon entry references a tag outside of the tagset.
    #[error("word `{word}` is assigned tag `{tag}` which is not in the tagset")]
    UnknownTag { word: String, tag: String },
    #[error("word `{0}` has no admissible tag")]
    NoCategories(String),
    /// No word with a non-zero corpus frequency can realize this tag, so its
    /// emission column has no mass to normalize.
    #[error("tag `{0}` is not reachable by any word seen in the corpus")]
    UnreachableTag(String),
    /// Matrices whose shapes do not fit each other or the alphabets they
    /// are used with.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("invalid perturbation bound: {0}")]
    InvalidBound(f64),
    #[error("unknown token: `{0}`")]
    UnknownToken(String),
    #[error("no admissible tag sequence for the input")]
    NoPath,
    #[error("invalid line: {0}")]
    InvalidLine(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error stems from the tagger configuration rather than from
    /// the sentence being tagged.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyTagset
                | Self::EmptyLexicon
                | Self::DuplicateTag(_)
                | Self::UnknownTag { .. }
                | Self::NoCategories(_)
                | Self::UnreachableTag(_)
                | Self::InvalidBound(_)
                | Self::DimensionMismatch(_)
        )
    }
}
