use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::TaggerConfig,
    error::{Error, Result},
    hmm::{Estimator, Hmm, Likelihood},
    lexicon::{Lexicon, Tagset},
};

pub trait Tagger {
    /// Assigns one tag to each token.
    fn tag_tokens(&self, tokens: &[&str]) -> Result<Vec<String>>;
}

/// Part-of-speech tagger backed by an HMM estimated per request.
///
/// The tagger only holds immutable configuration, so it can be shared between
/// threads; every call estimates its own matrices.
#[derive(Debug, Clone)]
pub struct PosTagger {
    tagset: Tagset,
    lexicon: Lexicon,
    corpus: String,
    bound: f64,
    likelihood: Likelihood,
    seed: Option<u64>,
}

impl PosTagger {
    /// Validates `config` and builds a tagger from it.
    ///
    /// Configuration errors, including tags that no word of the corpus can
    /// realize, are reported here rather than on the first request.
    pub fn new(config: &TaggerConfig) -> Result<Self> {
        let tagset = Tagset::parse(&config.tagset)?;
        let lexicon = Lexicon::new(&config.lexicon, &tagset)?;
        if !(config.bound.is_finite() && config.bound > 0.0) {
            return Err(Error::InvalidBound(config.bound));
        }
        Estimator::new(&lexicon, &tagset, &config.corpus).emission_matrix()?;
        log::info!(
            "tagger ready (tags: {}, words: {}, bound: {}, likelihood: {:?})",
            tagset.len(),
            lexicon.len(),
            config.bound,
            config.likelihood
        );
        Ok(Self {
            tagset,
            lexicon,
            corpus: config.corpus.clone(),
            bound: config.bound,
            likelihood: config.likelihood,
            seed: config.seed,
        })
    }

    pub fn tagset(&self) -> &Tagset {
        &self.tagset
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Estimates a model, drawing transition perturbations from `rng`.
    pub fn model<R>(&self, rng: &mut R) -> Result<Hmm<'_>>
    where
        R: Rng + ?Sized,
    {
        Hmm::estimate(
            &self.lexicon,
            &self.tagset,
            &self.corpus,
            self.bound,
            self.likelihood,
            rng,
        )
    }

    /// Tags a whitespace-separated sentence and returns it as `word:tag`
    /// pairs separated by single spaces.
    pub fn tag(&self, sentence: &str) -> Result<String> {
        self.tag_with_rng(sentence, &mut self.rng())
    }

    pub fn tag_with_rng<R>(&self, sentence: &str, rng: &mut R) -> Result<String>
    where
        R: Rng + ?Sized,
    {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        let tags = self.model(rng)?.tags(&tokens)?;
        let annotated: Vec<String> = tokens
            .iter()
            .zip(tags)
            .map(|(word, tag)| format!("{word}:{tag}"))
            .collect();
        Ok(annotated.join(" "))
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Tagger for PosTagger {
    fn tag_tokens(&self, tokens: &[&str]) -> Result<Vec<String>> {
        let model = self.model(&mut self.rng())?;
        Ok(model.tags(tokens)?.into_iter().map(String::from).collect())
    }
}
