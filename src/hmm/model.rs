use rand::Rng;

use crate::{
    error::{Error, Result},
    lexicon::{Lexicon, Tagset},
};

use super::{
    estimator::Estimator,
    matrix::Matrix,
    viterbi::{Likelihood, Viterbi},
};

/// Boundary token prepended to every observation.
pub const SENTINEL: &str = ".";

/// A hidden Markov model over a tagset (hidden alphabet) and the words of a
/// lexicon (observable alphabet).
#[derive(Debug)]
pub struct Hmm<'a> {
    tagset: &'a Tagset,
    lexicon: &'a Lexicon,
    transition: Matrix<f64>,
    emission: Matrix<f64>,
    likelihood: Likelihood,
}

impl<'a> Hmm<'a> {
    /// Estimates both matrices from `corpus`, drawing the transition
    /// perturbations from `rng`.
    pub fn estimate<R>(
        lexicon: &'a Lexicon,
        tagset: &'a Tagset,
        corpus: &str,
        bound: f64,
        likelihood: Likelihood,
        rng: &mut R,
    ) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let estimator = Estimator::new(lexicon, tagset, corpus);
        let transition = estimator.transition_matrix(bound, rng)?;
        let emission = estimator.emission_matrix()?;
        Self::from_matrices(lexicon, tagset, transition, emission, likelihood)
    }

    /// Wraps precomputed matrices. `transition` is |tagset| x |tagset| and
    /// `emission` is |lexicon| x |tagset|.
    pub fn from_matrices(
        lexicon: &'a Lexicon,
        tagset: &'a Tagset,
        transition: Matrix<f64>,
        emission: Matrix<f64>,
        likelihood: Likelihood,
    ) -> Result<Self> {
        let n = tagset.len();
        if transition.rows() != n || transition.cols() != n {
            return Err(Error::DimensionMismatch(format!(
                "transition matrix is {}x{} for {} tags",
                transition.rows(),
                transition.cols(),
                n
            )));
        }
        if emission.rows() != lexicon.len() || emission.cols() != n {
            return Err(Error::DimensionMismatch(format!(
                "emission matrix is {}x{} for {} words and {} tags",
                emission.rows(),
                emission.cols(),
                lexicon.len(),
                n
            )));
        }
        Ok(Self {
            tagset,
            lexicon,
            transition,
            emission,
            likelihood,
        })
    }

    /// Tag ids of the most probable path for `tokens`, one per token.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<usize>> {
        let observation: Vec<&str> = std::iter::once(SENTINEL)
            .chain(tokens.iter().map(AsRef::as_ref))
            .collect();
        let mut viterbi = Viterbi::new(&self.transition, &self.emission, self.likelihood)?;
        viterbi.decode(self.lexicon.words(), &observation)
    }

    /// Tag names of the most probable path for `tokens`.
    pub fn tags<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<&'a str>> {
        self.decode(tokens)?
            .into_iter()
            .map(|id| self.tagset.name(id).ok_or(Error::NoPath))
            .collect()
    }

    /// The most probable tag sequence for a whitespace-separated sentence,
    /// rendered as space-separated tags.
    pub fn most_probable_sequence(&self, sentence: &str) -> Result<String> {
        let tokens: Vec<&str> = sentence.split_whitespace().collect();
        Ok(self.tags(&tokens)?.join(" "))
    }
}
