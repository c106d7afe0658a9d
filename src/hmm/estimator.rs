use rand::Rng;

use crate::{
    error::{Error, Result},
    lexicon::{Lexicon, Tagset},
    quark::StringTable,
};

use super::{
    frequency::{count_lexems, Frequencies},
    matrix::Matrix,
};

/// Default bound on how far a transition probability may drift from the
/// uniform prior.
pub const DEFAULT_BOUND: f64 = 0.01;

/// Estimates the emission matrix B and the transition matrix A of a tagger
/// from a lexicon and an untagged corpus.
#[derive(Debug)]
pub struct Estimator<'a> {
    lexicon: &'a Lexicon,
    tagset: &'a Tagset,
    freq: Frequencies,
}

impl<'a> Estimator<'a> {
    pub fn new(lexicon: &'a Lexicon, tagset: &'a Tagset, corpus: &str) -> Self {
        let freq = count_lexems(corpus, lexicon);
        log::debug!("frequencies:\n{freq}");
        Self {
            lexicon,
            tagset,
            freq,
        }
    }

    pub fn frequencies(&self) -> &Frequencies {
        &self.freq
    }

    /// Word-tag matrix B (|lexicon| x |tagset|).
    ///
    /// A word spreads its mass evenly over its admissible tags; the mass is
    /// weighted by the word's corpus frequency and every tag column is then
    /// scaled to sum to one.
    pub fn emission_matrix(&self) -> Result<Matrix<f64>> {
        let words = self.lexicon.words();
        let mut b = Matrix::new(self.lexicon.len(), self.tagset.len(), 0.0);
        for j in 0..b.rows() {
            let cats = self.lexicon.categories(j);
            let freq = words.to_str(j).map_or(0, |w| self.freq.get(w)) as f64;
            let share = 1.0 / cats.len() as f64;
            for &k in cats {
                b[(j, k)] = share * freq;
            }
        }
        for k in 0..b.cols() {
            let total = b.sum_col(k);
            if total <= 0.0 {
                let tag = self.tagset.name(k).unwrap_or_default();
                return Err(Error::UnreachableTag(tag.to_string()));
            }
            for j in 0..b.rows() {
                b[(j, k)] /= total;
            }
        }
        log::debug!("matrix B (word-tag):\n{b}");
        Ok(b)
    }

    /// Tag-tag matrix A (|tagset| x |tagset|), pseudo-randomly perturbed
    /// around the uniform distribution.
    ///
    /// Each row draws a perturbation in `[0, bound)` and alternately adds it
    /// to and subtracts it from its cells, skipping one random cell when the
    /// row length is odd. Rows are not renormalized afterwards.
    pub fn transition_matrix<R>(&self, bound: f64, rng: &mut R) -> Result<Matrix<f64>>
    where
        R: Rng + ?Sized,
    {
        if !(bound.is_finite() && bound > 0.0) {
            return Err(Error::InvalidBound(bound));
        }
        let n = self.tagset.len();
        let prior = 1.0 / n as f64;
        let mut a = Matrix::new(n, n, prior);
        for i in 0..n {
            let var = rng.gen_range(0.0..bound);
            let skip = rng.gen_range(0..n);
            let mut plus = true;
            for j in 0..n {
                if n % 2 != 0 && j == skip {
                    continue;
                }
                let x = a[(i, j)];
                /* a cell is only touched while subtracting would keep it positive */
                if x - var > 0.0 {
                    a[(i, j)] = if plus { x + var } else { x - var };
                    plus = !plus;
                }
            }
        }
        log::debug!("matrix A (tag-tag, pseudo-random):\n{a}");
        Ok(a)
    }
}
