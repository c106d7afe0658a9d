use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    quark::StringTable,
};

use super::matrix::Matrix;

/// Marks a psi cell without predecessor.
pub const NO_PREDECESSOR: i32 = -1;

/// How a transition-weighted emission is scored during induction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    /// Emissions are divided by their tag column sum and transitions by their
    /// row sum before being multiplied.
    #[default]
    Normalized,
    /// Raw matrix cells are multiplied.
    Raw,
}

/// Viterbi decoder over a transition matrix A (tag x tag) and an emission
/// matrix B (word x tag).
#[derive(Debug)]
pub struct Viterbi<'a> {
    trans: &'a Matrix<f64>,
    emit: &'a Matrix<f64>,
    likelihood: Likelihood,
    /// Row sums of A.
    trans_norm: Vec<f64>,
    /// Column sums of B.
    emit_norm: Vec<f64>,
    /**
     * Best path probabilities.
     *  This is a [L][T] matrix whose element [j][t] is the probability of
     *  the best path reaching tag #j at observation #t.
     */
    delta: Matrix<f64>,
    /**
     * Backward edges.
     *  This is a [L][T-1] matrix whose element [j][t] is the tag at
     *  observation #t the best path to (#t+1, #j) comes from.
     */
    psi: Matrix<i32>,
}

impl<'a> Viterbi<'a> {
    /// Fails with `Error::DimensionMismatch` unless A is square and B has one
    /// column per tag of A.
    pub fn new(
        trans: &'a Matrix<f64>,
        emit: &'a Matrix<f64>,
        likelihood: Likelihood,
    ) -> Result<Self> {
        if trans.rows() != trans.cols() {
            return Err(Error::DimensionMismatch(format!(
                "transition matrix is {}x{}, expected a square matrix",
                trans.rows(),
                trans.cols()
            )));
        }
        if emit.cols() != trans.rows() {
            return Err(Error::DimensionMismatch(format!(
                "emission matrix has {} columns for {} tags",
                emit.cols(),
                trans.rows()
            )));
        }
        Ok(Self {
            trans,
            emit,
            likelihood,
            trans_norm: (0..trans.rows()).map(|i| trans.sum_row(i)).collect(),
            emit_norm: (0..emit.cols()).map(|k| emit.sum_col(k)).collect(),
            delta: Matrix::new(0, 0, 0.0),
            psi: Matrix::new(0, 0, NO_PREDECESSOR),
        })
    }

    #[inline]
    pub fn num_tags(&self) -> usize {
        self.trans.rows()
    }

    pub fn delta(&self) -> &Matrix<f64> {
        &self.delta
    }

    pub fn psi(&self) -> &Matrix<i32> {
        &self.psi
    }

    /// Finds the most probable tag path for `observation`.
    ///
    /// The first token of `observation` is the sentinel: it is never looked
    /// up and always carries the last tag. The returned path holds one tag
    /// index per remaining token.
    ///
    /// `words` maps tokens to rows of B, so it may not hold more words than B
    /// has rows.
    pub fn decode<S, W>(&mut self, words: &W, observation: &[S]) -> Result<Vec<usize>>
    where
        S: AsRef<str>,
        W: StringTable + ?Sized,
    {
        if words.len() > self.emit.rows() {
            return Err(Error::DimensionMismatch(format!(
                "{} words for an emission matrix of {} rows",
                words.len(),
                self.emit.rows()
            )));
        }
        if self.num_tags() == 0 {
            return Err(Error::NoPath);
        }
        self.init(observation.len());
        self.induct(words, observation)?;
        log::debug!("delta:\n{}", self.delta);
        log::debug!("psi:\n{}", self.psi);
        self.backtrace()
    }

    fn init(&mut self, n: usize) {
        let l = self.num_tags();
        self.delta = Matrix::new(l, n, 0.0);
        if n > 0 {
            self.delta[(l - 1, 0)] = 1.0;
        }
        self.psi = Matrix::new(l, n.saturating_sub(1), NO_PREDECESSOR);
    }

    fn induct<S, W>(&mut self, words: &W, observation: &[S]) -> Result<()>
    where
        S: AsRef<str>,
        W: StringTable + ?Sized,
    {
        for (t, token) in observation.iter().enumerate().skip(1) {
            let token = token.as_ref();
            let w = words
                .to_id(token)
                .ok_or_else(|| Error::UnknownToken(token.to_string()))?;
            let prev_max = self.delta.max_col(t - 1);
            let prev = self.delta.argmax_col(t - 1).ok_or(Error::NoPath)?;
            for j in 0..self.num_tags() {
                let score = prev_max * self.probability(w, prev, j);
                self.delta[(j, t)] = score;
                if score > 0.0 {
                    self.psi[(j, t - 1)] = prev as i32;
                }
            }
        }
        Ok(())
    }

    /// Probability of word `w` realizing tag `j` after tag `prev`.
    fn probability(&self, w: usize, prev: usize, j: usize) -> f64 {
        let emit = self.emit[(w, j)];
        let trans = self.trans[(prev, j)];
        match self.likelihood {
            Likelihood::Raw => emit * trans,
            Likelihood::Normalized => {
                ratio(emit, self.emit_norm[j]) * ratio(trans, self.trans_norm[prev])
            }
        }
    }

    fn backtrace(&self) -> Result<Vec<usize>> {
        let n = self.delta.cols();
        if n < 2 {
            return Ok(Vec::new());
        }
        let last = n - 1;
        let best = self
            .delta
            .argmax_col(last)
            .filter(|&j| self.delta[(j, last)] > 0.0)
            .ok_or(Error::NoPath)?;

        let mut path = vec![0; last];
        path[last - 1] = best;
        /* Tag the remaining items by tracing the backward links. */
        for t in (0..last - 1).rev() {
            let prev = self.psi[(path[t + 1], t + 1)];
            if prev == NO_PREDECESSOR {
                return Err(Error::NoPath);
            }
            path[t] = prev as usize;
        }
        Ok(path)
    }
}

#[inline]
fn ratio(x: f64, total: f64) -> f64 {
    if total > 0.0 {
        x / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quark::Quark;

    // tags: a b end; words: x y .
    fn words() -> Quark {
        Quark::from(vec!["x".to_string(), "y".to_string(), ".".to_string()])
    }

    fn trans() -> Matrix<f64> {
        Matrix::from_rows(vec![
            vec![0.2, 0.7, 0.1],
            vec![0.6, 0.3, 0.1],
            vec![0.5, 0.4, 0.1],
        ])
        .unwrap()
    }

    fn emit() -> Matrix<f64> {
        Matrix::from_rows(vec![
            vec![0.9, 0.2, 0.0],
            vec![0.1, 0.8, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn decode_raw() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        let path = viterbi.decode(&words(), &[".", "x", "y", "."]).unwrap();
        assert_eq!(path, vec![0, 1, 2]);
        assert_eq!(viterbi.delta().cols(), 4);
        assert_eq!(viterbi.psi().cols(), 3);
        // the sentinel column
        assert_eq!(viterbi.delta().column(0).collect::<Vec<_>>(), vec![0.0, 0.0, 1.0]);
        assert_eq!(viterbi.psi()[(0, 0)], 2);
    }

    #[test]
    fn decode_normalized() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Normalized).unwrap();
        let path = viterbi.decode(&words(), &[".", "y", "x"]).unwrap();
        assert_eq!(path, vec![1, 0]);
    }

    #[test]
    fn path_excludes_sentinel() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Normalized).unwrap();
        let observation = [".", "x", "x", "y", "x", "."];
        let path = viterbi.decode(&words(), &observation).unwrap();
        assert_eq!(path.len(), observation.len() - 1);
    }

    #[test]
    fn single_word() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Normalized).unwrap();
        assert_eq!(viterbi.decode(&words(), &[".", "y"]).unwrap(), vec![1]);
    }

    #[test]
    fn sentinel_only() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        assert!(viterbi.decode(&words(), &["."]).unwrap().is_empty());
        assert!(viterbi.decode::<&str, _>(&words(), &[]).unwrap().is_empty());
    }

    #[test]
    fn deterministic() {
        let (a, b) = (trans(), emit());
        let observation = [".", "y", "x", "x", "y", "."];
        let first = Viterbi::new(&a, &b, Likelihood::Raw).unwrap().decode(&words(), &observation).unwrap();
        let second = Viterbi::new(&a, &b, Likelihood::Raw).unwrap().decode(&words(), &observation).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn ties_resolve_to_lowest_index() {
        let a = Matrix::new(3, 3, 1.0 / 3.0);
        let b = Matrix::from_rows(vec![vec![0.5, 0.5, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
        let words = Quark::from(vec!["x".to_string(), ".".to_string()]);
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        assert_eq!(viterbi.decode(&words, &[".", "x", "x"]).unwrap(), vec![0, 0]);
    }

    #[test]
    fn unknown_token() {
        let (a, b) = (trans(), emit());
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        match viterbi.decode(&words(), &[".", "x", "z"]) {
            Err(Error::UnknownToken(token)) => assert_eq!(token, "z"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn no_path() {
        let (a, b) = (trans(), Matrix::new(3, 3, 0.0));
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Normalized).unwrap();
        assert!(matches!(viterbi.decode(&words(), &[".", "x"]), Err(Error::NoPath)));
    }

    #[test]
    fn empty_tagset_has_no_path() {
        let a = Matrix::new(0, 0, 0.0);
        let b = Matrix::new(3, 0, 0.0);
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        assert!(matches!(viterbi.decode(&words(), &[".", "x"]), Err(Error::NoPath)));
    }

    #[test]
    fn rejects_mismatched_matrices() {
        let b = emit();
        let a = Matrix::new(3, 2, 0.5);
        assert!(matches!(
            Viterbi::new(&a, &b, Likelihood::Raw),
            Err(Error::DimensionMismatch(_))
        ));
        let a = Matrix::new(2, 2, 0.5);
        assert!(matches!(
            Viterbi::new(&a, &b, Likelihood::Raw),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn alphabet_larger_than_emission_matrix() {
        let a = trans();
        // two rows for the three words of `words()`
        let b = Matrix::from_rows(vec![vec![0.9, 0.2, 0.0], vec![0.0, 0.0, 1.0]]).unwrap();
        let mut viterbi = Viterbi::new(&a, &b, Likelihood::Raw).unwrap();
        match viterbi.decode(&words(), &[".", "x", "."]) {
            Err(err @ Error::DimensionMismatch(_)) => assert!(err.is_configuration()),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
