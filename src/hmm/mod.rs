pub mod estimator;
pub mod frequency;
pub mod matrix;
pub mod model;
pub mod viterbi;

pub use estimator::{Estimator, DEFAULT_BOUND};
pub use frequency::{count_lexems, Frequencies};
pub use matrix::Matrix;
pub use model::{Hmm, SENTINEL};
pub use viterbi::{Likelihood, Viterbi};
