//! # hmmtag
//!
//! A part-of-speech tagger built on a hidden Markov model and the Viterbi
//! algorithm.
//!
//! The emission matrix is estimated from a lexicon of admissible tags per
//! word, weighted by word frequencies in an untagged corpus. The transition
//! matrix is a pseudo-random perturbation of the uniform distribution.
//!
//! ```
//! use hmmtag::{PosTagger, TaggerConfig};
//!
//! let mut config = TaggerConfig::sample();
//! config.seed = Some(42);
//! let tagger = PosTagger::new(&config).unwrap();
//! let tagged = tagger.tag("that fly sneaks .").unwrap();
//! assert!(tagged.starts_with("that:"));
//! assert!(tagged.ends_with(".:period"));
//! ```
//!
//! Unknown words are reported as errors instead of aborting:
//!
//! ```
//! use hmmtag::{Error, PosTagger, TaggerConfig};
//!
//! let tagger = PosTagger::new(&TaggerConfig::sample()).unwrap();
//! assert!(matches!(tagger.tag("that cat"), Err(Error::UnknownToken(_))));
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod hmm;
pub mod lexicon;
pub mod quark;
pub mod tagger;

pub use config::TaggerConfig;
pub use dataset::{Dataset, Sentence};
pub use error::{Error, Result};
pub use evaluation::{Estimation, Evaluation};
pub use hmm::{Hmm, Likelihood, Matrix};
pub use lexicon::{Lexicon, Tagset};
pub use quark::{Quark, StringTable};
pub use tagger::{PosTagger, Tagger};
