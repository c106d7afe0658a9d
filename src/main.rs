use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use hmmtag::{Dataset, Evaluation, Likelihood, PosTagger, Tagger, TaggerConfig};

/// Assign part-of-speech tags to the sentences given by files (FILE), one
/// sentence per line. If FILE is omitted or '-', sentences are read from STDIN.
/// Evaluate the tagger on gold-tagged data (with -t option)
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    /// read lexicon, tagset and corpus from a JSON file (defaults to the
    /// built-in sample)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// seed for the transition matrix
    #[arg(short, long)]
    seed: Option<u64>,
    /// maximum perturbation of the transition probabilities
    #[arg(short, long)]
    bound: Option<f64>,
    /// score with raw matrix products instead of normalized likelihoods
    #[arg(long)]
    raw: bool,
    /// report the performance of the tagger on gold-tagged data
    #[arg(short = 't', long = "test")]
    evaluate: bool,
    /// suppress tagging results (useful for test mode)
    #[arg(short, long)]
    quiet: bool,
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

fn open(path: &Path) -> io::Result<Box<dyn Read>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}

fn tag(tagger: &PosTagger, rdr: Box<dyn Read>, quiet: bool) -> hmmtag::Result<usize> {
    let mut failures = 0;
    for (lineno, line) in BufReader::new(rdr).lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            // undecodable text only spoils its own line
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                log::error!("line {}: {e}", lineno + 1);
                failures += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        match tagger.tag(&line) {
            Ok(tagged) if !quiet => println!("{tagged}"),
            Ok(_) => {}
            Err(e) => {
                log::error!("{e}: {line}");
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn evaluate(tagger: &PosTagger, rdr: Box<dyn Read>, evaluation: &mut Evaluation, quiet: bool) -> hmmtag::Result<usize> {
    let mut ds = Dataset::default();
    ds.read(rdr)?;
    log::info!("{} sentences, {} items", ds.len(), ds.total_items());
    let mut failures = 0;
    for sentence in ds.iter() {
        let words: Vec<&str> = sentence.words.iter().map(String::as_str).collect();
        match tagger.tag_tokens(&words) {
            Ok(prediction) => {
                evaluation.accumulate(&sentence.tags, &prediction);
                if !quiet {
                    for ((word, gold), pred) in words.iter().zip(&sentence.tags).zip(&prediction) {
                        println!("{gold}\t{pred}\t{word}");
                    }
                    println!();
                }
            }
            Err(e) => {
                log::error!("{e}: {}", words.join(" "));
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn run(argv: Argv) -> hmmtag::Result<usize> {
    let mut config = match &argv.config {
        Some(path) => TaggerConfig::from_path(path)?,
        None => TaggerConfig::sample(),
    };
    if argv.seed.is_some() {
        config.seed = argv.seed;
    }
    if let Some(bound) = argv.bound {
        config.bound = bound;
    }
    if argv.raw {
        config.likelihood = Likelihood::Raw;
    }
    let tagger = PosTagger::new(&config)?;
    let mut evaluation = Evaluation::new(tagger.tagset().len());

    let inputs = if argv.inputs.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        argv.inputs
    };
    let mut failures = 0;
    for path in &inputs {
        let rdr = open(path)?;
        failures += if argv.evaluate {
            evaluate(&tagger, rdr, &mut evaluation, argv.quiet)?
        } else {
            tag(&tagger, rdr, argv.quiet)?
        };
    }
    if argv.evaluate {
        evaluation.evaluate();
        print!("{evaluation}");
    }
    Ok(failures)
}

fn main() -> ExitCode {
    env_logger::init();
    let argv = Argv::parse();
    log::info!("{:?}", argv);
    match run(argv) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(n) => {
            log::warn!("{n} sentences could not be tagged");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagger() -> PosTagger {
        let mut config = TaggerConfig::sample();
        config.seed = Some(1);
        PosTagger::new(&config).unwrap()
    }

    #[test]
    fn tagging_continues_after_a_bad_line() {
        let input: &[u8] = b"that fly sneaks .\nfood \xff\xfe .\nthat cat\n\nfood sneaks .\n";
        let failures = tag(&tagger(), Box::new(input), true).unwrap();
        // the undecodable line and the unknown word
        assert_eq!(failures, 2);
    }

    #[test]
    fn evaluation_counts_sentences() {
        let gold: &[u8] = b"n\tfood\nv\tsneaks\nperiod\t.\n\n";
        let mut evaluation = Evaluation::new(6);
        let failures = evaluate(&tagger(), Box::new(gold), &mut evaluation, true).unwrap();
        assert_eq!(failures, 0);
        let estimation = evaluation.evaluate();
        assert_eq!(estimation.item_accuracy, 1.0);
        assert_eq!(estimation.sentence_accuracy, 1.0);
    }
}
