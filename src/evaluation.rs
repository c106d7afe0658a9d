use std::{collections::BTreeMap, fmt::Display, iter::zip};

/// Tag-wise performance values.
#[derive(Debug, Default, Clone)]
struct TagMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /** Number of occurrences of the tag in the gold-standard data. */
    num_observation: usize,
    /** Number of predictions. */
    num_prediction: usize,
    precision: f64,
    recall: f64,
    /** F1 score. */
    fmeasure: f64,
}

/// Overall performance of a tagger against gold-standard tags.
#[derive(Debug, Default)]
pub struct Evaluation {
    /** Number of tags in the tagset, used for macro averages. */
    pub num_tags: usize,
    tbl: BTreeMap<String, TagMeasure>,

    /** Number of correctly predicted items. */
    item_total_correct: usize,
    /** Total number of items. */
    item_total_num: usize,
    /** Item-level accuracy. */
    item_accuracy: f64,

    /** Number of correctly predicted sentences. */
    inst_total_correct: usize,
    /** Total number of sentences. */
    inst_total_num: usize,
    /** Sentence-level accuracy. */
    inst_accuracy: f64,

    macro_precision: f64,
    macro_recall: f64,
    macro_fmeasure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimation {
    pub precision: f64,
    pub recall: f64,
    pub fmeasure: f64,
    pub item_accuracy: f64,
    pub sentence_accuracy: f64,
}

impl Evaluation {
    pub fn new(num_tags: usize) -> Self {
        Self {
            num_tags,
            ..Default::default()
        }
    }

    /// Adds one sentence. Items beyond the shorter of the two sequences are
    /// ignored, and the sentence only counts as correct when the lengths match.
    pub fn accumulate<R, P>(&mut self, reference: &[R], prediction: &[P])
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let mut matched = 0;
        for (r, p) in zip(reference, prediction) {
            let (r, p) = (r.as_ref(), p.as_ref());
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
            if r == p {
                self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                matched += 1;
            }
            self.item_total_num += 1;
        }
        self.item_total_correct += matched;

        if matched == reference.len() && reference.len() == prediction.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    pub fn evaluate(&mut self) -> Estimation {
        self.macro_precision = 0.0;
        self.macro_recall = 0.0;
        self.macro_fmeasure = 0.0;
        for lev in self.tbl.values_mut() {
            lev.precision = 0.0;
            lev.recall = 0.0;
            lev.fmeasure = 0.0;
            if lev.num_observation == 0 {
                continue;
            }

            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }

        if self.num_tags > 0 {
            self.macro_precision /= self.num_tags as f64;
            self.macro_recall /= self.num_tags as f64;
            self.macro_fmeasure /= self.num_tags as f64;
        }
        if self.item_total_num > 0 {
            self.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        }
        if self.inst_total_num > 0 {
            self.inst_accuracy = self.inst_total_correct as f64 / self.inst_total_num as f64;
        }
        Estimation {
            precision: self.macro_precision,
            recall: self.macro_recall,
            fmeasure: self.macro_fmeasure,
            item_accuracy: self.item_accuracy,
            sentence_accuracy: self.inst_accuracy,
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Performance by tag (#match, #model, #ref) (precision, recall, F1):")?;
        for (tag, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(f, "\t{}: ({}, {}, {}) (******, ******, ******)", tag, lev.num_correct, lev.num_prediction, lev.num_observation)?;
            } else {
                writeln!(f, "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})", tag, lev.num_correct, lev.num_prediction, lev.num_observation,
                    lev.precision, lev.recall, lev.fmeasure
                )?;
            }
        }
        writeln!(f, "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})", self.macro_precision, self.macro_recall, self.macro_fmeasure)?;
        writeln!(f, "Item accuracy: {}/{} => {:.4}", self.item_total_correct, self.item_total_num, self.item_accuracy)?;
        writeln!(f, "Sentence accuracy: {}/{} => {:.4}", self.inst_total_correct, self.inst_total_num, self.inst_accuracy)
    }
}
