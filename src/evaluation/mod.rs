//! Retrieval evaluation sets: queries, references and ground truth.
//!
//! Every label that occurs at least twice contributes its first image as a
//! query and the rest as references. Singleton labels are dropped since there
//! is nothing to retrieve for them. The ground-truth matrix is the product of
//! the query and reference one-hot codes, so entry `(i, j)` is 1 exactly when
//! query `i` and reference `j` share a label.
//!
//! Without an explicit encoder a [`LabelBinarizer`] is fit on the labels of
//! the call. Codes from such a call are only comparable within that call; pass
//! an encoder fit on the full label universe when several subsets must agree.

pub mod binarizer;
pub mod error;
pub mod label_index;

pub use self::binarizer::{LabelBinarizer, LabelEncoder};
pub use self::error::EvaluationError;
pub use self::label_index::{LabelGroup, LabelIndex};

use crate::types::GroundTruthMatrix;
use log::{debug, warn};
use std::fmt::Debug;
use std::hash::Hash;

/// Labels need at least this many images to be kept.
pub const MIN_GROUP_SIZE: usize = 2;

/// How many label counts are logged per build.
const COMMON_LABELS_LOGGED: usize = 10;

/// Output of [`build_evaluation_set`].
#[derive(Clone, Debug, PartialEq)]
pub struct EvaluationSet<I, L> {
    pub queries: Vec<I>,
    pub references: Vec<I>,
    pub query_labels: Vec<L>,
    pub reference_labels: Vec<L>,
    /// `(queries.len(), references.len())`, entries in {0, 1}
    pub ground_truth: GroundTruthMatrix,
}

impl<I, L> EvaluationSet<I, L> {
    pub fn num_queries(&self) -> usize {
        self.queries.len()
    }

    pub fn num_references(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Reference indices marked relevant for query `q`.
    pub fn relevant_references(&self, q: usize) -> Vec<usize> {
        self.ground_truth
            .row(q)
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(j, _)| j)
            .collect()
    }

    /// `(queries, references, ground_truth)`.
    pub fn into_parts(self) -> (Vec<I>, Vec<I>, GroundTruthMatrix) {
        (self.queries, self.references, self.ground_truth)
    }
}

/// Split `images` into queries and references and compute their relevance.
///
/// Every label must be known to `encoder` when one is supplied, including
/// labels that are later dropped as singletons.
pub fn build_evaluation_set<I, L>(
    images: &[I],
    labels: &[L],
    encoder: Option<&dyn LabelEncoder<L>>,
) -> Result<EvaluationSet<I, L>, EvaluationError>
where
    I: Clone,
    L: Clone + Ord + Hash + Debug,
{
    if images.len() != labels.len() {
        return Err(EvaluationError::LengthMismatch {
            images: images.len(),
            labels: labels.len(),
        });
    }

    let fitted;
    let encoder: &dyn LabelEncoder<L> = match encoder {
        Some(encoder) => encoder,
        None => {
            fitted = LabelBinarizer::fit(labels);
            &fitted
        }
    };
    for label in labels {
        encoder.checked_index(label)?;
    }

    let index = LabelIndex::build(labels, MIN_GROUP_SIZE);
    debug!(
        "{} most common labels: {:?}",
        COMMON_LABELS_LOGGED,
        index.most_common(COMMON_LABELS_LOGGED)
    );

    let num_references = index.retained_images() - index.len();
    let mut queries = Vec::with_capacity(index.len());
    let mut query_labels = Vec::with_capacity(index.len());
    let mut references = Vec::with_capacity(num_references);
    let mut reference_labels = Vec::with_capacity(num_references);

    for group in index.groups() {
        let (first, rest) = match group.indices.split_first() {
            Some(split) => split,
            None => continue,
        };
        queries.push(images[*first].clone());
        query_labels.push(group.label.clone());
        for &i in rest {
            references.push(images[i].clone());
            reference_labels.push(group.label.clone());
        }
    }

    let query_codes = encoder.transform(&query_labels)?;
    let reference_codes = encoder.transform(&reference_labels)?;
    let ground_truth = query_codes * reference_codes.transpose();

    if queries.is_empty() {
        warn!(
            "no label occurs at least {} times among {} images; evaluation set is empty",
            MIN_GROUP_SIZE,
            labels.len()
        );
    } else {
        debug!(
            "evaluation set: {} queries, {} references, {} images dropped",
            queries.len(),
            references.len(),
            labels.len() - index.retained_images()
        );
    }

    Ok(EvaluationSet {
        queries,
        references,
        query_labels,
        reference_labels,
        ground_truth,
    })
}
