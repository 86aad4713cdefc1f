//! One-hot label encoding.
use super::EvaluationError;
use nalgebra::DMatrix;
use std::fmt::Debug;

/// Maps labels to one-hot rows over a fixed class universe.
pub trait LabelEncoder<L: Debug> {
    fn num_classes(&self) -> usize;

    /// Column of `label`, or `LabelUniverseMismatch` for an unseen label.
    fn class_index(&self, label: &L) -> Result<usize, EvaluationError>;

    /// [`class_index`](Self::class_index), rejecting columns past `num_classes`.
    fn checked_index(&self, label: &L) -> Result<usize, EvaluationError> {
        let index = self.class_index(label)?;
        let classes = self.num_classes();
        if index >= classes {
            return Err(EvaluationError::EncoderIndexOutOfRange {
                label: format!("{label:?}"),
                index,
                classes,
            });
        }
        Ok(index)
    }

    /// `(labels.len(), num_classes)` one-hot matrix.
    fn transform(&self, labels: &[L]) -> Result<DMatrix<i32>, EvaluationError> {
        let mut codes = DMatrix::zeros(labels.len(), self.num_classes());
        for (row, label) in labels.iter().enumerate() {
            codes[(row, self.checked_index(label)?)] = 1;
        }
        Ok(codes)
    }
}

/// One column per distinct label, classes in ascending order.
///
/// Two-class inputs still get two columns, so codes of distinct labels are
/// always orthogonal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelBinarizer<L> {
    classes: Vec<L>,
}

impl<L: Ord + Clone> LabelBinarizer<L> {
    /// Fit on every label of `labels`.
    pub fn fit(labels: &[L]) -> Self {
        Self::from_classes(labels.to_vec())
    }

    pub fn from_classes(mut classes: Vec<L>) -> Self {
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn classes(&self) -> &[L] {
        &self.classes
    }
}

impl<L: Ord + Debug> LabelEncoder<L> for LabelBinarizer<L> {
    fn num_classes(&self) -> usize {
        self.classes.len()
    }

    fn class_index(&self, label: &L) -> Result<usize, EvaluationError> {
        self.classes
            .binary_search(label)
            .map_err(|_| EvaluationError::LabelUniverseMismatch {
                label: format!("{label:?}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_sorts_and_dedups() {
        let binarizer = LabelBinarizer::fit(&["b", "a", "b", "c"]);
        assert_eq!(binarizer.classes(), &["a", "b", "c"]);
        let codes = binarizer.transform(&["c", "a"]).unwrap();
        assert_eq!(codes, DMatrix::from_row_slice(2, 3, &[0, 0, 1, 1, 0, 0]));
    }

    #[test]
    fn two_classes_keep_two_columns() {
        let binarizer = LabelBinarizer::fit(&[0u32, 1, 1]);
        let codes = binarizer.transform(&[0, 1]).unwrap();
        assert_eq!(codes, DMatrix::from_row_slice(2, 2, &[1, 0, 0, 1]));
    }

    /// Claims one class but sends every label past it.
    struct OffByOne;

    impl LabelEncoder<u8> for OffByOne {
        fn num_classes(&self) -> usize {
            1
        }
        fn class_index(&self, label: &u8) -> Result<usize, EvaluationError> {
            Ok(*label as usize + 1)
        }
    }

    #[test]
    fn transform_rejects_columns_past_num_classes() {
        assert_eq!(
            OffByOne.transform(&[0, 2]),
            Err(EvaluationError::EncoderIndexOutOfRange {
                label: "0".to_string(),
                index: 1,
                classes: 1
            })
        );
        assert_eq!(OffByOne.transform(&[]).unwrap().shape(), (0, 1));
    }

    #[test]
    fn unseen_label_fails() {
        let binarizer = LabelBinarizer::fit(&[1, 2, 3]);
        assert_eq!(
            binarizer.transform(&[2, 7]),
            Err(EvaluationError::LabelUniverseMismatch {
                label: "7".to_string()
            })
        );
    }
}
