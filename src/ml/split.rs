use rand::Rng;
use rand::seq::SliceRandom;

use super::TrainError;

/// Row indices of a train/test partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle row indices and hold out `ceil(n_rows * test_fraction)` of them.
///
/// The test partition takes the head of the permutation, the training
/// partition the rest. Both must end up non-empty.
pub fn train_test_split<R: Rng + ?Sized>(
    n_rows: usize,
    test_fraction: f64,
    rng: &mut R,
) -> Result<SplitIndices, TrainError> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TrainError::InvalidTestFraction(test_fraction));
    }
    let n_test = (test_fraction * n_rows as f64).ceil() as usize;
    if n_test == 0 || n_test >= n_rows {
        return Err(TrainError::SplitTooSmall { rows: n_rows });
    }
    let mut order: Vec<usize> = (0..n_rows).collect();
    order.shuffle(rng);
    let train = order.split_off(n_test);
    Ok(SplitIndices { train, test: order })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn five_rows_hold_out_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let split = train_test_split(5, 0.2, &mut rng).unwrap();
        assert_eq!(split.test.len(), 1);
        assert_eq!(split.train.len(), 4);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn same_seed_same_partition() {
        let a = train_test_split(20, 0.25, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = train_test_split(20, 0.25, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.test.len(), 5);
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            train_test_split(5, 0.0, &mut rng),
            Err(TrainError::InvalidTestFraction(0.0))
        );
        assert!(train_test_split(5, 1.0, &mut rng).is_err());
    }

    #[test]
    fn single_row_cannot_be_split() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            train_test_split(1, 0.2, &mut rng),
            Err(TrainError::SplitTooSmall { rows: 1 })
        );
    }
}
