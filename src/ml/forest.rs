//! Bootstrap-aggregated forest of [`DecisionTree`]s.
//!
//! Each tree is grown on `n` rows drawn with replacement and examines
//! `floor(sqrt(n_features))` features per split. Forest probabilities are
//! the mean of the per-tree leaf frequencies; the predicted class is their
//! argmax. All randomness comes from one generator seeded with
//! [`ForestParams::seed`], so a fit is fully reproducible.

use ndarray::{ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::TrainError;
use super::decision_tree::{DecisionTree, TreeParams, argmax};

/// Forest hyperparameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    /// Draw a bootstrap sample per tree instead of using every row.
    pub bootstrap: bool,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
            bootstrap: true,
            max_depth: None,
            min_samples_split: 2,
        }
    }
}

/// A fitted random forest classifier.
#[derive(Clone, Debug)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    /// Fit `params.n_trees` trees on the full feature matrix.
    pub fn fit(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, TrainError> {
        if params.n_trees == 0 {
            return Err(TrainError::NoTrees);
        }
        if x.nrows() == 0 || x.ncols() == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(TrainError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            });
        }

        let n_rows = x.nrows();
        let tree_params = TreeParams {
            max_features: Some(sqrt_features(x.ncols())),
            min_samples_split: params.min_samples_split,
            max_depth: params.max_depth,
        };
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.n_trees);
        for _ in 0..params.n_trees {
            let samples: Vec<usize> = if params.bootstrap {
                (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect()
            } else {
                (0..n_rows).collect()
            };
            trees.push(DecisionTree::fit(
                x,
                y,
                &samples,
                n_classes,
                &tree_params,
                &mut rng,
            )?);
        }
        Ok(Self {
            trees,
            n_features: x.ncols(),
            n_classes,
        })
    }

    /// Mean class probabilities across trees.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in mean.iter_mut().zip(tree.predict_proba(row)) {
                *acc += p;
            }
        }
        let n_trees = self.trees.len().max(1) as f64;
        mean.iter_mut().for_each(|p| *p /= n_trees);
        mean
    }

    pub fn predict(&self, row: ArrayView1<'_, f64>) -> usize {
        argmax(&self.predict_proba(row))
    }

    /// Predict every row of `x`.
    pub fn predict_batch(&self, x: ArrayView2<'_, f64>) -> Vec<usize> {
        x.rows().into_iter().map(|row| self.predict(row)).collect()
    }

    /// Check that a point has the width the forest was trained on.
    pub fn check_point(&self, row: ArrayView1<'_, f64>) -> Result<(), TrainError> {
        if row.len() == self.n_features {
            Ok(())
        } else {
            Err(TrainError::FeatureMismatch {
                expected: self.n_features,
                got: row.len(),
            })
        }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Average tree depth across the forest.
    pub fn avg_depth(&self) -> f64 {
        self.mean_over_trees(DecisionTree::depth)
    }

    /// Average leaf count across the forest.
    pub fn avg_leaves(&self) -> f64 {
        self.mean_over_trees(DecisionTree::n_leaves)
    }

    fn mean_over_trees(&self, stat: fn(&DecisionTree) -> usize) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: usize = self.trees.iter().map(stat).sum();
        total as f64 / self.trees.len() as f64
    }
}

fn sqrt_features(n_features: usize) -> usize {
    ((n_features as f64).sqrt().floor() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn params(n_trees: usize) -> ForestParams {
        ForestParams {
            n_trees,
            ..ForestParams::default()
        }
    }

    #[test]
    fn probabilities_sum_to_one() {
        let x = array![[1.0, 0.0], [2.0, 1.0], [3.0, 0.0], [4.0, 1.0]];
        let y = array![0, 1, 0, 1];
        let forest = RandomForest::fit(x.view(), y.view(), 2, &params(25)).unwrap();
        assert_eq!(forest.n_trees(), 25);
        let proba = forest.predict_proba(array![2.5, 1.0].view());
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(proba.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn same_seed_same_forest_output() {
        let x = array![[25.0, 0.0], [30.0, 1.0], [35.0, 0.0], [40.0, 1.0], [45.0, 0.0]];
        let y = array![0, 1, 0, 1, 0];
        let a = RandomForest::fit(x.view(), y.view(), 2, &params(50)).unwrap();
        let b = RandomForest::fit(x.view(), y.view(), 2, &params(50)).unwrap();
        let point = array![28.0, 1.0];
        assert_eq!(a.predict_proba(point.view()), b.predict_proba(point.view()));
        assert_eq!(a.predict(point.view()), b.predict(point.view()));
    }

    #[test]
    fn learns_a_clean_separation() {
        let x = array![[0.0], [0.1], [0.2], [0.9], [1.0], [1.1]];
        let y = array![0, 0, 0, 1, 1, 1];
        let forest = RandomForest::fit(x.view(), y.view(), 2, &params(30)).unwrap();
        assert_eq!(forest.predict_batch(x.view()), vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn without_bootstrap_trees_see_every_row() {
        let x = array![[0.0], [1.0]];
        let y = array![0, 1];
        let forest = RandomForest::fit(
            x.view(),
            y.view(),
            2,
            &ForestParams {
                bootstrap: false,
                ..params(3)
            },
        )
        .unwrap();
        assert_eq!(forest.predict_proba(array![0.0].view()), vec![1.0, 0.0]);
        assert_eq!(forest.avg_depth(), 1.0);
        assert_eq!(forest.avg_leaves(), 2.0);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let x = array![[1.0], [2.0]];
        let y = array![0, 1, 1];
        assert_eq!(
            RandomForest::fit(x.view(), y.view(), 2, &params(3)).unwrap_err(),
            TrainError::LengthMismatch {
                features: 2,
                labels: 3
            }
        );
        let y = array![0, 1];
        assert_eq!(
            RandomForest::fit(x.view(), y.view(), 2, &params(0)).unwrap_err(),
            TrainError::NoTrees
        );
    }

    #[test]
    fn point_width_is_checked() {
        let x = array![[1.0, 0.0], [2.0, 1.0]];
        let y = array![0, 1];
        let forest = RandomForest::fit(x.view(), y.view(), 2, &params(2)).unwrap();
        assert!(forest.check_point(array![1.0, 1.0].view()).is_ok());
        assert_eq!(
            forest.check_point(array![1.0].view()),
            Err(TrainError::FeatureMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn sqrt_feature_budget_never_drops_below_one() {
        assert_eq!(sqrt_features(1), 1);
        assert_eq!(sqrt_features(2), 1);
        assert_eq!(sqrt_features(9), 3);
    }
}
