//! CART classification tree grown with Gini impurity.
//!
//! Nodes live in a flat arena; index 0 is the root. Leaves keep the class
//! frequencies of the training rows that reached them, so a tree can report
//! probabilities as well as a class.

use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;
use rand::seq::SliceRandom;

use super::TrainError;

/// Growth limits for a single tree.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    /// Features examined per split; `None` examines all of them.
    pub max_features: Option<usize>,
    /// Nodes with fewer rows become leaves.
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_features: None,
            min_samples_split: 2,
            max_depth: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted classification tree.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Clone, Copy, Debug)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree on the rows listed in `samples`.
    ///
    /// `samples` may repeat rows (bootstrap draws); a repeated row counts once
    /// per occurrence.
    pub fn fit<R: Rng + ?Sized>(
        x: ArrayView2<'_, f64>,
        y: ArrayView1<'_, usize>,
        samples: &[usize],
        n_classes: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> Result<Self, TrainError> {
        if samples.is_empty() || x.ncols() == 0 {
            return Err(TrainError::EmptyDataset);
        }
        if x.nrows() != y.len() {
            return Err(TrainError::LengthMismatch {
                features: x.nrows(),
                labels: y.len(),
            });
        }
        if let Some(&label) = y.iter().find(|&&label| label >= n_classes) {
            return Err(TrainError::LabelOutOfRange { label, n_classes });
        }

        let mut builder = Builder {
            x: x.view(),
            y: y.view(),
            n_classes,
            params,
            rng,
            nodes: Vec::new(),
        };
        builder.grow(samples.to_vec(), 0);
        Ok(Self { nodes: builder.nodes })
    }

    /// Class frequencies of the leaf `row` falls into.
    pub fn predict_proba(&self, row: ArrayView1<'_, f64>) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
            }
        }
    }

    /// Most frequent class at the reached leaf; ties go to the lower index.
    pub fn predict(&self, row: ArrayView1<'_, f64>) -> usize {
        argmax(self.predict_proba(row))
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, index: usize) -> usize {
        match &self.nodes[index] {
            Node::Leaf { .. } => 0,
            Node::Split { left, right, .. } => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
        }
    }
}

/// Index of the largest value; the first one wins ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

struct Builder<'a, R: ?Sized> {
    x: ArrayView2<'a, f64>,
    y: ArrayView1<'a, usize>,
    n_classes: usize,
    params: &'a TreeParams,
    rng: &'a mut R,
    nodes: Vec<Node>,
}

impl<R: Rng + ?Sized> Builder<'_, R> {
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let counts = self.class_counts(&samples);
        let at_max_depth = self.params.max_depth.is_some_and(|max| depth >= max);
        if samples.len() < self.params.min_samples_split
            || at_max_depth
            || gini(&counts, samples.len()) <= 0.0
        {
            return self.push_leaf(&counts, samples.len());
        }
        let Some(split) = self.best_split(&samples) else {
            return self.push_leaf(&counts, samples.len());
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .copied()
            .partition(|&row| self.x[[row, split.feature]] <= split.threshold);
        let index = self.nodes.len();
        self.nodes.push(Node::Leaf {
            distribution: Vec::new(),
        });
        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[index] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        index
    }

    fn push_leaf(&mut self, counts: &[usize], total: usize) -> usize {
        let total = total.max(1) as f64;
        self.nodes.push(Node::Leaf {
            distribution: counts.iter().map(|&count| count as f64 / total).collect(),
        });
        self.nodes.len() - 1
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &row in samples {
            counts[self.y[row]] += 1;
        }
        counts
    }

    /// Visit features in random order until `max_features` non-constant ones
    /// have been scored.
    fn best_split(&mut self, samples: &[usize]) -> Option<Split> {
        let n_features = self.x.ncols();
        let budget = self
            .params
            .max_features
            .unwrap_or(n_features)
            .clamp(1, n_features);
        let mut order: Vec<usize> = (0..n_features).collect();
        order.shuffle(&mut *self.rng);

        let mut best: Option<Split> = None;
        let mut scored = 0;
        for feature in order {
            if scored >= budget {
                break;
            }
            let Some(candidate) = self.best_split_on(samples, feature) else {
                continue;
            };
            scored += 1;
            if best.is_none_or(|current| candidate.impurity < current.impurity) {
                best = Some(candidate);
            }
        }
        best
    }

    fn best_split_on(&self, samples: &[usize], feature: usize) -> Option<Split> {
        let mut sorted: Vec<(f64, usize)> = samples
            .iter()
            .map(|&row| (self.x[[row, feature]], self.y[row]))
            .collect();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (first, last) = (sorted.first()?.0, sorted.last()?.0);
        if first == last {
            return None;
        }

        let n = sorted.len();
        let mut left = vec![0usize; self.n_classes];
        let mut right = vec![0usize; self.n_classes];
        for &(_, label) in &sorted {
            right[label] += 1;
        }

        let mut best: Option<Split> = None;
        for pos in 0..n - 1 {
            let label = sorted[pos].1;
            left[label] += 1;
            right[label] -= 1;
            let (here, next) = (sorted[pos].0, sorted[pos + 1].0);
            if here == next {
                continue;
            }
            let n_left = pos + 1;
            let n_right = n - n_left;
            let impurity = (n_left as f64 * gini(&left, n_left)
                + n_right as f64 * gini(&right, n_right))
                / n as f64;
            if best.is_none_or(|current| impurity < current.impurity) {
                let mut threshold = here + (next - here) / 2.0;
                if threshold >= next {
                    threshold = here;
                }
                best = Some(Split {
                    feature,
                    threshold,
                    impurity,
                });
            }
        }
        best
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total;
            p * p
        })
        .sum::<f64>()
}
