//! Random forest regressor
//!
//! An ensemble of CART regression trees, each grown on a bootstrap sample of
//! the training set. Splits minimize the summed squared error of the two
//! children; every feature is considered at every node (in a seeded random
//! order, which only matters for breaking ties). Trees grow until a node is
//! pure or has fewer than `min_samples_split` samples. The forest predicts
//! the mean of its trees.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

use super::features::{FeatureRow, FEATURE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub min_samples_split: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            min_samples_split: 2,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    cost: f64,
}

/// A single regression tree stored as a flat node arena; node 0 is the root
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    fn fit(
        rows: &[FeatureRow],
        targets: &[f64],
        sample: &[usize],
        min_samples_split: usize,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(rows, targets, sample, min_samples_split, rng);
        tree
    }

    fn grow(
        &mut self,
        rows: &[FeatureRow],
        targets: &[f64],
        sample: &[usize],
        min_samples_split: usize,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        let value = sample.iter().map(|&i| targets[i]).sum::<f64>() / sample.len() as f64;
        self.nodes.push(Node::Leaf { value });

        let pure = sample.iter().all(|&i| targets[i] == targets[sample[0]]);
        if sample.len() < min_samples_split || pure {
            return id;
        }

        let Some(split) = best_split(rows, targets, sample, rng) else {
            return id;
        };

        let (left_sample, right_sample): (Vec<usize>, Vec<usize>) = sample
            .iter()
            .partition(|&&i| rows[i][split.feature] <= split.threshold);

        let left = self.grow(rows, targets, &left_sample, min_samples_split, rng);
        let right = self.grow(rows, targets, &right_sample, min_samples_split, rng);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn depth_of(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => {
                    1 + depth_of(nodes, *left).max(depth_of(nodes, *right))
                }
            }
        }
        depth_of(&self.nodes, 0)
    }
}

/// Find the split with the lowest summed child squared error
fn best_split(
    rows: &[FeatureRow],
    targets: &[f64],
    sample: &[usize],
    rng: &mut StdRng,
) -> Option<SplitCandidate> {
    let mut features: Vec<usize> = (0..FEATURE_COUNT).collect();
    features.shuffle(rng);

    let n = sample.len();
    let total_sum: f64 = sample.iter().map(|&i| targets[i]).sum();
    let total_sq: f64 = sample.iter().map(|&i| targets[i] * targets[i]).sum();

    let mut best: Option<SplitCandidate> = None;
    let mut pairs: Vec<(f64, f64)> = Vec::with_capacity(n);

    for feature in features {
        pairs.clear();
        pairs.extend(sample.iter().map(|&i| (rows[i][feature], targets[i])));
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;
        for k in 0..n - 1 {
            let (x, y) = pairs[k];
            left_sum += y;
            left_sq += y * y;

            let next_x = pairs[k + 1].0;
            if x == next_x {
                continue;
            }

            let left_n = (k + 1) as f64;
            let right_n = (n - k - 1) as f64;
            let right_sum = total_sum - left_sum;
            let right_sq = total_sq - left_sq;
            let cost = (left_sq - left_sum * left_sum / left_n)
                + (right_sq - right_sum * right_sum / right_n);

            if best.as_ref().map_or(true, |b| cost < b.cost) {
                best = Some(SplitCandidate {
                    feature,
                    threshold: (x + next_x) / 2.0,
                    cost,
                });
            }
        }
    }

    best
}

/// Bagged ensemble of regression trees
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
}

impl RandomForestRegressor {
    pub fn fit(rows: &[FeatureRow], targets: &[f64], params: &ForestParams) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::Training("Cannot fit a forest on zero samples".into()));
        }
        if rows.len() != targets.len() {
            return Err(Error::Training(format!(
                "Feature/target length mismatch: {} rows, {} targets",
                rows.len(),
                targets.len()
            )));
        }
        if params.n_estimators == 0 {
            return Err(Error::Training("n_estimators must be at least 1".into()));
        }
        if rows.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
            return Err(Error::Training("Training data contains non-finite values".into()));
        }

        let n = rows.len();
        let mut master = StdRng::seed_from_u64(params.seed);
        let trees = (0..params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                RegressionTree::fit(rows, targets, &bootstrap, params.min_samples_split.max(2), &mut rng)
            })
            .collect();

        Ok(Self { trees })
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.trees.iter().map(|t| t.predict(row)).sum::<f64>() / self.trees.len() as f64
    }

    pub fn predict_many(&self, rows: &[FeatureRow]) -> Vec<f64> {
        rows.iter().map(|r| self.predict(r)).collect()
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}
