// ABOUTME: CART regression tree with variance-reduction splits over a flat node arena
// ABOUTME: Split search sorts each feature once per node and scans prefix sums of the targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Growth limits shared by every tree in a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum depth; unlimited when `None`
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it may split
    pub min_samples_split: usize,
    /// Minimum samples on each side of a split
    pub min_samples_leaf: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }
}

/// A node in the arena; children are arena indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Internal node: rows with `x[feature] <= threshold` go left
    Split {
        /// Feature column
        feature: usize,
        /// Split threshold (midpoint between adjacent training values)
        threshold: f64,
        /// Left child index
        left: usize,
        /// Right child index
        right: usize,
    },
    /// Terminal node predicting the mean target of its samples
    Leaf {
        /// Predicted value
        value: f64,
        /// Training samples that reached this leaf
        samples: usize,
    },
}

/// Fitted regression tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<TreeNode>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Sorted sample indices for `feature`; the first `left_len` go left
    order: Vec<usize>,
    left_len: usize,
}

struct Builder<'a> {
    x: &'a [Vec<f64>],
    y: &'a [f64],
    params: TreeParams,
    nodes: Vec<TreeNode>,
}

impl Builder<'_> {
    fn leaf(&self, samples: &[usize]) -> TreeNode {
        let sum: f64 = samples.iter().map(|&i| self.y[i]).sum();
        TreeNode::Leaf {
            value: sum / samples.len() as f64,
            samples: samples.len(),
        }
    }

    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(self.leaf(&samples));

        let depth_reached = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_reached || samples.len() < self.params.min_samples_split {
            return id;
        }
        let Some(split) = self.best_split(&samples) else {
            return id;
        };
        drop(samples);

        let mut order = split.order;
        let right_samples = order.split_off(split.left_len);
        let left = self.grow(order, depth + 1);
        let right = self.grow(right_samples, depth + 1);
        self.nodes[id] = TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    /// Best variance-reducing split across all features, if any improves on the parent
    ///
    /// Minimising the children's summed squared error is equivalent to maximising
    /// `S_l^2 / n_l + S_r^2 / n_r` where `S` is the target sum on each side.
    fn best_split(&self, samples: &[usize]) -> Option<BestSplit> {
        let n = samples.len();
        let min_leaf = self.params.min_samples_leaf.max(1);
        if n < 2 * min_leaf {
            return None;
        }

        let total: f64 = samples.iter().map(|&i| self.y[i]).sum();
        let parent_score = total * total / n as f64;
        let n_features = self.x.first().map_or(0, Vec::len);

        let mut best: Option<(f64, usize, f64, Vec<usize>, usize)> = None;
        let mut order = samples.to_vec();
        for feature in 0..n_features {
            order.sort_by(|&a, &b| {
                self.x[a][feature]
                    .partial_cmp(&self.x[b][feature])
                    .unwrap_or(Ordering::Equal)
            });

            let mut left_sum = 0.0;
            let mut found: Option<(f64, usize, f64)> = None;
            for left_len in 1..n {
                left_sum += self.y[order[left_len - 1]];
                if left_len < min_leaf || n - left_len < min_leaf {
                    continue;
                }
                let lo = self.x[order[left_len - 1]][feature];
                let hi = self.x[order[left_len]][feature];
                if hi <= lo {
                    continue;
                }
                let right_sum = total - left_sum;
                let score = left_sum * left_sum / left_len as f64
                    + right_sum * right_sum / (n - left_len) as f64;
                if found.map_or(true, |(s, _, _)| score > s) {
                    found = Some((score, left_len, lo + (hi - lo) / 2.0));
                }
            }

            if let Some((score, left_len, threshold)) = found {
                let improves = score > parent_score + 1e-12 * parent_score.abs().max(1.0);
                let better = best.as_ref().map_or(true, |(s, ..)| score > *s);
                if improves && better {
                    best = Some((score, feature, threshold, order.clone(), left_len));
                }
            }
        }

        best.map(|(_, feature, threshold, order, left_len)| BestSplit {
            feature,
            threshold,
            order,
            left_len,
        })
    }
}

impl RegressionTree {
    /// Grow a tree on the rows of `x` selected by `samples` (duplicates allowed)
    ///
    /// Callers guarantee `samples` is non-empty and every index is in bounds.
    #[must_use]
    pub fn fit(x: &[Vec<f64>], y: &[f64], samples: Vec<usize>, params: TreeParams) -> Self {
        let mut builder = Builder {
            x,
            y,
            params,
            nodes: Vec::new(),
        };
        builder.grow(samples, 0);
        Self {
            nodes: builder.nodes,
        }
    }

    /// Predict one encoded row
    #[must_use]
    pub fn predict_row(&self, row: &[f64]) -> f64 {
        let mut index = 0;
        // a well-formed path visits each node at most once
        for _ in 0..self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).copied().unwrap_or(0.0);
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value, .. }) => return *value,
                None => break,
            }
        }
        0.0
    }

    /// Whether every child index points forward and inside the arena
    ///
    /// Trees grown by [`RegressionTree::fit`] always satisfy this; a tree read
    /// from disk may not.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().enumerate().all(|(index, node)| match node {
                TreeNode::Split { left, right, .. } => {
                    *left > index
                        && *right > index
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                }
                TreeNode::Leaf { .. } => true,
            })
    }

    /// Number of nodes
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth of the deepest leaf (a single leaf has depth 0)
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0_usize, 0_usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.nodes.get(index) {
                Some(TreeNode::Split { left, right, .. }) => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
                Some(TreeNode::Leaf { .. }) => deepest = deepest.max(depth),
                None => {}
            }
        }
        deepest
    }
}
