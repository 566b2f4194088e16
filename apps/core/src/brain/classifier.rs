//! Intent classifier: multinomial logistic regression over TF-IDF rows.
//!
//! Minimizes `0.5 * ||W||^2 + C * sum(cross_entropy)` with linfa's L-BFGS
//! solver. linfa writes the same objective as
//! `sum(cross_entropy) + 0.5 * alpha * ||W||^2`, so `alpha = 1 / C`.
//! Intercepts are not penalized. Training is deterministic.

use linfa::traits::Fit;
use linfa::DatasetBase;
use linfa_logistic::{MultiFittedLogisticRegression, MultiLogisticRegression};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

use super::vectorizer::SparseRow;
use crate::error::AppError;

/// Stop once the gradient norm is below this value
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Hyper-parameters for [`LogisticRegression::fit`]
#[derive(Debug, Clone, Copy)]
pub struct TrainingOptions {
    /// Inverse regularization strength
    pub c: f64,
    /// Iteration cap
    pub max_iter: usize,
    /// Gradient tolerance
    pub tol: f64,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 10_000,
            tol: DEFAULT_TOLERANCE,
        }
    }
}

/// Output of the classifier for one input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Winning tag
    pub tag: String,
    /// Probability of the winning tag (0.0 - 1.0)
    pub confidence: f64,
    /// Probability of every tag, in class order
    pub probabilities: Vec<(String, f64)>,
}

impl Prediction {
    /// The `k` most likely tags, best first
    pub fn top_k(&self, k: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .map(|(tag, p)| (tag.as_str(), *p))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(k);
        ranked
    }
}

/// Trained multinomial logistic regression model
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    classes: Vec<String>,
    n_features: usize,
    fitted: MultiFittedLogisticRegression<f64, usize>,
}

impl LogisticRegression {
    /// Train on sparse rows and their labels
    pub fn fit(
        rows: &[SparseRow],
        labels: &[&str],
        n_features: usize,
        options: &TrainingOptions,
    ) -> Result<Self, AppError> {
        if rows.is_empty() {
            return Err(AppError::Training("no training samples".to_string()));
        }
        if rows.len() != labels.len() {
            return Err(AppError::Internal(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }

        let classes: Vec<String> = labels
            .iter()
            .copied()
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect();
        if classes.len() < 2 {
            return Err(AppError::Training(format!(
                "needs samples of at least 2 classes, got {}",
                classes.len()
            )));
        }

        // Class indices follow the sorted tag order, so linfa's sorted
        // classes line up with `classes`
        let targets: Array1<usize> = labels
            .iter()
            .map(|label| classes.iter().position(|c| c == label).unwrap_or(0))
            .collect();
        let dataset = DatasetBase::new(dense(rows, n_features), targets);

        let fitted = MultiLogisticRegression::default()
            .alpha(1.0 / options.c)
            .max_iterations(options.max_iter as u64)
            .gradient_tolerance(options.tol)
            .with_intercept(true)
            .fit(&dataset)
            .map_err(|e| AppError::Training(format!("logistic regression fit failed: {}", e)))?;

        info!(
            "Classifier trained ({} classes, {} features, {} samples)",
            classes.len(),
            n_features,
            rows.len()
        );

        Ok(Self {
            classes,
            n_features,
            fitted,
        })
    }

    /// Probability of every class, in class order
    pub fn predict_proba(&self, row: &SparseRow) -> Vec<f64> {
        let x = dense(std::slice::from_ref(row), self.n_features);
        let proba = self.fitted.predict_probabilities(&x);

        let mut out = vec![0.0; self.classes.len()];
        for (column, class) in self.fitted.classes().iter().enumerate() {
            if let Some(slot) = out.get_mut(*class) {
                *slot = proba[[0, column]];
            }
        }
        out
    }

    /// Most likely class; ties go to the first class in sorted order
    pub fn predict(&self, row: &SparseRow) -> Prediction {
        let probabilities = self.predict_proba(row);

        let mut best = 0;
        for (class, p) in probabilities.iter().enumerate() {
            if *p > probabilities[best] {
                best = class;
            }
        }

        Prediction {
            tag: self.classes[best].clone(),
            confidence: probabilities[best],
            probabilities: self.classes.iter().cloned().zip(probabilities).collect(),
        }
    }

    /// Known tags, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

/// Expand sparse rows into a dense matrix; features past `n_features` are dropped
fn dense(rows: &[SparseRow], n_features: usize) -> Array2<f64> {
    let mut x = Array2::zeros((rows.len(), n_features));
    for (i, row) in rows.iter().enumerate() {
        for &(feature, value) in row {
            if feature < n_features {
                x[[i, feature]] = value;
            }
        }
    }
    x
}
