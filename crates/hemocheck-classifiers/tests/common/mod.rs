//! Artifact-store fixtures shared by the integration tests
//!
//! Scaling families (logistic, svm, knn) are fit in standardized space; the
//! rest operate on raw measurements.

#![allow(dead_code)]

use hemocheck_core::{ModelKind, Sample};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

pub fn anemic_sample() -> Sample {
    Sample::new(1, 9.5, 21.0, 29.0, 72.0).unwrap()
}

pub fn healthy_sample() -> Sample {
    Sample::new(0, 15.5, 30.0, 34.0, 92.0).unwrap()
}

pub fn scaler_doc() -> Value {
    json!({
        "mean": [0.5, 13.0, 27.0, 32.0, 88.0],
        "scale": [0.5, 2.0, 3.0, 1.5, 8.0]
    })
}

fn split(feature: usize, threshold: f64, left: usize, right: usize, impurity: f64, weight: f64) -> Value {
    json!({
        "type": "split", "feature": feature, "threshold": threshold,
        "left": left, "right": right, "impurity": impurity, "weighted_samples": weight
    })
}

fn leaf(value: f64, impurity: f64, weight: f64) -> Value {
    json!({"type": "leaf", "value": value, "impurity": impurity, "weighted_samples": weight})
}

fn stump(feature: usize, threshold: f64, left: f64, right: f64) -> Value {
    json!([
        split(feature, threshold, 1, 2, 0.5, 100.0),
        leaf(left, 0.2, 50.0),
        leaf(right, 0.2, 50.0)
    ])
}

fn main_tree() -> Value {
    json!([
        split(1, 12.0, 1, 2, 0.5, 200.0),
        split(4, 85.0, 3, 4, 0.3, 90.0),
        split(2, 24.0, 5, 6, 0.2, 110.0),
        leaf(0.95, 0.095, 70.0),
        leaf(0.7, 0.42, 20.0),
        leaf(0.45, 0.495, 15.0),
        leaf(0.03, 0.058, 95.0)
    ])
}

/// Classifier document for each family
pub fn model_doc(kind: ModelKind) -> Value {
    match kind {
        ModelKind::Logistic => json!({
            "coef": [0.3, -2.5, -0.4, -0.3, -0.5],
            "intercept": -0.2
        }),
        ModelKind::Svm => json!({
            "kernel": {"type": "rbf", "gamma": 0.1},
            "support_vectors": [
                [1.0, -1.5, -1.5, -1.5, -1.5],
                [-1.0, 1.2, 1.0, 1.0, 0.8]
            ],
            "dual_coef": [1.0, -1.0],
            "intercept": 0.0,
            "prob_a": -3.0,
            "prob_b": 0.0
        }),
        ModelKind::Knn => json!({
            "k": 3,
            "points": [
                [1.0, -1.5, -1.5, -1.5, -1.5],
                [1.0, -2.0, -2.0, -2.0, -2.0],
                [0.0, -1.8, -1.5, -1.7, -1.9],
                [0.0, 1.0, 1.0, 1.0, 0.5],
                [1.0, 1.2, 0.8, 1.0, 1.0],
                [-1.0, 1.5, 1.0, 1.3, 0.4]
            ],
            "labels": [1, 1, 1, 0, 0, 0]
        }),
        ModelKind::DecisionTree => json!({
            "n_features": 5,
            "nodes": main_tree()
        }),
        ModelKind::RandomForest => json!({
            "n_features": 5,
            "trees": [main_tree(), stump(1, 12.5, 0.9, 0.1), stump(3, 31.0, 0.8, 0.15)]
        }),
        ModelKind::GradientBoosting => json!({
            "n_features": 5,
            "init": -0.2,
            "learning_rate": 0.5,
            "trees": [stump(1, 12.0, 2.0, -2.0), stump(4, 80.0, 1.0, -1.0)]
        }),
        ModelKind::NaiveBayes => json!({
            "class_prior": [0.55, 0.45],
            "theta": [
                [0.4, 14.5, 29.0, 33.0, 90.0],
                [0.6, 10.5, 23.0, 30.0, 78.0]
            ],
            "var": [
                [0.24, 1.5, 4.0, 1.2, 25.0],
                [0.24, 1.8, 5.0, 1.5, 40.0]
            ]
        }),
    }
}

pub fn write_json(dir: &Path, file_name: &str, value: &Value) {
    let content = serde_json::to_string_pretty(value).unwrap();
    std::fs::write(dir.join(file_name), content).unwrap();
}

pub fn write_model(dir: &Path, kind: ModelKind) {
    write_json(dir, &format!("{}_model.json", kind), &model_doc(kind));
}

pub fn write_scaler(dir: &Path, kind: ModelKind) {
    write_json(dir, &format!("{}_scaler.json", kind), &scaler_doc());
}

/// Every family's model, scalers for the scaling families, plus a stray
/// scaler for random_forest that must never be applied
pub fn artifact_store() -> TempDir {
    let dir = TempDir::new().unwrap();
    for kind in ModelKind::ALL {
        write_model(dir.path(), kind);
        if kind.requires_scaling() {
            write_scaler(dir.path(), kind);
        }
    }
    write_scaler(dir.path(), ModelKind::RandomForest);
    dir
}
