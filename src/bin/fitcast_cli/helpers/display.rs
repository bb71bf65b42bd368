// ABOUTME: Output formatting helpers for fitcast-cli
// ABOUTME: Consistent display of training results and artifact status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fitcast_intelligence::{ArtifactStatus, TrainedModelArtifact};
use std::path::Path;
use std::time::Duration;

/// Summarise a freshly trained artifact
pub fn display_trained(path: &Path, artifact: &TrainedModelArtifact, elapsed: Duration) {
    println!("\nFitness model trained");
    println!("{}", "=".repeat(60));
    display_artifact(artifact);
    println!("   Training time: {:.1}s", elapsed.as_secs_f64());
    println!("   Saved to: {}", path.display());
    println!("{}", "=".repeat(60));
}

/// Describe the artifact state at `path`
pub fn display_status(path: &Path, status: &ArtifactStatus) {
    println!("\nModel artifact: {}", path.display());
    println!("{}", "=".repeat(60));
    println!("   Status: {}", status.label());
    match status {
        ArtifactStatus::Absent => {
            println!("   No artifact found; the server trains one at startup.");
        }
        ArtifactStatus::Corrupt(reason) => {
            println!("   Reason: {reason}");
            println!("   Run `fitcast-cli train --force` to replace it.");
        }
        ArtifactStatus::Loaded(artifact) => display_artifact(artifact),
    }
    println!("{}", "=".repeat(60));
}

fn display_artifact(artifact: &TrainedModelArtifact) {
    println!("   Format version: {}", artifact.format_version);
    println!(
        "   Created: {}",
        artifact.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("   Training rows: {}", artifact.n_training_samples);
    println!(
        "   Trees: {} (weight change), {} (fitness score)",
        artifact.weight_change_model.tree_count(),
        artifact.fitness_score_model.tree_count()
    );
    println!(
        "   Encoded features: {}",
        artifact.preprocessor.output_width()
    );
}
