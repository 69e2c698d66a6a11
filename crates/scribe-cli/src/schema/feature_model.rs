use chrono::{DateTime, Utc};
use scribe_features::{
    config::PipelineConfig,
    pipeline::{FeatureSet, FittedPipeline},
    vectorize::FittedVectorizers,
};
use serde::{Deserialize, Serialize};

/// A fitted pipeline saved by `build-features` and loaded by `transform-features`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureModel {
    pub fitted_at: DateTime<Utc>,
    /// Number of training essays the vectorizers were fitted on.
    pub essay_count: usize,
    pub config: PipelineConfig,
    pub vectorizers: FittedVectorizers,
}

impl FeatureModel {
    pub fn new(fitted_at: DateTime<Utc>, essay_count: usize, fitted: FittedPipeline) -> Self {
        let FittedPipeline {
            config,
            vectorizers,
        } = fitted;
        Self {
            fitted_at,
            essay_count,
            config,
            vectorizers,
        }
    }

    pub fn into_pipeline(self) -> FittedPipeline {
        FittedPipeline {
            config: self.config,
            vectorizers: self.vectorizers,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeatureManifest {
    pub generated_at: DateTime<Utc>,
    pub essay_count: usize,
    pub feature_names: Vec<String>,
}

impl FeatureManifest {
    pub fn new(generated_at: DateTime<Utc>, features: &FeatureSet) -> Self {
        Self {
            generated_at,
            essay_count: features.table.len(),
            feature_names: features.feature_names.clone(),
        }
    }
}
