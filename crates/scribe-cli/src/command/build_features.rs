use std::path::PathBuf;

use chrono::Utc;
use scribe_features::{config::PipelineConfig, pipeline::FeaturePipeline};

use crate::{
    schema::feature_model::{FeatureManifest, FeatureModel},
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BuildFeaturesArg {
    /// Training CSV with `essay_id`, `full_text` and optional `score` columns
    #[arg(long)]
    input: PathBuf,
    /// Spelling dictionary (JSON word frequencies or a word list)
    #[arg(long)]
    dictionary: PathBuf,
    /// Stopword list, one word per line [default: built-in English list]
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Pipeline configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output feature CSV
    #[arg(long)]
    output: PathBuf,
    /// Output manifest JSON
    #[arg(long)]
    manifest: Option<PathBuf>,
    /// Output fitted model JSON
    #[arg(long)]
    model: Option<PathBuf>,
}

pub(crate) fn run(arg: &BuildFeaturesArg) -> anyhow::Result<()> {
    let BuildFeaturesArg {
        input,
        dictionary,
        stopwords,
        config,
        output,
        manifest,
        model,
    } = arg;

    let dictionary = util::load_dictionary(dictionary)?;
    let stop_words = util::load_stop_words(stopwords.as_deref())?;
    let config = match config {
        Some(path) => util::read_json_file("pipeline config", path)?,
        None => PipelineConfig::default(),
    };
    let essays = util::read_essays_csv(input)?;

    let pipeline = FeaturePipeline::new(config, &dictionary, &stop_words);
    let (features, fitted) = pipeline.fit_transform(&essays)?;

    let mut out = Output::open(output.clone())?;
    util::write_features_csv(&mut out, &features.table)?;
    tracing::info!(
        path = %out.display_path(),
        rows = features.table.len(),
        features = features.feature_names.len(),
        "wrote feature table"
    );

    let now = Utc::now();
    if let Some(path) = manifest {
        Output::save_json(
            &FeatureManifest::new(now, &features),
            Some(path.clone()),
        )?;
    }
    if let Some(path) = model {
        Output::save_json(
            &FeatureModel::new(now, essays.len(), fitted),
            Some(path.clone()),
        )?;
        tracing::info!(path = %path.display(), "wrote fitted model");
    }
    Ok(())
}
