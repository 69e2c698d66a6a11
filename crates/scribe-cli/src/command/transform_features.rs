use std::path::PathBuf;

use chrono::Utc;

use crate::{
    schema::feature_model::FeatureManifest,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TransformFeaturesArg {
    /// Held-out CSV with `essay_id` and `full_text` columns
    #[arg(long)]
    input: PathBuf,
    /// Spelling dictionary (JSON word frequencies or a word list)
    #[arg(long)]
    dictionary: PathBuf,
    /// Fitted model JSON written by `build-features`
    #[arg(long)]
    model: PathBuf,
    /// Output feature CSV
    #[arg(long)]
    output: PathBuf,
    /// Output manifest JSON
    #[arg(long)]
    manifest: Option<PathBuf>,
}

pub(crate) fn run(arg: &TransformFeaturesArg) -> anyhow::Result<()> {
    let TransformFeaturesArg {
        input,
        dictionary,
        model,
        output,
        manifest,
    } = arg;

    let dictionary = util::load_dictionary(dictionary)?;
    let model = util::read_feature_model_file(model)?;
    tracing::info!(
        fitted_at = %model.fitted_at,
        essay_count = model.essay_count,
        "loaded fitted model"
    );
    let essays = util::read_essays_csv(input)?;

    let features = model.into_pipeline().transform(&essays, &dictionary)?;

    let mut out = Output::open(output.clone())?;
    util::write_features_csv(&mut out, &features.table)?;
    tracing::info!(
        path = %out.display_path(),
        rows = features.table.len(),
        features = features.feature_names.len(),
        "wrote feature table"
    );

    if let Some(path) = manifest {
        Output::save_json(
            &FeatureManifest::new(Utc::now(), &features),
            Some(path.clone()),
        )?;
    }
    Ok(())
}
