use std::io::{self, Read as _};

use anyhow::Context;
use scribe_text::normalize::TextVariant;
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct NormalizeTextArg {
    /// Text to normalize [default: read from stdin]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct NormalizedText {
    variant: &'static str,
    suffix: &'static str,
    text: String,
}

pub(crate) fn run(arg: &NormalizeTextArg) -> anyhow::Result<()> {
    let text = match &arg.text {
        Some(text) => text.clone(),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read text from stdin")?;
            text
        }
    };

    let variants = TextVariant::ALL
        .iter()
        .map(|variant| NormalizedText {
            variant: variant.name(),
            suffix: variant.column_suffix(),
            text: variant.apply(&text),
        })
        .collect::<Vec<_>>();
    Output::save_json(&variants, None)
}
