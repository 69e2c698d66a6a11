use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use scribe_features::{
    essay::{Essay, EssayRecord, validate_records},
    table::{ESSAY_ID_COLUMN, FeatureTable, SCORE_COLUMN},
};
use scribe_text::{spelling::SpellDictionary, stopwords::StopWords};

use crate::schema::feature_model::FeatureModel;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn read_feature_model_file<P>(path: P) -> anyhow::Result<FeatureModel>
where
    P: AsRef<Path>,
{
    read_json_file("feature model", path)
}

pub fn load_dictionary(path: &Path) -> anyhow::Result<SpellDictionary> {
    let dictionary = SpellDictionary::load(path)
        .with_context(|| format!("Failed to load spelling dictionary: {}", path.display()))?;
    tracing::info!(path = %path.display(), words = dictionary.len(), "loaded spelling dictionary");
    Ok(dictionary)
}

pub fn load_stop_words(path: Option<&Path>) -> anyhow::Result<StopWords> {
    let Some(path) = path else {
        return Ok(StopWords::english());
    };
    let stop_words = StopWords::from_file(path)
        .with_context(|| format!("Failed to load stopwords: {}", path.display()))?;
    tracing::info!(path = %path.display(), words = stop_words.len(), "loaded stopwords");
    Ok(stop_words)
}

/// Reads and validates an essay CSV.
///
/// Empty `full_text` cells are treated as missing and rejected.
pub fn read_essays_csv<P>(path: P) -> anyhow::Result<Vec<Essay>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open essay CSV file: {}", path.display()))?;
    let records = reader
        .deserialize::<EssayRecord>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to parse essay CSV file: {}", path.display()))?;
    let essays = validate_records(records)
        .with_context(|| format!("Invalid essay in {}", path.display()))?;
    tracing::info!(path = %path.display(), essays = essays.len(), "read essays");
    Ok(essays)
}

/// Writes `essay_id`, the score column when present, then every feature.
///
/// Missing values are written as empty cells.
pub fn write_features_csv<W>(writer: W, table: &FeatureTable) -> anyhow::Result<()>
where
    W: io::Write,
{
    let mut out = csv::Writer::from_writer(writer);
    let scores = table.scores();

    let mut header = vec![ESSAY_ID_COLUMN.to_owned()];
    if scores.is_some() {
        header.push(SCORE_COLUMN.to_owned());
    }
    header.extend(table.feature_names());
    out.write_record(&header)
        .context("Failed to write feature CSV header")?;

    let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for (row, essay_id) in table.essay_ids().iter().enumerate() {
        let mut record = vec![essay_id.clone()];
        if let Some(scores) = scores {
            record.push(cell(scores[row]));
        }
        record.extend(table.row(row).map(cell));
        out.write_record(&record)
            .with_context(|| format!("Failed to write feature row for {essay_id}"))?;
    }
    out.flush().context("Failed to flush feature CSV")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_read_essays_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("train.csv");
        fs::write(
            &path,
            "essay_id,full_text,score\nb,\"Second essay.\n\nWith two paragraphs.\",3\na,First essay.,\n",
        )
        .unwrap();

        let essays = read_essays_csv(&path).unwrap();
        assert_eq!(essays.len(), 2);
        assert_eq!(essays[0].essay_id, "b");
        assert_eq!(essays[0].full_text, "Second essay.\n\nWith two paragraphs.");
        assert_eq!(essays[0].score, Some(3.0));
        assert_eq!(essays[1].score, None);
    }

    #[test]
    fn test_read_essays_csv_without_score_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");
        fs::write(&path, "essay_id,full_text\nx,Some text.\n").unwrap();

        let essays = read_essays_csv(&path).unwrap();
        assert_eq!(essays, [Essay::new("x", "Some text.")]);
    }

    #[test]
    fn test_read_essays_csv_rejects_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "essay_id,full_text\nx,\n").unwrap();

        let err = read_essays_csv(&path).unwrap_err();
        assert!(format!("{err:#}").contains("no full_text"));
    }

    #[test]
    fn test_read_essays_csv_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        fs::write(&path, "essay_id,full_text\nx,One.\nx,Two.\n").unwrap();

        let err = read_essays_csv(&path).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate essay_id 'x'"));
    }

    #[test]
    fn test_write_features_csv() {
        let mut table = FeatureTable::from_essays(&[
            Essay::new("a", "text").with_score(2.0),
            Essay::new("b", "text"),
        ]);
        table.push_column("f1", vec![Some(1.5), None]).unwrap();
        table.push_column("f2", vec![Some(0.0), Some(3.0)]).unwrap();

        let mut buf = vec![];
        write_features_csv(&mut buf, &table).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "essay_id,score,f1,f2\na,2,1.5,0\nb,,,3\n"
        );
    }

    #[test]
    fn test_load_stop_words_defaults_to_english() {
        let stop_words = load_stop_words(None).unwrap();
        assert_eq!(stop_words, StopWords::english());
    }
}
