use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use colscan_analysis::config::AnalysisConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `colscan_analysis=trace`).
const LOG_ENV: &str = "COLSCAN_LOG";

/// Installs the stderr log subscriber; defaults to `info` when `COLSCAN_LOG` is unset.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

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
    pub fn from_output_path(output_path: Option<&Path>) -> anyhow::Result<Self> {
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

    pub fn open(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path: path.to_owned(),
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.finish()
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))
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

/// Read analysis settings from a JSON file
///
/// Fields missing from the file keep their defaults.
pub fn read_config_file<P>(path: P) -> anyhow::Result<AnalysisConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_read_partial_config_file() {
        let path = std::env::temp_dir().join(format!("colscan-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "parallel": false }"#).unwrap();
        let config = read_config_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(!config.parallel);
        assert_eq!(config.max_degree, AnalysisConfig::DEFAULT_MAX_DEGREE);
    }

    #[test]
    fn test_malformed_config_names_the_file() {
        let path = std::env::temp_dir().join(format!("colscan-bad-{}.json", std::process::id()));
        fs::write(&path, "not json").unwrap();
        let err = read_config_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(err.to_string().contains("Failed to parse config JSON file"));
    }
}
