use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    /// Stop the run after the first failing unit.
    #[serde(default)]
    pub stop_on_failure: bool,
    /// Keep only units whose name or suite contains this fragment.
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct ReportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

pub fn default_output_dir() -> PathBuf {
    PathBuf::from("./cohort-report")
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct CohortConfig {
    #[serde(default)]
    pub run: Option<RunSettings>,
    #[serde(default)]
    pub report: Option<ReportSettings>,
}

impl CohortConfig {
    pub fn load_from_file(path: &PathBuf) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file at {:?}: {}", path, e))?;

        let config: CohortConfig = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse TOML from config file {:?}: {}", path, e)
        })?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_a_full_config() {
        let toml_str = r#"
            [run]
            stop-on-failure = true
            filter = "parser"

            [report]
            output-dir = "./out"
        "#;
        let config: CohortConfig = toml::from_str(toml_str).expect("valid config");

        let run = config.run.expect("run section present");
        assert!(run.stop_on_failure);
        assert_eq!(run.filter.as_deref(), Some("parser"));
        let report = config.report.expect("report section present");
        assert_eq!(report.output_dir, PathBuf::from("./out"));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: CohortConfig = toml::from_str("").expect("empty config is valid");
        assert!(config.run.is_none());
        assert!(config.report.is_none());

        let run = RunSettings::default();
        assert!(!run.stop_on_failure);
        assert!(run.filter.is_none());
        assert_eq!(
            ReportSettings::default().output_dir,
            PathBuf::from("./cohort-report")
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let toml_str = r#"
            [run]
            stop-on-failure = true
            retries = 3
        "#;
        assert!(toml::from_str::<CohortConfig>(toml_str).is_err());
    }

    #[test]
    fn load_from_file_reads_and_parses() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[run]\nstop-on-failure = true").expect("write config");

        let path = file.path().to_path_buf();
        let config = CohortConfig::load_from_file(&path).expect("load config");
        assert!(config.run.expect("run section").stop_on_failure);
    }

    #[test]
    fn load_from_file_reports_a_missing_file() {
        let path = PathBuf::from("./definitely_not_here_cohort.toml");
        let err = CohortConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
