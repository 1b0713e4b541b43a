use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Scenario description loaded from a YAML file. Relative paths inside the
/// config are resolved against the directory the config file lives in, see
/// [`crate::io::resolve_path`].
#[derive(Serialize, Deserialize, Debug)]
pub struct Config {
    pub network: NetworkConfig,
    pub landmarks: LandmarksConfig,
    #[serde(default)]
    pub poi: Option<PathBuf>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(skip)]
    context: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NetworkConfig {
    pub nodes: PathBuf,
    pub edges: PathBuf,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LandmarksConfig {
    /// Where the preprocessed table is written to and read from.
    pub table: PathBuf,
    /// Landmark node ids. Leave empty to let the preprocessing pick seeded
    /// random ones.
    #[serde(default)]
    pub ids: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
            logging: Logging::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Logging {
    #[default]
    Info,
    None,
}

impl Config {
    pub fn from_file(path: &Path) -> Config {
        let file = File::open(path)
            .unwrap_or_else(|e| panic!("Could not open config file {path:?}: {e}"));
        let mut config: Config = serde_yaml::from_reader(BufReader::new(file))
            .unwrap_or_else(|e| panic!("Could not parse config file {path:?}: {e}"));
        config.context = path.parent().map(|parent| parent.to_path_buf());
        config
    }

    pub fn context(&self) -> &Option<PathBuf> {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let yaml = "\
network:
  nodes: nodes.txt
  edges: edges.txt
landmarks:
  table: landmarks.txt
  ids: [0, 42]
poi: pois.txt
output:
  dir: out
  logging: none
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.network.nodes, PathBuf::from("nodes.txt"));
        assert_eq!(config.landmarks.ids, vec![0, 42]);
        assert_eq!(config.poi, Some(PathBuf::from("pois.txt")));
        assert_eq!(config.output.logging, Logging::None);
    }

    #[test]
    fn defaults_are_filled_in() {
        let yaml = "\
network:
  nodes: nodes.txt
  edges: edges.txt
landmarks:
  table: landmarks.txt
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.landmarks.ids.is_empty());
        assert_eq!(config.poi, None);
        assert_eq!(config.output.dir, PathBuf::from("./output"));
        assert_eq!(config.output.logging, Logging::Info);
    }
}
