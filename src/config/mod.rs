//! Generator configuration.
//!
//! Values come from defaults, then an optional TOML file, then command line flags. Every
//! field has a default, so an empty file is a valid configuration. Only the merged result
//! is validated, so a flag can replace a bad value from the file.
//!
//! ```toml
//! embedding = "auto"
//! order = "sorted"
//!
//! [output]
//! dir = "components/web_server/include/web_server/"
//! file = "server.{ext}"
//!
//! [server]
//! tag = "webserver"
//!
//! [[alias]]
//! source = "/index.html"
//! route = "/"
//! ```

pub mod validation;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::diagnostics::GenerateError;

/// Placeholder in the output file template that selects the document kind.
pub const EXT_PLACEHOLDER: &str = "{ext}";
pub const INTERFACE_EXT: &str = "h";
pub const IMPLEMENTATION_EXT: &str = "c";

pub const DEFAULT_OUTPUT_DIR: &str = "components/web_server/include/web_server/";
pub const DEFAULT_OUTPUT_FILE: &str = "server.{ext}";
pub const DEFAULT_TAG: &str = "webserver";

/// The file that is also served at `/` unless configured otherwise.
pub const INDEX_PATH: &str = "/index.html";

/// How file contents are written into the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Embedding {
    /// String literal for text files, byte array for everything else.
    #[default]
    Auto,
    /// Always an escaped string literal. Binary content may not compile.
    String,
    /// Always a byte array.
    Bytes,
}

/// Order in which directory entries are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Entries of each directory sorted by name.
    #[default]
    Sorted,
    /// Whatever order the filesystem lists entries in.
    Listing,
}

/// Serve the file at `source` under the additional path `route`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AliasRule {
    pub source: String,
    pub route: String,
}

impl AliasRule {
    pub fn new<S, R>(source: S, route: R) -> Self
    where
        S: ToString,
        R: ToString,
    {
        Self {
            source: source.to_string(),
            route: route.to_string(),
        }
    }

    /// `/index.html` served at `/`.
    pub fn index() -> Self {
        Self::new(INDEX_PATH, "/")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory both documents are written to.
    pub dir: PathBuf,

    /// File name template. `{ext}` is replaced by `h` or `c`.
    pub file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl OutputConfig {
    pub fn file_name(&self, ext: &str) -> String {
        self.file.replace(EXT_PLACEHOLDER, ext)
    }

    pub fn interface_file_name(&self) -> String {
        self.file_name(INTERFACE_EXT)
    }

    pub fn interface_path(&self) -> PathBuf {
        self.dir.join(self.interface_file_name())
    }

    pub fn implementation_path(&self) -> PathBuf {
        self.dir.join(self.file_name(IMPLEMENTATION_EXT))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Log tag used by the generated server code.
    pub tag: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_TAG.to_string(),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub embedding: Embedding,
    pub order: TraversalOrder,
    pub output: OutputConfig,
    pub server: ServerConfig,
    #[serde(rename = "alias")]
    pub aliases: Vec<AliasRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embedding: Embedding::default(),
            order: TraversalOrder::default(),
            output: OutputConfig::default(),
            server: ServerConfig::default(),
            aliases: vec![AliasRule::index()],
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text. Does not validate.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Read and parse a configuration file. Validation happens after flags are applied.
pub fn read_config(path: &Path) -> Result<Config, GenerateError> {
    let text = fs::read_to_string(path).map_err(|source| GenerateError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    let config = Config::from_toml(&text).map_err(|source| GenerateError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}
