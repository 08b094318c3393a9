//! The httpd-embed cli.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use termion::terminal_size;

use crate::config::{Config, Embedding, TraversalOrder};

/// Embed a directory of static files into C source for the ESP-IDF http server
#[derive(Debug, Parser)]
#[command(name = "httpd-embed", version)]
pub struct Opts {
    /// Be verbose
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the server sources
    #[clap(aliases = &["gen", "build"])]
    Generate(GenerateOpts),

    /// Print the route table without writing anything
    #[clap(alias = "ls")]
    Routes(RoutesOpts),
}

/// Options shared by every command reading a site.
#[derive(Debug, Clone, clap::Args)]
pub struct SiteOpts {
    /// Directory holding the site.
    #[arg(required = true)]
    pub(crate) input_dir: PathBuf,

    /// How file contents are embedded.
    #[arg(short, long)]
    pub(crate) embedding: Option<Embedding>,

    /// Keep the order in which the filesystem lists directory entries.
    #[arg(long)]
    pub(crate) listing_order: bool,
}

impl SiteOpts {
    #[cfg(test)]
    pub fn from_dir<P>(input_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            input_dir: input_dir.into(),
            embedding: None,
            listing_order: false,
        }
    }

    fn apply(&self, config: &mut Config) {
        if let Some(embedding) = self.embedding {
            config.embedding = embedding;
        }
        if self.listing_order {
            config.order = TraversalOrder::Listing;
        }
    }
}

/// Options for the cli `generate` subcommand.
#[derive(Debug, clap::Args)]
pub struct GenerateOpts {
    #[command(flatten)]
    pub(crate) site: SiteOpts,

    /// Directory the sources are written to.
    #[arg(short, long)]
    pub(crate) output_dir: Option<PathBuf>,

    /// Output file name. `{ext}` is replaced by `h` and `c`.
    #[arg(short('f'), long)]
    pub(crate) output_file: Option<String>,

    /// Log tag used by the generated code.
    #[arg(long)]
    pub(crate) tag: Option<String>,
}

impl GenerateOpts {
    #[cfg(test)]
    pub fn from_dir<P>(input_dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            site: SiteOpts::from_dir(input_dir),
            output_dir: None,
            output_file: None,
            tag: None,
        }
    }

    /// Override `config` with the flags given on the command line.
    pub fn apply(&self, config: &mut Config) {
        self.site.apply(config);
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if let Some(file) = &self.output_file {
            config.output.file = file.clone();
        }
        if let Some(tag) = &self.tag {
            config.server.tag = tag.clone();
        }
    }
}

/// Options for the cli `routes` subcommand.
#[derive(Debug, clap::Args)]
pub struct RoutesOpts {
    #[command(flatten)]
    pub(crate) site: SiteOpts,

    /// Print the table as json.
    #[arg(long)]
    pub(crate) json: bool,
}

impl RoutesOpts {
    pub fn apply(&self, config: &mut Config) {
        self.site.apply(config);
    }
}

/// Get the size of the current terminal.
fn get_term_width() -> Option<usize> {
    if let Ok((w, _)) = terminal_size() {
        Some(w as usize)
    } else {
        None
    }
}

/// Print a centered string in the terminal padded by '='.
pub(crate) fn print_label(label: &str) {
    match get_term_width() {
        Some(width) if width > label.len() + 4 => {
            let mut padding = width / 2 - 1 - label.len() / 2;
            let mut odd = (width % 2) == 1;
            if (label.len() % 2) == 1 {
                padding -= 1;
                odd = !odd;
            }
            println!(
                "\n{} {} {}",
                "=".repeat(padding),
                label,
                "=".repeat(padding + odd as usize),
            )
        }
        _ => {
            println!("\n{}:", label)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_generate() {
        let opts = Opts::parse_from([
            "httpd-embed",
            "-v",
            "gen",
            "site",
            "-o",
            "out",
            "-f",
            "web.{ext}",
            "--embedding",
            "bytes",
            "--listing-order",
        ]);
        assert!(opts.verbose);

        let Command::Generate(generate) = opts.command else {
            panic!("Expected the generate command");
        };
        let mut config = Config::default();
        generate.apply(&mut config);

        assert_eq!(generate.site.input_dir, PathBuf::from("site"));
        assert_eq!(config.output.dir, PathBuf::from("out"));
        assert_eq!(config.output.file, "web.{ext}");
        assert_eq!(config.embedding, Embedding::Bytes);
        assert_eq!(config.order, TraversalOrder::Listing);
        assert_eq!(config.server.tag, "webserver");
    }

    #[test]
    fn flags_keep_config_values_they_do_not_name() {
        let mut config = Config::default();
        config.embedding = Embedding::String;
        config.server.tag = "site".to_string();

        GenerateOpts::from_dir("site").apply(&mut config);

        assert_eq!(config.embedding, Embedding::String);
        assert_eq!(config.server.tag, "site");
    }

    #[test]
    fn parse_routes() {
        let opts = Opts::parse_from(["httpd-embed", "ls", "site", "--json", "-c", "gen.toml"]);
        assert_eq!(opts.config, Some(PathBuf::from("gen.toml")));
        assert!(matches!(opts.command, Command::Routes(RoutesOpts { json: true, .. })));
    }
}
