//! Turns a directory of static files into C source serving them with `esp_http_server`.
//!
//! The pipeline is
//! ```text
//! collect (FileEntry...) -> RouteTable::build -> Document -> Dialect::render -> files
//! ```
//! Both documents are assembled in memory before anything is written.

pub mod document;
pub mod escaper;
pub mod esp_idf;
pub mod route_table;
pub mod symbols;

use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    collector,
    config::{Config, OutputConfig},
    diagnostics::{GenerateError, GenerateResult},
};

use self::{
    document::{Dialect, Document},
    esp_idf::EspIdf,
    route_table::RouteTable,
};

/// Rendered interface and implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocuments {
    pub interface: Vec<u8>,
    pub implementation: Vec<u8>,
    pub capacity: usize,
}

impl GeneratedDocuments {
    /// Write both documents into the configured output directory, replacing existing files.
    pub fn write(&self, output: &OutputConfig) -> GenerateResult<(PathBuf, PathBuf)> {
        let interface_path = output.interface_path();
        let implementation_path = output.implementation_path();
        write_file(&interface_path, &self.interface)?;
        write_file(&implementation_path, &self.implementation)?;
        Ok((interface_path, implementation_path))
    }
}

fn write_file(path: &Path, contents: &[u8]) -> GenerateResult<()> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| GenerateError::write_output(path, e))?
        .write_all(contents)
        .map_err(|e| GenerateError::write_output(path, e))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "Wrote document");
    Ok(())
}

/// Collect the files below `input` and build their route table.
pub fn build_route_table(input: &Path, config: &Config) -> GenerateResult<RouteTable> {
    let entries = collector::collect(input, config.order)?;
    Ok(RouteTable::build(entries, &config.aliases, config.embedding))
}

/// Render both documents for `table`.
pub fn assemble(table: &RouteTable, config: &Config) -> GeneratedDocuments {
    let interface_name = config.output.interface_file_name();
    let interface = EspIdf.render(&Document::interface());
    let implementation = EspIdf.render(&Document::implementation(
        table,
        &interface_name,
        &config.server.tag,
    ));
    GeneratedDocuments {
        interface,
        implementation,
        capacity: table.capacity(),
    }
}

/// Collect, build and render without writing anything.
pub fn generate(input: &Path, config: &Config) -> GenerateResult<GeneratedDocuments> {
    let table = build_route_table(input, config)?;
    Ok(assemble(&table, config))
}
