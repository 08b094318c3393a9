//! Builds the declarations, handlers and routes for a sequence of collected files.

use std::fmt::Display;

use fnv::FnvHashSet;
use serde::Serialize;

use crate::{
    collector::FileEntry,
    config::{AliasRule, Embedding},
};

use super::{
    escaper,
    symbols::{self, SymbolTriple},
};

/// File contents in the form they are written into the generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbeddedData {
    /// Escaped body of a string literal.
    Literal(Vec<u8>),
    /// Raw bytes for a brace initialised array.
    Bytes(Vec<u8>),
}

impl EmbeddedData {
    fn new(content: Vec<u8>, embedding: Embedding) -> Self {
        let literal = match embedding {
            Embedding::String => true,
            // C has no empty brace initialiser.
            Embedding::Bytes => content.is_empty(),
            Embedding::Auto => escaper::is_literal_safe(&content),
        };
        if literal {
            Self::Literal(escaper::escape(&content))
        } else {
            Self::Bytes(content)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            EmbeddedData::Literal(_) => "literal",
            EmbeddedData::Bytes(_) => "bytes",
        }
    }
}

/// `const char <symbol>[] = ...;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDeclaration {
    pub symbol: String,
    pub data: EmbeddedData,
    /// Compile time size of the array. Includes the terminating NUL of a literal.
    pub size: usize,
}

/// A handler sending the whole of `data_symbol` as response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDefinition {
    pub symbol: String,
    pub data_symbol: String,
}

/// A GET route registered with the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteEntry {
    pub symbol: String,
    pub uri: String,
    pub handler: String,
}

impl RouteEntry {
    pub fn new<S, U, H>(symbol: S, uri: U, handler: H) -> Self
    where
        S: ToString,
        U: ToString,
        H: ToString,
    {
        Self {
            symbol: symbol.to_string(),
            uri: uri.to_string(),
            handler: handler.to_string(),
        }
    }

    pub fn is_alias(&self) -> bool {
        !self.symbol.starts_with(symbols::ROUTE_PREFIX)
    }
}

impl Display for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.symbol, self.uri, self.handler)
    }
}

/// Everything generated for one file, kept for listing the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbeddedFile {
    pub path: String,
    pub symbols: SymbolTriple,
    pub embedding: &'static str,
    pub bytes: usize,
}

/// The complete route table of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    pub files: Vec<EmbeddedFile>,
    pub data: Vec<DataDeclaration>,
    pub handlers: Vec<HandlerDefinition>,
    pub routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the table for `entries`, numbering them in the order given.
    pub fn build(entries: Vec<FileEntry>, aliases: &[AliasRule], embedding: Embedding) -> Self {
        let file_paths = entries
            .iter()
            .map(|e| e.path.clone())
            .collect::<FnvHashSet<_>>();
        let builder = RouteTableBuilder::new(aliases, embedding, file_paths);

        let table = entries
            .into_iter()
            .enumerate()
            .fold(builder, |builder, (ordinal, entry)| builder.push(ordinal, entry))
            .finish();

        tracing::info!(
            files = table.files.len(),
            routes = table.routes.len(),
            capacity = table.capacity(),
            "Built route table"
        );
        table
    }

    /// Number of routes the server has to accept. Equal to the number of registrations.
    pub fn capacity(&self) -> usize {
        self.routes.len()
    }
}

/// Accumulates a [RouteTable] one file at a time.
pub struct RouteTableBuilder<'a> {
    aliases: &'a [AliasRule],
    embedding: Embedding,
    /// Paths of real files, which aliases may not shadow.
    file_paths: FnvHashSet<String>,
    table: RouteTable,
}

impl<'a> RouteTableBuilder<'a> {
    pub fn new(
        aliases: &'a [AliasRule],
        embedding: Embedding,
        file_paths: FnvHashSet<String>,
    ) -> Self {
        Self {
            aliases,
            embedding,
            file_paths,
            table: RouteTable::default(),
        }
    }

    /// Add the file at position `ordinal`.
    pub fn push(mut self, ordinal: usize, entry: FileEntry) -> Self {
        let triple = SymbolTriple::for_ordinal(ordinal);
        let bytes = entry.content.len();
        let data = EmbeddedData::new(entry.content, self.embedding);
        let size = match &data {
            EmbeddedData::Literal(_) => bytes + 1,
            EmbeddedData::Bytes(_) => bytes,
        };

        tracing::debug!(path = %entry.path, embedding = data.kind(), size, "Embedding file");

        self.table.files.push(EmbeddedFile {
            path: entry.path.clone(),
            symbols: triple.clone(),
            embedding: data.kind(),
            bytes,
        });
        self.table.data.push(DataDeclaration {
            symbol: triple.data.clone(),
            data,
            size,
        });
        self.table.handlers.push(HandlerDefinition {
            symbol: triple.handler.clone(),
            data_symbol: triple.data,
        });
        self.table
            .routes
            .push(RouteEntry::new(&triple.route, &entry.path, &triple.handler));

        for (rule_index, rule) in self.aliases.iter().enumerate() {
            if rule.source != entry.path {
                continue;
            }
            if self.file_paths.contains(&rule.route) {
                tracing::warn!(
                    source = %rule.source,
                    route = %rule.route,
                    "Alias route is already served by a file, skipping"
                );
                continue;
            }
            let symbol = symbols::alias_route_symbol(rule_index, &rule.route);
            tracing::debug!(source = %rule.source, route = %rule.route, %symbol, "Adding alias");
            self.table
                .routes
                .push(RouteEntry::new(symbol, &rule.route, &triple.handler));
        }

        self
    }

    pub fn finish(self) -> RouteTable {
        self.table
    }
}
