//! Generated documents as ordered lists of typed sections.
//!
//! What goes into a document is decided here. How a section is spelled is up to a
//! [Dialect].

use super::route_table::{DataDeclaration, HandlerDefinition, RouteEntry, RouteTable};

pub const INCLUDE_GUARD: &str = "__WEBSERVER_H__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Include {
    /// `#include "header"`
    Local(String),
    /// `#include <header>`
    System(String),
}

/// Server startup: configure, start, then register every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupRoutine {
    pub capacity: usize,
    /// Route symbols in registration order.
    pub routes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    GuardOpen(String),
    GuardClose,
    Include(Include),
    /// A macro expanding to a string literal.
    DefineString { name: String, value: String },
    Comment(String),
    Blank,
    /// Declaration of the server entry point.
    EntryPoint,
    Data(DataDeclaration),
    Handler(HandlerDefinition),
    Route(RouteEntry),
    Startup(StartupRoutine),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub sections: Vec<Section>,
}

impl Document {
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// The interface only declares the entry point and does not depend on the site.
    pub fn interface() -> Self {
        Self {
            sections: vec![
                Section::GuardOpen(INCLUDE_GUARD.to_string()),
                Section::Blank,
                Section::Include(Include::System("esp_http_server.h".to_string())),
                Section::Blank,
                Section::EntryPoint,
                Section::Blank,
                Section::GuardClose,
            ],
        }
    }

    /// Data, then handlers, then routes, then the startup routine registering the routes.
    pub fn implementation(table: &RouteTable, interface_name: &str, tag: &str) -> Self {
        let mut doc = Self::default();

        doc.push(Section::Include(Include::Local(interface_name.to_string())));
        for header in ["esp_log.h", "esp_http_server.h", "stdlib.h"] {
            doc.push(Section::Include(Include::System(header.to_string())));
        }
        doc.push(Section::Blank);
        doc.push(Section::DefineString {
            name: "TAG".to_string(),
            value: tag.to_string(),
        });
        doc.push(Section::Blank);

        doc.push(Section::Comment("files".to_string()));
        doc.sections
            .extend(table.data.iter().cloned().map(Section::Data));
        doc.push(Section::Blank);

        doc.push(Section::Comment("functions".to_string()));
        doc.sections
            .extend(table.handlers.iter().cloned().map(Section::Handler));

        doc.push(Section::Comment("uris".to_string()));
        doc.sections
            .extend(table.routes.iter().cloned().map(Section::Route));

        doc.push(Section::Startup(StartupRoutine {
            capacity: table.capacity(),
            routes: table.routes.iter().map(|r| r.symbol.clone()).collect(),
        }));

        doc
    }

    /// Number of sections matching `predicate`.
    #[cfg(test)]
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Section) -> bool,
    {
        self.sections.iter().filter(|s| predicate(s)).count()
    }
}

/// Spelling of document sections in some target language.
pub trait Dialect {
    fn render_section(&self, section: &Section, out: &mut Vec<u8>);

    fn render(&self, document: &Document) -> Vec<u8> {
        let mut out = Vec::new();
        for section in &document.sections {
            self.render_section(section, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        collector::FileEntry,
        config::{AliasRule, Embedding},
    };
    use pretty_assertions::assert_eq;

    fn table() -> RouteTable {
        RouteTable::build(
            vec![
                FileEntry::new("/index.html", "<html>x</html>"),
                FileEntry::new("/style.css", "body{}"),
            ],
            &[AliasRule::index()],
            Embedding::Auto,
        )
    }

    #[test]
    fn implementation_sections() {
        let doc = Document::implementation(&table(), "server.h", "webserver");

        assert_eq!(doc.count(|s| matches!(s, Section::Data(_))), 2);
        assert_eq!(doc.count(|s| matches!(s, Section::Handler(_))), 2);
        assert_eq!(doc.count(|s| matches!(s, Section::Route(_))), 3);

        match doc.sections.last() {
            Some(Section::Startup(startup)) => {
                assert_eq!(startup.capacity, 3);
                assert_eq!(startup.routes, vec!["URI_FILE_0", "ROOT_URI", "URI_FILE_1"]);
            }
            other => panic!("Expected the startup routine last, got {:?}", other),
        }
    }

    #[test]
    fn sections_are_ordered() {
        let doc = Document::implementation(&table(), "server.h", "webserver");
        let kinds = doc
            .sections
            .iter()
            .filter_map(|s| match s {
                Section::Data(_) => Some(0),
                Section::Handler(_) => Some(1),
                Section::Route(_) => Some(2),
                Section::Startup(_) => Some(3),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert!(kinds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn interface_does_not_depend_on_the_site() {
        let doc = Document::interface();
        assert_eq!(doc.count(|s| *s == Section::EntryPoint), 1);
        assert_eq!(
            doc.sections.first(),
            Some(&Section::GuardOpen(INCLUDE_GUARD.to_string()))
        );
        assert_eq!(doc.sections.last(), Some(&Section::GuardClose));
    }
}
