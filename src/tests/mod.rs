
use std::{fs, path::Path};

use pretty_assertions::assert_eq;

use crate::{config::Config, generator};

make_tests::make_site_tests!();

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .map(|path| {
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

fn expect_identical(first: &[u8], second: &[u8]) {
    if first != second {
        let first = String::from_utf8_lossy(first);
        let second = String::from_utf8_lossy(second);
        let diff = prettydiff::diff_lines(&first, &second);
        println!("DIFF:\n{diff}\n");
        panic!("Generated output differs between runs.")
    }
}

/// Generate a fixture site and check the route table invariants on the output.
pub(crate) fn check_site(site: &Path) {
    println!("Generating: '{}'", site.display());
    let config = Config::default();
    let documents = generator::generate(site, &config).unwrap();
    let source = String::from_utf8_lossy(&documents.implementation).to_string();

    let files = count_files(site);
    let has_index = site.join("index.html").is_file();

    assert_eq!(source.matches("(httpd_req_t *request) {").count(), files);
    assert_eq!(documents.capacity, files + has_index as usize);
    assert_eq!(
        source.matches("httpd_register_uri_handler(server, &").count(),
        documents.capacity
    );
    assert!(source.contains(&format!(
        "config.max_uri_handlers = {};",
        documents.capacity
    )));
    assert_eq!(source.contains("httpd_uri_t ROOT_URI = {"), has_index);

    let again = generator::generate(site, &config).unwrap();
    expect_identical(&documents.interface, &again.interface);
    expect_identical(&documents.implementation, &again.implementation);
}
