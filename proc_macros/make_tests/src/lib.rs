extern crate proc_macro;
use std::{fs, path::PathBuf};

use proc_macro::TokenStream;
use quote::{format_ident, quote};

const SITES_DIR: &str = "sites";

/// Turn a name into a valid function name by replacing bad characters.
fn functionify(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
            _ => '_',
        })
        .collect()
}

/// Create a test case for each site in the `sites` directory. Every test calls
/// `crate::tests::check_site` with the absolute path of the site.
#[proc_macro]
pub fn make_site_tests(_item: TokenStream) -> TokenStream {
    let root = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().expect("Could not determine current directory"));
    let sites = root.join(SITES_DIR);

    let mut dirs = fs::read_dir(&sites)
        .unwrap_or_else(|e| panic!("Could not read '{}': {}", sites.display(), e))
        .map(|entry| entry.expect("Could not read site entry").path())
        .filter(|path| path.is_dir())
        .collect::<Vec<_>>();
    dirs.sort();

    dirs.into_iter()
        .map(|dir| {
            let name = dir.file_name().unwrap().to_str().unwrap().to_owned();
            let test_name = format_ident!("generate_site_{}", functionify(&name));
            let dir = dir.to_str().unwrap().to_owned();
            quote! {
                #[test]
                fn #test_name() {
                    crate::tests::check_site(std::path::Path::new(#dir));
                }
            }
        })
        .collect::<proc_macro2::TokenStream>()
        .into()
}
