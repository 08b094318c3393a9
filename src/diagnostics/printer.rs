use termion::color::{self, Fg};

use super::GenerateError;

/// Format an error with the following layout:
/// ```text
/// [E] could not read `site/logo.png`: Permission denied (os error 13)
///     - first detail
/// ```
fn stringify_error(error: &GenerateError) -> String {
    let mut message = format!(
        "{}[E]{} {}{}{}",
        Fg(color::Red),
        Fg(color::Reset),
        Fg(color::Blue),
        error,
        Fg(color::Reset),
    );
    for detail in error.details() {
        message += &format!("\n    - {detail}");
    }
    message
}

/// Print an error to stderr.
pub fn print_error(error: &GenerateError) {
    eprintln!("{}", stringify_error(error));
}
