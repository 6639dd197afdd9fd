//! User-facing terminal output.
//!
//! Presentation is kept out of the reconciliation logic: components receive a
//! [`Reporter`] explicitly and never touch colour codes themselves.

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[0;34m";
const CYAN: &str = "\x1b[0;36m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone)]
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// Colour unless the NO_COLOR convention asks otherwise.
    pub fn auto() -> Self {
        Reporter::new(std::env::var_os("NO_COLOR").is_none())
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.paint(BLUE, message));
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.paint(GREEN, message));
    }

    pub fn warn(&self, message: &str) {
        println!("{}", self.paint(YELLOW, message));
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.paint(RED, message));
    }

    pub fn section(&self, title: &str) {
        println!("\n{}\n", self.paint(CYAN, &format!("═══ {} ═══", title)));
    }

    pub fn item(&self, message: &str) {
        println!("  • {}", message);
    }

    pub fn plain(&self, message: &str) {
        println!("{}", message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_with_reset_when_colored() {
        let reporter = Reporter::new(true);
        let painted = reporter.paint(GREEN, "done");
        assert!(painted.starts_with(GREEN));
        assert!(painted.ends_with(RESET));
        assert!(painted.contains("done"));
    }

    #[test]
    fn paint_is_passthrough_without_color() {
        let reporter = Reporter::new(false);
        assert_eq!(reporter.paint(RED, "oops"), "oops");
    }
}
