use flipcss::Warning;

/// Terminal styling for warning reports. Each method styles one role of the
/// report so the color choices live in a single place.
struct Palette {
    enabled: bool,
}

impl Palette {
    const RESET: &'static str = "\x1b[0m";

    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn wrap(&self, sgr: &str, s: &str) -> String {
        if self.enabled { format!("\x1b[{sgr}m{s}{}", Self::RESET) } else { s.to_string() }
    }

    /// `name:line:column:` prefix, cyan.
    fn location(&self, s: &str) -> String {
        self.wrap("36", s)
    }

    /// Warning text, yellow.
    fn message(&self, s: &str) -> String {
        self.wrap("33", s)
    }

    fn total(&self, s: &str) -> String {
        self.wrap("1", s)
    }

    fn note(&self, s: &str) -> String {
        self.wrap("2", s)
    }
}

/// One report line: `name:line:column: message`.
fn format_warning(palette: &Palette, name: &str, warning: &Warning) -> String {
    let location = format!("{}:{}:{}:", name, warning.line, warning.column);
    format!("{} {}", palette.location(&location), palette.message(&warning.message))
}

/// Print flip warnings to stderr, one per line, followed by a count.
///
/// When the clean pass ran first, positions refer to the cleaned text.
pub fn print_warnings(name: &str, warnings: &[Warning], cleaned: bool, color: bool) {
    let palette = Palette::new(color);

    for warning in warnings {
        eprintln!("{}", format_warning(&palette, name, warning));
    }

    if warnings.is_empty() {
        eprintln!("{}", palette.note("no warnings"));
    } else {
        let suffix = if cleaned { " (positions refer to the cleaned stylesheet)" } else { "" };
        eprintln!("{}{}", palette.total(&format!("{} warning(s)", warnings.len())), palette.note(suffix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipcss::{Options, flip_with};

    fn first_warning() -> Warning {
        let res = flip_with(".a {\n  content: \"left\";\n}", &Options { warnings: true, ..Options::default() });
        res.warnings.into_iter().next().unwrap()
    }

    #[test]
    fn plain_line_has_location_prefix() {
        let line = format_warning(&Palette::new(false), "in.css", &first_warning());
        assert!(line.starts_with("in.css:2:12: Warning: Inline text in `content`"), "{line}");
    }

    #[test]
    fn colored_line_wraps_each_part() {
        let line = format_warning(&Palette::new(true), "in.css", &first_warning());
        assert!(line.starts_with("\x1b[36min.css:2:12:\x1b[0m \x1b[33mWarning:"), "{line}");
        assert!(line.ends_with("\x1b[0m"));
    }
}
