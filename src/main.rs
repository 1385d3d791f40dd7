mod report;

use clap::Parser;
use flipcss::{Direction, Error, Options, clean_with, flip_with};
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flipcss")]
#[command(version, about = "Mirror CSS stylesheets between left-to-right and right-to-left", long_about = None)]
#[command(after_help = "EXAMPLES:
    flipcss style.css > style-rtl.css           Mirror a stylesheet
    flipcss --clean rtl -w style.css            Resolve !rtl-only/!ltr-only markers, then mirror
    flipcss --clean ltr --no-flip style.css     Only resolve markers for ltr")]
struct Cli {
    /// Stylesheet to read (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Run the clean pass for DIRECTION (ltr or rtl) before flipping
    #[arg(long, value_name = "DIRECTION", value_parser = str::parse::<Direction>)]
    clean: Option<Direction>,

    /// Skip the flip pass (only meaningful with --clean)
    #[arg(long, requires = "clean")]
    no_flip: bool,

    /// Report directional content that was left unchanged
    #[arg(short, long)]
    warnings: bool,

    /// Force ANSI colors in the warning report
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable ANSI colors in the warning report
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> flipcss::Result<()> {
    let input = read_input(cli.input.as_deref())?;

    let source = match cli.clean {
        Some(direction) => clean_with(&input, direction),
        None => input,
    };

    let (text, warnings) = if cli.no_flip {
        (source, Vec::new())
    } else {
        let res = flip_with(&source, &Options { warnings: cli.warnings, ..Options::default() });
        (res.text, res.warnings)
    };

    if cli.warnings {
        let color = if cli.color {
            true
        } else if cli.no_color {
            false
        } else {
            io::stderr().is_terminal()
        };
        let name = cli.input.as_deref().map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
        report::print_warnings(&name, &warnings, cli.clean.is_some(), color);
    }

    write_output(cli.output.as_deref(), &text)
}

fn read_input(path: Option<&Path>) -> flipcss::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| Error::Io { path: path.to_path_buf(), source }),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| Error::Io { path: PathBuf::from("<stdin>"), source })?;
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&Path>, text: &str) -> flipcss::Result<()> {
    match path {
        Some(path) => std::fs::write(path, text).map_err(|source| Error::Io { path: path.to_path_buf(), source }),
        None => io::stdout()
            .write_all(text.as_bytes())
            .map_err(|source| Error::Io { path: PathBuf::from("<stdout>"), source }),
    }
}
