use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use relex_extract::TripleAssembler;
use relex_parser::Engine;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Extracts (subject, object, relation) triples from text on stdin")]
struct Cli {
    /// Compiled lexicon extending the built-in one
    #[arg(short, long, value_name = "FILE", env = "RELEX_LEXICON")]
    lexicon: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !verbose && !has_rust_log {
        return Ok(());
    }

    let mut filter = EnvFilter::from_default_env();
    if verbose {
        for target in ["relex", "relex_parser", "relex_extract"] {
            filter = filter.add_directive(format!("{}=debug", target).parse()?);
        }
    }
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    Ok(())
}

fn run(cli: &Cli, mut input: impl Read, mut output: impl Write) -> anyhow::Result<()> {
    let engine = match &cli.lexicon {
        Some(path) => Engine::load(path).with_context(|| format!("loading lexicon {:?}", path))?,
        None => Engine::new(),
    };

    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes).context("reading stdin")?;
    let text = String::from_utf8(bytes).context("stdin is not valid UTF-8")?;
    debug!(bytes = text.len(), "read input");

    let extractions = TripleAssembler::new(&engine).extract(&text)?;

    if cli.pretty {
        serde_json::to_writer_pretty(&mut output, &extractions)?;
    } else {
        serde_json::to_writer(&mut output, &extractions)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&cli, stdin.lock(), stdout.lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("relex").chain(args.iter().copied())).expect("valid arguments")
    }

    fn run_on(cli: &Cli, input: &[u8]) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(cli, input, &mut out)?;
        Ok(String::from_utf8(out).expect("json is utf-8"))
    }

    #[test]
    fn test_default_output() {
        let out = run_on(&cli(&[]), b"The cat chased the mouse.").expect("run");
        assert_eq!(out, "[[[\"cat\",\"mouse\",\"chased\"],\"The cat chased the mouse.\"]]\n");
    }

    #[test]
    fn test_nothing_extracted() {
        assert_eq!(run_on(&cli(&[]), b"").expect("run"), "[]\n");
        assert_eq!(run_on(&cli(&[]), b"Run.").expect("run"), "[]\n");
    }

    #[test]
    fn test_pretty_output_parses_back() {
        let out = run_on(&cli(&["--pretty"]), b"Steve Jobs founded Apple.").expect("run");
        assert!(out.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value, serde_json::json!([[["Steve Jobs", "Apple", "founded"], "Steve Jobs founded Apple."]]));
    }

    #[test]
    fn test_invalid_utf8_is_fatal() {
        let err = run_on(&cli(&[]), &[b'c', b'a', 0xff, 0xfe]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }

    #[test]
    fn test_missing_lexicon_is_fatal() {
        let err = run_on(&cli(&["--lexicon", "/nonexistent/words.rkyv"]), b"cats sleep.").unwrap_err();
        assert!(format!("{:#}", err).contains("lexicon"));
    }
}
