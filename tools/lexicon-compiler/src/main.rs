use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use relex_parser::lexicon::{decode_compiled, LEXICON_VERSION};
use relex_protocol::Lexicon;
use rkyv::ser::{serializers::AllocSerializer, Serializer};

#[derive(Parser)]
#[command(author, version, about = "Compiles a JSON lexicon to an rkyv binary")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
}

/// JSON source to archive bytes. The bytes are decoded again before returning
/// so a written file always loads.
fn compile(json: &str) -> anyhow::Result<Vec<u8>> {
    let lexicon: Lexicon = serde_json::from_str(json).context("parsing lexicon JSON")?;

    if lexicon.version != LEXICON_VERSION {
        bail!("lexicon version {} is not supported (expected {})", lexicon.version, LEXICON_VERSION);
    }
    if let Some(entry) = lexicon.entries.iter().find(|e| e.text.trim().is_empty() || e.tags.is_empty()) {
        bail!("invalid entry {:?}: needs a word and at least one tag", entry.text);
    }

    println!("Compiling lexicon version {} with {} entries...", lexicon.version, lexicon.entries.len());

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {:?}", e))?;
    let bytes = serializer.into_serializer().into_inner().to_vec();

    decode_compiled(&bytes).context("compiled lexicon failed validation")?;
    Ok(bytes)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("Reading JSON from {:?}...", cli.input);
    let json = fs::read_to_string(&cli.input).with_context(|| format!("reading {:?}", cli.input))?;

    let bytes = compile(&json)?;
    fs::write(&cli.output, &bytes).with_context(|| format!("writing {:?}", cli.output))?;

    println!("Wrote {} bytes to {:?}", bytes.len(), cli.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use relex_protocol::PosTag;

    #[test]
    fn test_compile_round_trips_through_engine_loader() {
        let json = r#"{"version":1,"entries":[{"text":"blick","tags":["VERB"]},{"text":"zorp","tags":["NOUN","VERB"]}]}"#;
        let bytes = compile(json).expect("compile");
        let lexicon = decode_compiled(&bytes).expect("decode");
        assert_eq!(lexicon.entries.len(), 2);
        assert_eq!(lexicon.entries[1].tags, vec![PosTag::Noun, PosTag::Verb]);
    }

    #[test]
    fn test_rejects_bad_sources() {
        assert!(compile("not json").is_err());
        assert!(compile(r#"{"version":99,"entries":[]}"#).is_err());
        assert!(compile(r#"{"version":1,"entries":[{"text":"blick","tags":[]}]}"#).is_err());
        assert!(compile(r#"{"version":1,"entries":[{"text":"blick","tags":["VRB"]}]}"#).is_err());
    }
}
