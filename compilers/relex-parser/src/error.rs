use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read lexicon {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("corrupt lexicon archive: {0}")]
    Corrupt(String),

    #[error("unsupported lexicon version {0} (expected {})", crate::lexicon::LEXICON_VERSION)]
    Version(u32),
}
