use relex_protocol::{RootError, TokenId};
use thiserror::Error;

/// Structural problems with a parse that make it unusable as a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("sentence has no ROOT token")]
    NoRoot,

    #[error("sentence has {0} ROOT tokens")]
    MultipleRoots(usize),

    #[error("token {token} points at missing head {head}")]
    DanglingHead { token: TokenId, head: TokenId },

    #[error("ROOT token {0} has a head")]
    RootHasHead(TokenId),

    #[error("token {0} has no head and is not ROOT")]
    Orphan(TokenId),

    #[error("token at position {0} carries the wrong index")]
    Misnumbered(TokenId),

    #[error("dependency arcs form a cycle")]
    Cycle,
}

impl From<RootError> for TreeError {
    fn from(err: RootError) -> Self {
        match err {
            RootError::Missing => TreeError::NoRoot,
            RootError::Multiple(n) => TreeError::MultipleRoots(n),
        }
    }
}

/// Failure to partition one sentence.
///
/// `Tree` is a per-sentence soft failure; `Engine` means the analyzer itself broke.
#[derive(Debug, Error)]
pub enum PartitionError<E> {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("engine failure: {0}")]
    Engine(E),
}

#[derive(Debug, Error)]
pub enum AssembleError<E> {
    #[error("sentence segmentation failed: {0}")]
    Segment(E),

    #[error("failed to parse {sentence:?}: {error}")]
    Parse { sentence: String, error: E },
}
