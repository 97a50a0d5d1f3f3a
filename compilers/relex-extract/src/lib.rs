//! Subject/object/relation extraction over dependency parses.
//!
//! The crate is generic over [`relex_protocol::Analyzer`]; any engine that
//! segments text and produces [`relex_protocol::ParsedSentence`]s can drive it.

pub mod assemble;
pub mod error;
pub mod graph;
pub mod partition;

pub use crate::assemble::{normalize_months, TripleAssembler};
pub use crate::error::{AssembleError, PartitionError, TreeError};
pub use crate::graph::DependencyTree;
pub use crate::partition::{partition_tree, strip_articles, Partition, TreePartitioner};
