use relex_protocol::{Analyzer, Extraction};
use tracing::debug;

use crate::error::{AssembleError, PartitionError};
use crate::partition::TreePartitioner;

/// Abbreviations whose trailing period would otherwise end a sentence.
pub const MONTHS: [(&str, &str); 12] = [
    ("Jan.", "January"),
    ("Feb.", "February"),
    ("Mar.", "March"),
    ("Apr.", "April"),
    ("May.", "May"),
    ("Jun.", "June"),
    ("Jul.", "July"),
    ("Aug.", "August"),
    ("Sept.", "September"),
    ("Oct.", "October"),
    ("Nov.", "November"),
    ("Dec.", "December"),
];

/// Expands month abbreviations by literal substitution.
///
/// Each entry is applied until it no longer matches: "May.." would
/// otherwise turn into a fresh "May." after one pass.
pub fn normalize_months(text: &str) -> String {
    let mut out = text.to_string();
    for (short, full) in MONTHS {
        while out.contains(short) {
            out = out.replace(short, full);
        }
    }
    out
}

/// Runs the whole pipeline over a text blob: month normalization,
/// segmentation, per-sentence partitioning and triple assembly.
#[derive(Debug, Clone)]
pub struct TripleAssembler<A> {
    partitioner: TreePartitioner<A>,
}

impl<A: Analyzer> TripleAssembler<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            partitioner: TreePartitioner::new(analyzer),
        }
    }

    pub fn partitioner(&self) -> &TreePartitioner<A> {
        &self.partitioner
    }

    /// Extracts one triple per sentence that yields a complete one, in input order.
    ///
    /// Sentences whose parse is not a usable tree, or whose subject, object or
    /// relation comes out empty, are dropped. Analyzer failures abort the run.
    pub fn extract(&self, text: &str) -> Result<Vec<Extraction>, AssembleError<A::Error>> {
        let text = normalize_months(text);
        let sentences = self
            .partitioner
            .analyzer()
            .sentences(&text)
            .map_err(AssembleError::Segment)?;
        debug!(sentences = sentences.len(), "segmented input");

        let mut extractions = Vec::new();
        for sentence in sentences {
            let partition = match self.partitioner.partition(&sentence) {
                Ok(partition) => partition,
                Err(PartitionError::Tree(_)) => continue,
                Err(PartitionError::Engine(error)) => return Err(AssembleError::Parse { sentence, error }),
            };

            if let Some(triple) = partition.triple() {
                extractions.push(Extraction { triple, sentence });
            }
        }

        debug!(extractions = extractions.len(), "assembled triples");
        Ok(extractions)
    }
}
