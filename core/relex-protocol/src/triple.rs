use alloc::string::String;

/// A (subject, object, relation) extraction unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: String,
    pub object: String,
    pub relation: String,
}

impl Triple {
    /// Builds a triple from raw strings, trimming each part.
    /// Returns `None` when any part is empty after trimming.
    pub fn complete(subject: &str, object: &str, relation: &str) -> Option<Self> {
        let (subject, object, relation) = (subject.trim(), object.trim(), relation.trim());
        if subject.is_empty() || object.is_empty() || relation.is_empty() {
            return None;
        }
        Some(Self {
            subject: subject.into(),
            object: object.into(),
            relation: relation.into(),
        })
    }
}

/// A triple paired with the sentence it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extraction {
    pub triple: Triple,
    pub sentence: String,
}

// Both serialize as positional arrays: `[[subject, object, relation], sentence]`.
#[cfg(feature = "serde")]
mod serde_impls {
    use super::{Extraction, Triple};
    use serde::ser::{Serialize, SerializeTuple, Serializer};

    impl Serialize for Triple {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(3)?;
            tuple.serialize_element(&self.subject)?;
            tuple.serialize_element(&self.object)?;
            tuple.serialize_element(&self.relation)?;
            tuple.end()
        }
    }

    impl Serialize for Extraction {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut tuple = serializer.serialize_tuple(2)?;
            tuple.serialize_element(&self.triple)?;
            tuple.serialize_element(&self.sentence)?;
            tuple.end()
        }
    }
}
