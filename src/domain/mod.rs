// Typed records held in the local JSON datasets
pub mod records;

pub use records::{
    CandidateField, CandidateRecord, FieldValue, GlossaryField, GlossaryTerm, Record,
};
