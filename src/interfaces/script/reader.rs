use crate::error::{ControllerError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// An inbound payment line.
    Payment,
    /// A momentary button press (closed for one poll).
    Press,
    /// Close a button contact.
    Hold,
    /// Open a button contact.
    Release,
}

/// One row of a scenario: what happens at `at` milliseconds.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ScenarioStep {
    pub at: u32,
    pub kind: StepKind,
    #[serde(default)]
    pub value: String,
}

/// Streams scenario steps out of a CSV source with an `at,kind,value` header.
pub struct ScenarioReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScenarioReader<R> {
    /// Creates a new `ScenarioReader` from any `Read` source.
    ///
    /// Fields are trimmed and rows may omit the trailing `value`.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes steps.
    ///
    /// A malformed row yields an error for that row only; reading continues
    /// with the next one.
    pub fn steps(self) -> impl Iterator<Item = Result<ScenarioStep>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ControllerError::from))
    }
}
