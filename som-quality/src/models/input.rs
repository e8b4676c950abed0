#[cfg(test)]
#[path = "../../tests/unit/models/input_test.rs"]
mod input_test;

use crate::utils::{Float, QualityError, QualityResult};

/// Represents a single input record: an identifier and its vector.
#[derive(Clone, Debug)]
pub struct InputDatum {
    /// An identifier of the record.
    pub label: String,
    /// A vector of the record.
    pub vector: Vec<Float>,
    /// An optional ground truth class label.
    pub class: Option<String>,
}

impl InputDatum {
    /// Creates a new instance of `InputDatum` without class information.
    pub fn new(label: &str, vector: Vec<Float>) -> Self {
        Self { label: label.to_string(), vector, class: None }
    }

    /// Sets a class label.
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }
}

/// An ordered collection of input records. Iteration order is stable and defines the indices
/// used by units to reference mapped records.
#[derive(Clone, Debug, Default)]
pub struct InputData {
    data: Vec<InputDatum>,
}

impl InputData {
    /// Creates a new instance of `InputData` checking that all vectors have the same dimension.
    pub fn new(data: Vec<InputDatum>) -> QualityResult<Self> {
        if let Some(first) = data.first() {
            let dimension = first.vector.len();
            if let Some(datum) = data.iter().find(|datum| datum.vector.len() != dimension) {
                return Err(QualityError::InvalidData(format!(
                    "input '{}' has dimension {}, expected {dimension}",
                    datum.label,
                    datum.vector.len()
                )));
            }
        }

        Ok(Self { data })
    }

    /// Returns amount of records.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a record at given index.
    pub fn get(&self, index: usize) -> Option<&InputDatum> {
        self.data.get(index)
    }

    /// Returns a vector of the record at given index.
    ///
    /// # Panics
    /// Panics if index is out of range.
    pub fn vector(&self, index: usize) -> &[Float] {
        self.data[index].vector.as_slice()
    }

    /// Iterates over records.
    pub fn iter(&self) -> impl Iterator<Item = &InputDatum> + '_ {
        self.data.iter()
    }

    /// Returns dimension of vectors or zero when there is no data.
    pub fn dimension(&self) -> usize {
        self.data.first().map_or(0, |datum| datum.vector.len())
    }
}
