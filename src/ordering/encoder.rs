//! Deterministic Load-Order Encoder.
//!
//! The host only lists a directory alphabetically. The encoder computes,
//! for each position in authored order, the 1-based position of that
//! object's file in the alphabetical listing. A loader then walks the
//! encoded array and indexes the listing with it.

use serde::{Deserialize, Serialize};

use crate::core::{ExportError, OrderingViolation, ValidationError};
use crate::rules::GameObjectData;

/// What the encoder needs to know about one object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOrderEntry {
    pub file_name: String,
    pub order_value: i64,
}

impl LoadOrderEntry {
    pub fn new(file_name: impl Into<String>, order_value: i64) -> Self {
        Self {
            file_name: file_name.into(),
            order_value,
        }
    }
}

impl From<&GameObjectData> for LoadOrderEntry {
    fn from(object: &GameObjectData) -> Self {
        Self::new(object.file_name(), object.order_value)
    }
}

/// Encoded load order of one directory.
///
/// `values[p]` is the 1-based listing position of the object loaded
/// `p`-th. When a synthetic file shares the directory, `skipped` holds its
/// listing position and no value points at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOrderIndex {
    values: Vec<usize>,
    skipped: Option<usize>,
}

impl LoadOrderIndex {
    /// Wrap raw values, checking that they form a valid index.
    pub fn new(values: Vec<usize>, skipped: Option<usize>) -> Result<Self, OrderingViolation> {
        let index = Self { values, skipped };
        index.validate()?;
        Ok(index)
    }

    /// The encoded values.
    #[must_use]
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Listing position of the synthetic file, if any.
    #[must_use]
    pub fn skipped(&self) -> Option<usize> {
        self.skipped
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the directory holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length of the directory listing the index expects.
    #[must_use]
    pub fn listing_len(&self) -> usize {
        self.values.len() + usize::from(self.skipped.is_some())
    }

    /// Check that the values are a bijection onto `1..=listing_len`
    /// minus the skipped position.
    pub fn validate(&self) -> Result<(), OrderingViolation> {
        let max = self.listing_len();
        let mut seen = vec![false; max + 1];
        for &value in &self.values {
            if value == 0 || value > max {
                return Err(OrderingViolation::OutOfRange { value, max });
            }
            if self.skipped == Some(value) {
                return Err(OrderingViolation::PointsAtSynthetic(value));
            }
            if seen[value] {
                return Err(OrderingViolation::Duplicate(value));
            }
            seen[value] = true;
        }
        Ok(())
    }

    /// Reorder an alphabetical listing into load order.
    pub fn apply<'a, T>(&self, listing: &'a [T]) -> Result<Vec<&'a T>, OrderingViolation> {
        self.validate()?;
        self.values
            .iter()
            .map(|&value| {
                listing.get(value - 1).ok_or(OrderingViolation::OutOfRange {
                    value,
                    max: listing.len(),
                })
            })
            .collect()
    }

    /// Lua array literal (`{ 3, 1, 2 }`).
    #[must_use]
    pub fn to_lua(&self) -> String {
        if self.values.is_empty() {
            return "{}".to_string();
        }
        let values: Vec<String> = self.values.iter().map(ToString::to_string).collect();
        format!("{{ {} }}", values.join(", "))
    }
}

/// Computes [`LoadOrderIndex`] arrays.
#[derive(Clone, Debug, Default)]
pub struct LoadOrderEncoder {
    synthetic: Option<String>,
}

impl LoadOrderEncoder {
    /// Create an encoder for a directory holding only object files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for a non-object file in the same directory (builder pattern).
    #[must_use]
    pub fn with_synthetic_file(mut self, file_name: impl Into<String>) -> Self {
        self.synthetic = Some(file_name.into());
        self
    }

    /// The directory listing the host will see, sorted by file name.
    #[must_use]
    pub fn listing(&self, entries: &[LoadOrderEntry]) -> Vec<String> {
        let mut listing: Vec<String> = entries.iter().map(|e| e.file_name.clone()).collect();
        listing.extend(self.synthetic.iter().cloned());
        listing.sort();
        listing
    }

    /// Encode the load order of `entries`.
    ///
    /// Objects with equal order values keep their alphabetical order.
    /// Two entries with one file name make the listing ambiguous and are
    /// rejected.
    pub fn encode(&self, entries: &[LoadOrderEntry]) -> Result<LoadOrderIndex, ExportError> {
        let mut alphabetical: Vec<usize> = (0..entries.len()).collect();
        alphabetical.sort_by(|&a, &b| entries[a].file_name.cmp(&entries[b].file_name));

        for pair in alphabetical.windows(2) {
            if entries[pair[0]].file_name == entries[pair[1]].file_name {
                let name = entries[pair[0]].file_name.clone();
                return Err(ValidationError::DuplicateFileName(name).into());
            }
        }

        let mut alpha_index = vec![0usize; entries.len()];
        for (position, &entry) in alphabetical.iter().enumerate() {
            alpha_index[entry] = position + 1;
        }

        let mut authored: Vec<usize> = (0..entries.len()).collect();
        authored.sort_by_key(|&i| (entries[i].order_value, alpha_index[i]));
        let mut values: Vec<usize> = authored.iter().map(|&i| alpha_index[i]).collect();

        let skipped = match &self.synthetic {
            Some(synthetic) => {
                if entries.iter().any(|e| &e.file_name == synthetic) {
                    return Err(ValidationError::DuplicateFileName(synthetic.clone()).into());
                }
                let position = 1 + entries.iter().filter(|e| e.file_name < *synthetic).count();
                for value in &mut values {
                    if *value >= position {
                        *value += 1;
                    }
                }
                Some(position)
            }
            None => None,
        };

        let index = LoadOrderIndex::new(values, skipped)?;
        tracing::debug!(
            objects = index.len(),
            skipped = ?index.skipped(),
            order = %index.to_lua(),
            "encoded load order"
        );
        Ok(index)
    }
}
