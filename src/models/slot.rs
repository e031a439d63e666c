//! Time slot catalogue.
//!
//! Slots are opaque named buckets (e.g. "Mon Morning"). They carry no
//! ordering or overlap semantics; two subjects collide only when they are
//! assigned the very same slot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Weekdays of the default catalogue, in catalogue order.
pub const DEFAULT_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
/// Day periods of the default catalogue, in catalogue order.
pub const DEFAULT_PERIODS: [&str; 3] = ["Morning", "Afternoon", "Evening"];

/// Ordered, de-duplicated list of slot names with O(1) reverse lookup.
///
/// # Example
/// ```
/// use u_timetable::models::SlotCatalog;
///
/// let catalog = SlotCatalog::new(["Mon AM", "Mon PM", "Mon AM"]);
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.index_of("Mon PM"), Some(1));
/// assert_eq!(catalog.name_at(0).unwrap(), "Mon AM");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SlotCatalog {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SlotCatalog {
    /// Builds a catalogue, keeping the first occurrence of each name.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if !catalog.index.contains_key(&name) {
                catalog.index.insert(name.clone(), catalog.names.len());
                catalog.names.push(name);
            }
        }
        catalog
    }

    /// The 21-slot week: every day × {Morning, Afternoon, Evening}, day-major.
    pub fn default_week() -> Self {
        Self::new(
            DEFAULT_DAYS
                .iter()
                .flat_map(|day| DEFAULT_PERIODS.iter().map(move |p| format!("{day} {p}"))),
        )
    }

    /// Uses `names` when non-empty, otherwise the default week.
    pub fn or_default<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let catalog = Self::new(names);
        if catalog.is_empty() {
            Self::default_week()
        } else {
            catalog
        }
    }

    /// Index of a slot name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Slot name at an index.
    ///
    /// An out-of-range index is a programming error upstream.
    pub fn name_at(&self, index: usize) -> Result<&str> {
        self.names
            .get(index)
            .map(String::as_str)
            .ok_or(TimetableError::UnknownSlot(index))
    }

    /// Whether the catalogue contains a slot name.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalogue is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Slot names in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::default_week()
    }
}

impl From<Vec<String>> for SlotCatalog {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<SlotCatalog> for Vec<String> {
    fn from(catalog: SlotCatalog) -> Self {
        catalog.names
    }
}
