//! Stop directory and place-name resolution.
//!
//! A city or station name coming from the caller is free text ("Paris",
//! "Rennes") while the timetable keys stops by opaque identifiers, and one
//! city typically owns several physical stops. The directory resolves a
//! place name to every candidate stop whose display name contains it.

use std::collections::HashMap;

use crate::domain::StopId;

/// Lookup from stop identifier to display name, with free-text resolution.
///
/// Matching is exact substring containment, case-insensitive and
/// Unicode-aware (accented station names match their accented queries).
/// Typo tolerance is deliberately left to outer layers.
#[derive(Debug, Clone, Default)]
pub struct StopDirectory {
    /// Stop id → position in `entries`.
    index: HashMap<StopId, usize>,
    /// (id, display name, lowercased display name), in insertion order.
    entries: Vec<(StopId, String, String)>,
}

impl StopDirectory {
    /// Build a directory from (id, display name) rows.
    ///
    /// A repeated stop id replaces the earlier name, matching how the
    /// tables are keyed.
    pub fn new(rows: impl IntoIterator<Item = (StopId, String)>) -> Self {
        let mut directory = Self::default();
        for (id, name) in rows {
            directory.insert(id, name);
        }
        directory
    }

    fn insert(&mut self, id: StopId, name: String) {
        let lowered = name.to_lowercase();
        match self.index.get(&id) {
            Some(&slot) => {
                self.entries[slot].1 = name;
                self.entries[slot].2 = lowered;
            }
            None => {
                self.index.insert(id.clone(), self.entries.len());
                self.entries.push((id, name, lowered));
            }
        }
    }

    /// Look up a stop's display name.
    pub fn name(&self, id: &StopId) -> Option<&str> {
        self.index
            .get(id)
            .map(|&slot| self.entries[slot].1.as_str())
    }

    /// Check whether a stop id is known.
    pub fn contains(&self, id: &StopId) -> bool {
        self.index.contains_key(id)
    }

    /// Resolve a free-text place name to every matching stop id.
    ///
    /// Returns the stops whose display name contains the (trimmed) query
    /// as a case-insensitive substring, in directory order. An empty or
    /// all-whitespace query resolves to no stops. An empty result is a
    /// normal outcome, not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use route_planner::domain::StopId;
    /// use route_planner::stops::StopDirectory;
    ///
    /// let directory = StopDirectory::new(vec![
    ///     (StopId::new("P1"), "Paris Montparnasse".to_string()),
    ///     (StopId::new("P2"), "Paris Gare de Lyon".to_string()),
    ///     (StopId::new("R1"), "Rennes".to_string()),
    /// ]);
    ///
    /// assert_eq!(directory.resolve("paris").len(), 2);
    /// assert_eq!(directory.resolve("Rennes"), vec![StopId::new("R1")]);
    /// assert!(directory.resolve("Bordeaux").is_empty());
    /// ```
    pub fn resolve(&self, place: &str) -> Vec<StopId> {
        let needle = place.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|(_, _, lowered)| lowered.contains(&needle))
            .map(|(id, _, _)| id.clone())
            .collect()
    }

    /// Returns the number of stops in the directory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the directory holds no stops.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (id, display name) pairs in directory order.
    pub fn iter(&self) -> impl Iterator<Item = (&StopId, &str)> {
        self.entries.iter().map(|(id, name, _)| (id, name.as_str()))
    }
}
