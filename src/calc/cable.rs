//! Cable resistance reference table.

use std::collections::BTreeMap;

/// Reference resistances shipped with the calculator (Ω/km).
pub const REFERENCE_CABLES: &[(&str, f64)] = &[
    ("NYY 3x70 mm²", 0.268),
    ("NYY 3x35 mm²", 0.524),
    ("NFA2X-T 2x70 + N70 mm²", 0.4),
];

/// Cable identifier → resistance per kilometre (Ω/km).
///
/// Keys are matched exactly; a miss is a normal outcome, not an error.
///
/// # Examples
///
/// ```
/// use grid_loss_roi::calc::cable::CableTable;
///
/// let cables = CableTable::reference();
/// assert_eq!(cables.ohms_per_km("NYY 3x70 mm²"), Some(0.268));
/// assert_eq!(cables.ohms_per_km("nyy 3x70 mm²"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CableTable {
    entries: BTreeMap<String, f64>,
}

impl CableTable {
    /// Creates a table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates the reference table from [`REFERENCE_CABLES`].
    pub fn reference() -> Self {
        REFERENCE_CABLES
            .iter()
            .map(|&(name, ohms)| (name.to_string(), ohms))
            .collect()
    }

    /// Adds or replaces an entry, returning the previous resistance if any.
    pub fn insert(&mut self, cable_type: impl Into<String>, ohms_per_km: f64) -> Option<f64> {
        self.entries.insert(cable_type.into(), ohms_per_km)
    }

    /// Resistance per kilometre for an exact cable identifier.
    pub fn ohms_per_km(&self, cable_type: &str) -> Option<f64> {
        self.entries.get(cable_type).copied()
    }

    /// Returns `true` when the identifier is in the table.
    pub fn contains(&self, cable_type: &str) -> bool {
        self.entries.contains_key(cable_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, &ohms)| (name.as_str(), ohms))
    }
}

impl Default for CableTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl FromIterator<(String, f64)> for CableTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, f64)> for CableTable {
    fn extend<I: IntoIterator<Item = (String, f64)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
