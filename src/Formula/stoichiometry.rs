use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

// 2^53, above it f64 no longer holds every integer
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Element -> atom count mapping. Counts are real numbers so that hemihydrates
/// and other fractional multiples (0.5H2O) can be expressed.
///
/// Entries keep the order in which an element was first added, which is the
/// order used for display and for the summary export. Equality does not depend
/// on that order.
#[derive(Debug, Clone, Default)]
pub struct Stoichiometry {
    entries: Vec<(String, f64)>,
}

impl Stoichiometry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// adds `count` atoms of `element`, creating the entry at zero if it is absent
    pub fn add(&mut self, element: &str, count: f64) {
        match self.entries.iter_mut().find(|(el, _)| el == element) {
            Some((_, n)) => *n += count,
            None => self.entries.push((element.to_string(), count)),
        }
    }

    pub fn get(&self, element: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(el, _)| el == element)
            .map(|(_, n)| *n)
    }

    pub fn contains(&self, element: &str) -> bool {
        self.get(element).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(el, n)| (el.as_str(), *n))
    }

    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(el, _)| el.as_str())
    }

    /// every count multiplied by `factor` (leading multipliers like 2H2O)
    pub fn scaled(&self, factor: f64) -> Stoichiometry {
        Stoichiometry {
            entries: self
                .entries
                .iter()
                .map(|(el, n)| (el.clone(), n * factor))
                .collect(),
        }
    }

    /// element-wise sum of `other` into `self`
    pub fn merge(&mut self, other: &Stoichiometry) {
        for (el, n) in other.iter() {
            self.add(el, n);
        }
    }

    /// element-wise sum of many stoichiometries, in order of first appearance
    pub fn sum<'a, I>(parts: I) -> Stoichiometry
    where
        I: IntoIterator<Item = &'a Stoichiometry>,
    {
        let mut total = Stoichiometry::new();
        for part in parts {
            total.merge(part);
        }
        total
    }

    /// "C34 H28 N3 O5 Cl1", the form shown in result tables
    pub fn to_spaced_string(&self) -> String {
        self.entries
            .iter()
            .map(|(el, n)| format!("{}{}", el, n))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Stoichiometry {
    /// compact form "C34H28N3O5Cl1"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (el, n) in &self.entries {
            write!(f, "{}{}", el, n)?;
        }
        Ok(())
    }
}

impl PartialEq for Stoichiometry {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(el, n)| other.get(el) == Some(n))
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for Stoichiometry {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut st = Stoichiometry::new();
        for (el, n) in iter {
            st.add(el.as_ref(), n);
        }
        st
    }
}

impl Serialize for Stoichiometry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // whole counts are written as integers: {"C": 34, "O": 7.5}
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (el, n) in &self.entries {
            if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER {
                map.serialize_entry(el, &(*n as i64))?;
            } else {
                map.serialize_entry(el, n)?;
            }
        }
        map.end()
    }
}
