//! Hofmann element volume table
//!
//! Average crystallographic volumes of the elements at 298 K, taken from
//! Hofmann, D.W.M. (2002), Fast estimation of crystal densities.
//! Acta Cryst. B, 58: 489-493. https://doi.org/10.1107/S0108768101021814
//!
//! Elements for which Hofmann gives no value are kept in the table as
//! [`VolumeEntry::Undefined`]; elements that are not in the table at all are
//! unrecognized and rejected by the parser and by the calculator.
use crate::Formula::molmass::{atomic_number, is_element_symbol};
use crate::errors::HofCalcError;
use log::{info, warn};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Reference volume of one element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeEntry {
    /// tabulated volume in Å³ at 298 K
    Defined(f64),
    /// element is known but has no tabulated volume, the 18 Å³ rule is used instead
    Undefined,
}

impl VolumeEntry {
    pub fn value(&self) -> Option<f64> {
        match self {
            VolumeEntry::Defined(v) => Some(*v),
            VolumeEntry::Undefined => None,
        }
    }
}

#[rustfmt::skip]
const HOFMANN_VOLUMES: &[(&str, Option<f64>)] = &[
    ("H", Some(5.08)), ("He", None), ("Li", Some(22.6)), ("Be", Some(36.0)), ("B", Some(13.24)),
    ("C", Some(13.87)), ("N", Some(11.8)), ("O", Some(11.39)), ("F", Some(11.17)), ("Ne", None),
    ("Na", Some(26.0)), ("Mg", Some(36.0)), ("Al", Some(39.6)), ("Si", Some(37.3)), ("P", Some(29.5)),
    ("S", Some(25.2)), ("Cl", Some(25.8)), ("Ar", None), ("K", Some(36.0)), ("Ca", Some(45.0)),
    ("Sc", Some(42.0)), ("Ti", Some(27.3)), ("V", Some(24.0)), ("Cr", Some(28.1)), ("Mn", Some(31.9)),
    ("Fe", Some(30.4)), ("Co", Some(29.4)), ("Ni", Some(26.0)), ("Cu", Some(26.9)), ("Zn", Some(39.0)),
    ("Ga", Some(37.8)), ("Ge", Some(41.6)), ("As", Some(36.4)), ("Se", Some(30.3)), ("Br", Some(32.7)),
    ("Kr", None), ("Rb", Some(42.0)), ("Sr", Some(47.0)), ("Y", Some(44.0)), ("Zr", Some(27.0)),
    ("Nb", Some(37.0)), ("Mo", Some(38.0)), ("Tc", Some(38.0)), ("Ru", Some(37.3)), ("Rh", Some(31.2)),
    ("Pd", Some(35.0)), ("Ag", Some(35.0)), ("Cd", Some(51.0)), ("In", Some(55.0)), ("Sn", Some(52.8)),
    ("Sb", Some(48.0)), ("Te", Some(46.7)), ("I", Some(46.2)), ("Xe", Some(45.0)), ("Cs", Some(46.0)),
    ("Ba", Some(66.0)), ("La", Some(58.0)), ("Ce", Some(54.0)), ("Pr", Some(57.0)), ("Nd", Some(50.0)),
    ("Pm", None), ("Sm", Some(50.0)), ("Eu", Some(53.0)), ("Gd", Some(56.0)), ("Tb", Some(45.0)),
    ("Dy", Some(50.0)), ("Ho", Some(42.0)), ("Er", Some(54.0)), ("Tm", Some(49.0)), ("Yb", Some(59.0)),
    ("Lu", Some(35.0)), ("Hf", Some(40.0)), ("Ta", Some(43.0)), ("W", Some(38.8)), ("Re", Some(42.7)),
    ("Os", Some(41.9)), ("Ir", Some(34.3)), ("Pt", Some(38.0)), ("Au", Some(43.0)), ("Hg", Some(38.0)),
    ("Tl", Some(54.0)), ("Pb", Some(52.0)), ("Bi", Some(60.0)), ("Po", None), ("At", None),
    ("Rn", None), ("Fr", None), ("Ra", None), ("Ac", Some(74.0)), ("Th", Some(56.0)),
    ("Pa", Some(60.0)), ("U", Some(58.0)), ("Np", Some(45.0)), ("Pu", None), ("Am", Some(17.0)),
    ("Cm", None), ("Bk", None), ("Cf", None), ("Es", None), ("Fm", None),
];

/// Read-only symbol -> volume table. Built once and then shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct HofmannTable {
    entries: HashMap<String, VolumeEntry>,
}

impl Default for HofmannTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl HofmannTable {
    /// the table published by Hofmann, H through Fm
    pub fn builtin() -> Self {
        let entries = HOFMANN_VOLUMES
            .iter()
            .map(|(el, v)| {
                let entry = match v {
                    Some(v) => VolumeEntry::Defined(*v),
                    None => VolumeEntry::Undefined,
                };
                (el.to_string(), entry)
            })
            .collect();
        Self { entries }
    }

    /// Builds a table from symbol -> volume pairs, `None` meaning undefined.
    /// Symbols must be element symbols and volumes finite and non-negative.
    pub fn from_entries<I>(entries: I) -> Result<Self, HofCalcError>
    where
        I: IntoIterator<Item = (String, Option<f64>)>,
    {
        let mut table = HashMap::new();
        for (symbol, volume) in entries {
            if !is_element_symbol(&symbol) {
                return Err(HofCalcError::InvalidVolumeTable(format!(
                    "'{}' is not an element symbol",
                    symbol
                )));
            }
            let entry = match volume {
                Some(v) if v.is_finite() && v >= 0.0 => VolumeEntry::Defined(v),
                Some(v) => {
                    return Err(HofCalcError::InvalidVolumeTable(format!(
                        "volume of '{}' must be a non-negative number, got {}",
                        symbol, v
                    )));
                }
                None => VolumeEntry::Undefined,
            };
            table.insert(symbol, entry);
        }
        Ok(Self { entries: table })
    }

    /// Loads a flat JSON object `{"H": 5.08, "He": null, ...}`.
    pub fn load_json(path: &Path) -> Result<Self, HofCalcError> {
        if !path.exists() {
            return Err(HofCalcError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("volume table '{}' does not exist", path.display()),
            )));
        }
        let content = fs::read_to_string(path)?;
        let raw: HashMap<String, Option<f64>> = serde_json::from_str(&content)?;
        if raw.is_empty() {
            warn!("volume table '{}' is empty", path.display());
        }
        let table = Self::from_entries(raw)?;
        info!(
            "loaded Hofmann volume table from '{}' ({} elements, {} undefined)",
            path.display(),
            table.len(),
            table.undefined_count()
        );
        Ok(table)
    }

    /// Writes the table in the same flat format `load_json` reads.
    pub fn save_json(&self, path: &Path) -> Result<(), HofCalcError> {
        let ordered: BTreeMap<&str, Option<f64>> = self
            .entries
            .iter()
            .map(|(el, e)| (el.as_str(), e.value()))
            .collect();
        let content = serde_json::to_string_pretty(&ordered)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<VolumeEntry> {
        self.entries.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn undefined_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, VolumeEntry::Undefined))
            .count()
    }

    /// entries sorted by atomic number, for display
    pub fn iter_periodic(&self) -> Vec<(&str, VolumeEntry)> {
        let mut v: Vec<(&str, VolumeEntry)> = self
            .entries
            .iter()
            .map(|(el, e)| (el.as_str(), *e))
            .collect();
        v.sort_by_key(|(el, _)| atomic_number(el).unwrap_or(usize::MAX));
        v
    }
}
