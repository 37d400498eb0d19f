use crate::Formula::molmass::calculate_molar_mass;
use crate::Formula::stoichiometry::Stoichiometry;
use crate::Resolver::fragment_resolver::MolecularFormula;
use crate::Volumes::hofmann_table::{HofmannTable, VolumeEntry};
use crate::errors::HofCalcError;
use log::{info, warn};
use serde::Serialize;

/// thermal expansion coefficient, K^-1
pub const ALPHA: f64 = 0.95e-4;
/// temperature of the tabulated volumes, K
pub const REFERENCE_TEMPERATURE: f64 = 298.0;
/// per-atom volume of the 18 Å³ rule
pub const EIGHTEEN_ANGSTROM: f64 = 18.0;
/// atomic mass unit in grams
pub const AMU_IN_GRAMS: f64 = 1.66054e-24;
/// one Å³ in cm³
pub const CUBIC_ANGSTROM_IN_CM3: f64 = 1e-24;

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeResult {
    /// Hofmann volume, Å³
    pub volume: f64,
    /// 18 Å³ per non-hydrogen atom, a coarse cross-check of `volume`
    pub eighteen_angstrom_volume: f64,
    /// elements without a tabulated volume that were estimated with the 18 Å³ rule
    pub fallback_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityResult {
    /// g cm^-3
    pub density: f64,
    pub molecular_mass: f64,
    pub volume: VolumeResult,
}

/// Volume of one fragment, for the per-fragment breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentVolume {
    pub token: String,
    pub volume: f64,
}

/// Temperature-corrected additive volume and density from the Hofmann table.
pub struct VolumeCalculator<'a> {
    table: &'a HofmannTable,
}

impl<'a> VolumeCalculator<'a> {
    pub fn new(table: &'a HofmannTable) -> Self {
        Self { table }
    }

    /// V = sum n_i v_i (1 + alpha (T - 298)) over tabulated elements, plus 18 n_i
    /// for elements marked undefined. T in kelvin, not validated.
    pub fn compute_volume(
        &self,
        stoichiometry: &Stoichiometry,
        temperature: f64,
    ) -> Result<VolumeResult, HofCalcError> {
        let correction = 1.0 + ALPHA * (temperature - REFERENCE_TEMPERATURE);
        let mut volume = 0.0;
        let mut eighteen_angstrom_volume = 0.0;
        let mut fallback_elements = Vec::new();
        for (element, count) in stoichiometry.iter() {
            let entry =
                self.table
                    .get(element)
                    .ok_or_else(|| HofCalcError::UnrecognizedElement {
                        symbol: element.to_string(),
                    })?;
            if element != "H" {
                eighteen_angstrom_volume += EIGHTEEN_ANGSTROM * count;
            }
            match entry {
                VolumeEntry::Defined(v) => volume += v * count * correction,
                VolumeEntry::Undefined => {
                    warn!(
                        "element {} does not have a Hofmann volume, using the 18 Å rule",
                        element
                    );
                    volume += EIGHTEEN_ANGSTROM * count;
                    fallback_elements.push(element.to_string());
                }
            }
        }
        Ok(VolumeResult {
            volume: round2(volume),
            eighteen_angstrom_volume: round2(eighteen_angstrom_volume),
            fallback_elements,
        })
    }

    /// Density from the relative molecular mass and the volume computed here
    /// for the same stoichiometry and temperature.
    pub fn compute_density(
        &self,
        stoichiometry: &Stoichiometry,
        temperature: f64,
    ) -> Result<DensityResult, HofCalcError> {
        let molecular_mass = calculate_molar_mass(stoichiometry)?;
        let volume = self.compute_volume(stoichiometry, temperature)?;
        if volume.volume <= 0.0 {
            return Err(HofCalcError::DegenerateVolume);
        }
        let mass_g = molecular_mass * AMU_IN_GRAMS;
        let volume_cm3 = volume.volume * CUBIC_ANGSTROM_IN_CM3;
        let density = round2(mass_g / volume_cm3);
        info!(
            "{}: V = {} Å3, M = {:.3}, density = {} g/cm3 at {} K",
            stoichiometry, volume.volume, molecular_mass, density, temperature
        );
        Ok(DensityResult {
            density,
            molecular_mass,
            volume,
        })
    }

    /// volume of every fragment, in input order, each token once
    pub fn compute_individual_volumes(
        &self,
        formula: &MolecularFormula,
        temperature: f64,
    ) -> Result<Vec<FragmentVolume>, HofCalcError> {
        let mut volumes: Vec<FragmentVolume> = Vec::new();
        for fragment in formula.fragments() {
            if volumes.iter().any(|v| v.token == fragment.token) {
                continue;
            }
            let result = self.compute_volume(&fragment.stoichiometry, temperature)?;
            volumes.push(FragmentVolume {
                token: fragment.token.clone(),
                volume: result.volume,
            });
        }
        Ok(volumes)
    }
}
