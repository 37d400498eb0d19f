//! # HofCalc API
//!
//! ## Aim
//! One call from the text typed by a user to the finished [`Report`]:
//! resolve fragments, sum them, compute the Hofmann volume and density at the
//! requested temperature, compose the report.
//!
//! ## Main Data Structures and Logic
//! - [`estimate`]: the whole pipeline with explicit settings, table and lookup
//! - [`HofCalc`]: a session owning its settings, volume table and PubChem client,
//!   used by the command line and the interactive menu
//!
//! ## Usage
//! ```rust, ignore
//! let session = HofCalc::new(Settings::default())?;
//! let report = session.estimate("carbamazepine; indomethacin")?;
//! report.print_report();
//! ```
use crate::Report::composer::{Report, compose};
use crate::Resolver::fragment_resolver::FragmentResolver;
use crate::Resolver::pubchem_api::{CompoundLookup, PubChemClient};
use crate::Volumes::hofmann_table::HofmannTable;
use crate::Volumes::volume_calc::VolumeCalculator;
use crate::errors::HofCalcError;
use crate::settings::{LookupSettings, Settings};
use log::{info, warn};
use reqwest::blocking::Client;
use std::path::{Path, PathBuf};

/// Runs resolution, volume, density and composition for `raw` with the
/// temperature, unit cell volume and split mode of `settings`. `lookup` is
/// ignored when lookups are disabled in the settings.
pub fn estimate(
    raw: &str,
    settings: &Settings,
    table: &HofmannTable,
    lookup: Option<&dyn CompoundLookup>,
) -> Result<Report, HofCalcError> {
    let lookup = if settings.lookup.enabled { lookup } else { None };
    let resolver = FragmentResolver::new(table, lookup, settings.split_mode);
    let formula = resolver.resolve(raw)?;

    let calculator = VolumeCalculator::new(table);
    let temperature = settings.temperature;
    let density = calculator.compute_density(formula.combined(), temperature)?;
    let individual_volumes = calculator.compute_individual_volumes(&formula, temperature)?;
    Ok(compose(
        &formula,
        &density.volume,
        &density,
        temperature,
        settings.unit_cell_volume,
        &individual_volumes,
    ))
}

/// PubChem client for the lookup settings, None when lookups are off or the
/// HTTP client cannot be built.
pub fn lookup_client(settings: &LookupSettings) -> Option<PubChemClient<Client>> {
    if !settings.enabled {
        return None;
    }
    match PubChemClient::new(&settings.base_url, settings.timeout_secs) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("compound lookup unavailable: {}", e);
            None
        }
    }
}

pub struct HofCalc {
    settings: Settings,
    table: HofmannTable,
    client: Option<PubChemClient<Client>>,
}

impl HofCalc {
    pub fn new(settings: Settings) -> Result<Self, HofCalcError> {
        let table = settings.load_volume_table()?;
        let client = lookup_client(&settings.lookup);
        Ok(Self {
            settings,
            table,
            client,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> &HofmannTable {
        &self.table
    }

    /// Replaces the settings, reloading the table and the client as needed.
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), HofCalcError> {
        if settings.volume_table != self.settings.volume_table {
            self.table = settings.load_volume_table()?;
        }
        if settings.lookup != self.settings.lookup {
            self.client = lookup_client(&settings.lookup);
        }
        self.settings = settings;
        Ok(())
    }

    pub fn estimate(&self, raw: &str) -> Result<Report, HofCalcError> {
        self.estimate_with(raw, &self.settings)
    }

    /// Same as [`HofCalc::estimate`] with per-query settings (temperature, cell
    /// volume, split mode); table and client stay those of the session.
    pub fn estimate_with(&self, raw: &str, settings: &Settings) -> Result<Report, HofCalcError> {
        let lookup = self.client.as_ref().map(|c| c as &dyn CompoundLookup);
        estimate(raw, settings, &self.table, lookup)
    }

    /// Writes the summary into the configured export directory, if any.
    pub fn export(&self, report: &Report) -> Result<Option<PathBuf>, HofCalcError> {
        match &self.settings.export_dir {
            Some(dir) => {
                let path = report.write_summary(Path::new(dir))?;
                info!("exported {}", path.display());
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}
