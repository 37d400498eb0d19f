//! # HofCalc
//!
//! Estimates the crystallographic volume and density of a molecule, salt,
//! solvate or co-crystal from its chemical formula (or compound names resolved
//! through PubChem) using the mean atomic volumes published by Hofmann.
//!
//! ```rust, ignore
//! use hofcalc::hofcalc_api::estimate;
//!
//! let report = estimate("zopiclone; 2H2O", &settings, &HofmannTable::builtin(), Some(&client))?;
//! println!("{} Å3, {} g/cm3", report.hofmann_volume, report.hofmann_density);
//! ```
#[allow(non_snake_case)]
pub mod Formula;
#[allow(non_snake_case)]
pub mod Report;
#[allow(non_snake_case)]
pub mod Resolver;
#[allow(non_snake_case)]
pub mod Volumes;
pub mod cli;
pub mod errors;
pub mod hofcalc_api;
pub mod settings;
