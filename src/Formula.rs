/// Ordered element -> count map with the arithmetic used when fragments are added up
/// (scaling by a multiplier, element-wise merge) and the two text renderings used in
/// reports: compact "C34H28N3O5Cl1" and spaced "C34 H28 N3 O5 Cl1".
pub mod stoichiometry;
/// Periodic table of relative atomic masses (IUPAC) and the molar mass of a stoichiometry.
pub mod molmass;
/// Chemical formula parser.
/// Reads plain formulas ("C17H17ClN6O3"), decimal counts ("O7.5"), nested groups
/// ("Ca(OH)2", "[Co(NH3)6]Cl3"), hydrates and adducts ("CuSO4·5H2O"), leading
/// multipliers ("2H2O", "0.5H2O") and trailing charges ("Na+", "SO4-2").
/// Only symbols present in the Hofmann volume table are accepted, so compound
/// names that happen to look like formulas fall through to the lookup stage.
pub mod formula_parser;
mod formula_parser_tests;
