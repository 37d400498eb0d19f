/// Client for the PubChem PUG REST service: compound name or SMILES -> CID and molecular formula.
pub mod pubchem_api;
mod pubchem_api_tests;
/// Splits the user input into fragments and resolves every fragment to a stoichiometry,
/// first as a formula, then through the compound lookup.
pub mod fragment_resolver;
mod fragment_resolver_tests;
