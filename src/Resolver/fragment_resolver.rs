//! # Fragment Resolver Module
//!
//! ## Purpose
//! Turns the free text typed by a user ("carbamazepine; indomethacin",
//! "zopiclone; 2H2O", "calcium; sulfate; 0.5H2O") into one combined
//! stoichiometry plus the stoichiometry of every fragment.
//!
//! ## Logic
//! 1. Rich-text markup (MarvinSketch copies formulas as `<b>C<sub>15</sub>...`)
//!    is stripped and the reconstructed text is kept for the caller.
//! 2. The text is split into tokens, see [`SplitMode`].
//! 3. Every token goes through an ordered list of [`ResolutionStage`]s until
//!    one succeeds: direct formula, leading multiplier, lookup in the most
//!    likely mode (name or SMILES), lookup in the other mode.
//! 4. A token that no stage resolves aborts the whole input; nothing is dropped
//!    silently from the sum.
//!
//! Lookups are memoised per call only, a repeated token ("codeine; codeine")
//! costs one request.
use crate::Formula::formula_parser::FormulaParser;
use crate::Formula::stoichiometry::Stoichiometry;
use crate::Resolver::pubchem_api::{CompoundLookup, LookupMode};
use crate::Volumes::hofmann_table::HofmannTable;
use crate::errors::HofCalcError;
use log::{debug, info, warn};
use regex::Regex;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]+>").expect("valid tag regex"));
// aromatic atom next to a ring closure digit: c1ccccc1, n1cc...
static AROMATIC_RING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[cnos][0-9]|[0-9][cnos]").expect("valid ring regex"));

/// How raw text is cut into fragment tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// split on ';' only, names may contain spaces and commas
    #[default]
    Semicolon,
    /// ';' if present, else ',', else whitespace when every piece is a formula
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResolutionStage {
    DirectFormula,
    MultiplierPrefix,
    Lookup(LookupMode),
}

impl fmt::Display for ResolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStage::DirectFormula => f.write_str("formula"),
            ResolutionStage::MultiplierPrefix => f.write_str("formula with multiplier"),
            ResolutionStage::Lookup(mode) => write!(f, "lookup by {}", mode),
        }
    }
}

/// one failed stage and why it failed
#[derive(Debug, Clone, PartialEq)]
pub struct StageAttempt {
    pub stage: ResolutionStage,
    pub reason: String,
}

/// where a looked-up fragment came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provenance {
    pub cid: u64,
    pub url: String,
    pub mode: LookupMode,
    pub canonical_formula: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub token: String,
    pub stoichiometry: Stoichiometry,
    pub stage: ResolutionStage,
    pub provenance: Option<Provenance>,
}

/// All fragments of one input, in input order, and their element-wise sum.
/// The sum is computed once on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MolecularFormula {
    fragments: Vec<Fragment>,
    combined: Stoichiometry,
    interpreted_input: Option<String>,
}

impl MolecularFormula {
    pub fn from_fragments(fragments: Vec<Fragment>, interpreted_input: Option<String>) -> Self {
        let combined = Stoichiometry::sum(fragments.iter().map(|f| &f.stoichiometry));
        Self {
            fragments,
            combined,
            interpreted_input,
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn combined(&self) -> &Stoichiometry {
        &self.combined
    }

    /// the tokens as the user typed them (trimmed)
    pub fn user_input(&self) -> Vec<String> {
        self.fragments.iter().map(|f| f.token.clone()).collect()
    }

    /// plain text rebuilt from markup, if the input contained any
    pub fn interpreted_input(&self) -> Option<&str> {
        self.interpreted_input.as_deref()
    }

    /// more than one distinct token; "water; water" is a single fragment repeated
    pub fn is_multi_fragment(&self) -> bool {
        match self.fragments.split_first() {
            Some((first, rest)) => rest.iter().any(|f| f.token != first.token),
            None => false,
        }
    }
}

pub struct FragmentResolver<'a> {
    parser: FormulaParser<'a>,
    lookup: Option<&'a dyn CompoundLookup>,
    split_mode: SplitMode,
}

impl<'a> FragmentResolver<'a> {
    /// `lookup` None disables the name/SMILES fallback
    pub fn new(
        table: &'a HofmannTable,
        lookup: Option<&'a dyn CompoundLookup>,
        split_mode: SplitMode,
    ) -> Self {
        Self {
            parser: FormulaParser::new(table),
            lookup,
            split_mode,
        }
    }

    pub fn resolve(&self, raw_input: &str) -> Result<MolecularFormula, HofCalcError> {
        let (text, interpreted_input) = if has_markup(raw_input) {
            let plain = strip_markup(raw_input);
            info!("Interpreting formula as {}", plain);
            (plain.clone(), Some(plain))
        } else {
            (raw_input.to_string(), None)
        };

        let tokens = self.tokenize(&text);
        if tokens.is_empty() {
            return Err(HofCalcError::EmptyInput);
        }

        let mut resolved: HashMap<String, Fragment> = HashMap::new();
        let mut fragments = Vec::with_capacity(tokens.len());
        for token in tokens {
            let fragment = match resolved.get(&token) {
                Some(fragment) => fragment.clone(),
                None => {
                    let fragment = self.resolve_token(&token)?;
                    resolved.insert(token.clone(), fragment.clone());
                    fragment
                }
            };
            fragments.push(fragment);
        }
        let formula = MolecularFormula::from_fragments(fragments, interpreted_input);
        info!(
            "resolved {} fragment(s), total atoms: {}",
            formula.fragments().len(),
            formula.combined().to_spaced_string()
        );
        Ok(formula)
    }

    /// cuts the cleaned text into trimmed, non-empty tokens
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let pieces: Vec<&str> = match self.split_mode {
            SplitMode::Semicolon => text.split(';').collect(),
            SplitMode::Auto => {
                if text.contains(';') {
                    text.split(';').collect()
                } else if text.contains(',') {
                    text.split(',').collect()
                } else {
                    let words: Vec<&str> = text.split_whitespace().collect();
                    if words.len() > 1 && words.iter().all(|w| self.parser.parse(w).is_ok()) {
                        words
                    } else {
                        vec![text]
                    }
                }
            }
        };
        pieces
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect()
    }

    /// stages tried for `token`, in order
    pub fn stages_for(&self, token: &str) -> Vec<ResolutionStage> {
        let mut stages = vec![
            ResolutionStage::DirectFormula,
            ResolutionStage::MultiplierPrefix,
        ];
        if self.lookup.is_some() {
            let primary = if looks_like_smiles(token) {
                LookupMode::Smiles
            } else {
                LookupMode::Name
            };
            stages.push(ResolutionStage::Lookup(primary));
            stages.push(ResolutionStage::Lookup(primary.alternate()));
        }
        stages
    }

    pub fn resolve_token(&self, token: &str) -> Result<Fragment, HofCalcError> {
        let mut attempts = Vec::new();
        for stage in self.stages_for(token) {
            match self.attempt(stage, token) {
                Ok((stoichiometry, provenance)) => {
                    debug!("'{}' resolved by {}: {}", token, stage, stoichiometry);
                    return Ok(Fragment {
                        token: token.to_string(),
                        stoichiometry,
                        stage,
                        provenance,
                    });
                }
                Err(reason) => {
                    debug!("'{}' not resolved by {}: {}", token, stage, reason);
                    attempts.push(StageAttempt { stage, reason });
                }
            }
        }
        warn!(
            "Unable to parse '{}' as a chemical formula or find it by lookup",
            token
        );
        Err(HofCalcError::UnparseableToken {
            token: token.to_string(),
            attempts,
        })
    }

    fn attempt(
        &self,
        stage: ResolutionStage,
        token: &str,
    ) -> Result<(Stoichiometry, Option<Provenance>), String> {
        match stage {
            ResolutionStage::DirectFormula => self
                .parser
                .parse_direct(token)
                .map(|st| (st, None))
                .map_err(|e| e.to_string()),
            ResolutionStage::MultiplierPrefix => self
                .parser
                .parse_with_multiplier(token)
                .map(|st| (st, None))
                .map_err(|e| e.to_string()),
            ResolutionStage::Lookup(mode) => {
                let lookup = self.lookup.ok_or_else(|| "lookup disabled".to_string())?;
                let record = lookup.lookup(token, mode).map_err(|e| e.to_string())?;
                let st = self.parser.parse(&record.molecular_formula).map_err(|e| {
                    format!(
                        "formula '{}' of CID {} not readable: {}",
                        record.molecular_formula, record.cid, e
                    )
                })?;
                Ok((
                    st,
                    Some(Provenance {
                        cid: record.cid,
                        url: record.url,
                        mode,
                        canonical_formula: record.molecular_formula,
                    }),
                ))
            }
        }
    }
}

pub fn has_markup(raw: &str) -> bool {
    MARKUP_TAG.is_match(raw)
}

/// Plain text of rich-text markup with all whitespace removed. Only the bold
/// part is kept when there is one, that is where structure editors put the formula.
pub fn strip_markup(raw: &str) -> String {
    let document = Html::parse_fragment(raw);
    let mut text = String::new();
    if let Ok(selector) = Selector::parse("b") {
        if let Some(bold) = document.select(&selector).next() {
            text = bold.text().collect();
        }
    }
    if text.trim().is_empty() {
        text = document.root_element().text().collect();
    }
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// SMILES-specific characters, or aromatic atoms next to ring closures
pub fn looks_like_smiles(token: &str) -> bool {
    if token.chars().any(char::is_whitespace) {
        return false;
    }
    token.chars().any(|c| "=#@[]\\/".contains(c)) || AROMATIC_RING.is_match(token)
}
