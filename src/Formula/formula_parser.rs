use crate::Formula::molmass::is_element_symbol;
use crate::Formula::stoichiometry::Stoichiometry;
use crate::Volumes::hofmann_table::HofmannTable;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// trailing charge: "O2-" -> "O2", "O-2" -> "O", "Fe+3" -> "Fe", "SO4^2-" is not handled
static CHARGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\^?[+-]+\d*$").expect("valid charge regex"));

// "(S)" is left out, it is a valid sulfur group
const PHASE_MARKS: [&str; 8] = ["(aq)", "(AQ)", "(s)", "(l)", "(L)", "(g)", "(G)", "(c)"];

/// hydrate and adduct separators, CuSO4·5H2O
const ADDUCT_SEPARATORS: [char; 2] = ['·', '*'];

/// Why a token could not be read as a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,
    #[error("no element symbols found")]
    NoElements,
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("'{0}' is not an element symbol")]
    UnknownSymbol(String),
    #[error("element '{0}' has no entry in the Hofmann volume table")]
    NotInVolumeTable(String),
    #[error("unbalanced brackets")]
    UnbalancedBracket,
    #[error("no leading multiplier")]
    NoLeadingMultiplier,
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// Reads formula tokens into stoichiometries. Every symbol is cross-checked
/// against the volume table: a token whose symbols are real elements but that
/// references an element without an entry (drug acronyms that happen to spell
/// element symbols) is rejected rather than partially accepted.
pub struct FormulaParser<'a> {
    table: &'a HofmannTable,
}

impl<'a> FormulaParser<'a> {
    pub fn new(table: &'a HofmannTable) -> Self {
        Self { table }
    }

    /// Direct parse, then the leading-multiplier retry.
    pub fn parse(&self, token: &str) -> Result<Stoichiometry, FormulaError> {
        match self.parse_direct(token) {
            Ok(st) => Ok(st),
            Err(direct_err) => match self.parse_with_multiplier(token) {
                Ok(st) => Ok(st),
                Err(FormulaError::NoLeadingMultiplier) => Err(direct_err),
                Err(e) => Err(e),
            },
        }
    }

    /// Parses a token without a leading multiplier: "C18H25.0N1O7.5P1", "Ca(NO3)2", "CuSO4·5H2O"
    pub fn parse_direct(&self, token: &str) -> Result<Stoichiometry, FormulaError> {
        let formula = normalize(token);
        if formula.is_empty() {
            return Err(FormulaError::Empty);
        }
        let mut parts = formula.split(ADDUCT_SEPARATORS);
        // first part may not carry a multiplier, that is the job of parse_with_multiplier
        let first = parts.next().unwrap_or_default();
        let mut total = self.parse_segment(first)?;
        for part in parts {
            let (factor, body) = split_multiplier(part).unwrap_or((1.0, part));
            total.merge(&self.parse_segment(body)?.scaled(factor));
        }
        debug!("parsed '{}' as {}", token, total);
        Ok(total)
    }

    /// Treats the leading run of digits (with at most one decimal point) as a
    /// multiplier applied to the rest of the token: "2H2O", "0.5CaSO4".
    pub fn parse_with_multiplier(&self, token: &str) -> Result<Stoichiometry, FormulaError> {
        let trimmed = token.trim();
        let (factor, body) = split_multiplier(trimmed).ok_or(FormulaError::NoLeadingMultiplier)?;
        let st = self.parse_direct(body)?;
        debug!("parsed '{}' as {} x ({})", token, factor, st);
        Ok(st.scaled(factor))
    }

    // every adduct segment must hold at least one element: "H2O·" and "H2O**" are not formulas
    fn parse_segment(&self, body: &str) -> Result<Stoichiometry, FormulaError> {
        let st = self.parse_body(body.trim())?;
        if st.is_empty() {
            return Err(FormulaError::NoElements);
        }
        Ok(st)
    }

    fn parse_body(&self, body: &str) -> Result<Stoichiometry, FormulaError> {
        let chars: Vec<char> = body.chars().collect();
        let mut pos = 0;
        let st = self.parse_sequence(&chars, &mut pos, None)?;
        if pos < chars.len() {
            return Err(FormulaError::UnexpectedChar {
                ch: chars[pos],
                pos,
            });
        }
        Ok(st)
    }

    // element symbols and bracketed groups, each followed by an optional count
    fn parse_sequence(
        &self,
        chars: &[char],
        pos: &mut usize,
        closer: Option<char>,
    ) -> Result<Stoichiometry, FormulaError> {
        let mut st = Stoichiometry::new();
        while *pos < chars.len() {
            let c = chars[*pos];
            if c.is_ascii_uppercase() {
                let start = *pos;
                *pos += 1;
                if *pos < chars.len() && chars[*pos].is_ascii_lowercase() {
                    *pos += 1;
                }
                let symbol: String = chars[start..*pos].iter().collect();
                self.check_symbol(&symbol)?;
                let count = read_number(chars, pos)?.unwrap_or(1.0);
                st.add(&symbol, count);
            } else if let Some(close) = matching_bracket(c) {
                *pos += 1;
                let group = self.parse_sequence(chars, pos, Some(close))?;
                if *pos >= chars.len() || chars[*pos] != close {
                    return Err(FormulaError::UnbalancedBracket);
                }
                *pos += 1;
                let count = read_number(chars, pos)?.unwrap_or(1.0);
                st.merge(&group.scaled(count));
            } else if Some(c) == closer {
                return Ok(st);
            } else if matches!(c, ')' | ']' | '}') {
                return Err(FormulaError::UnbalancedBracket);
            } else {
                return Err(FormulaError::UnexpectedChar { ch: c, pos: *pos });
            }
        }
        if closer.is_some() {
            return Err(FormulaError::UnbalancedBracket);
        }
        Ok(st)
    }

    fn check_symbol(&self, symbol: &str) -> Result<(), FormulaError> {
        if !is_element_symbol(symbol) {
            return Err(FormulaError::UnknownSymbol(symbol.to_string()));
        }
        if !self.table.contains(symbol) {
            return Err(FormulaError::NotInVolumeTable(symbol.to_string()));
        }
        Ok(())
    }
}

fn matching_bracket(c: char) -> Option<char> {
    match c {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

// digits with an optional decimal part, "25.0"; a '.' not followed by a digit is left alone
fn read_number(chars: &[char], pos: &mut usize) -> Result<Option<f64>, FormulaError> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return Ok(None);
    }
    if *pos + 1 < chars.len() && chars[*pos] == '.' && chars[*pos + 1].is_ascii_digit() {
        *pos += 1;
        while *pos < chars.len() && chars[*pos].is_ascii_digit() {
            *pos += 1;
        }
    }
    let text: String = chars[start..*pos].iter().collect();
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| FormulaError::InvalidNumber(text))
}

/// "0.5CaSO4" -> (0.5, "CaSO4"); None when the token does not start with a number
pub fn split_multiplier(token: &str) -> Option<(f64, &str)> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in token.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    let (number, body) = token.split_at(end);
    if body.is_empty() {
        return None;
    }
    let factor = number.parse::<f64>().ok()?;
    Some((factor, body))
}

/// Removes what is not part of the atom count: '|', phase marks and trailing charge.
pub fn normalize(token: &str) -> String {
    let mut formula = token.trim().replace('|', "");
    formula = filter_phases_marks(&formula);
    strip_charge(&formula)
}

fn filter_phases_marks(formula: &str) -> String {
    let mut formula = formula.to_string();
    for phase in PHASE_MARKS {
        formula = formula.replace(phase, "");
    }
    formula
}

/// Strips a trailing charge. Ambiguous by nature: "O2-" keeps two oxygens,
/// "O-2" keeps one.
pub fn strip_charge(formula: &str) -> String {
    CHARGE_SUFFIX.replace(formula, "").into_owned()
}
