#[cfg(test)]
mod tests {
    use crate::Formula::stoichiometry::Stoichiometry;
    use crate::Resolver::fragment_resolver::{
        FragmentResolver, ResolutionStage, SplitMode, has_markup, looks_like_smiles,
        strip_markup,
    };
    use crate::Resolver::pubchem_api::{CompoundLookup, CompoundRecord, LookupError, LookupMode};
    use crate::Volumes::hofmann_table::HofmannTable;
    use crate::errors::HofCalcError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// deterministic stand-in for PubChem
    struct MockLookup {
        records: HashMap<(String, LookupMode), CompoundRecord>,
        calls: RefCell<Vec<(String, LookupMode)>>,
    }

    impl MockLookup {
        fn new() -> Self {
            let mut lookup = Self {
                records: HashMap::new(),
                calls: RefCell::new(Vec::new()),
            };
            lookup.add("carbamazepine", LookupMode::Name, 2554, "C15H12N2O");
            lookup.add("indomethacin", LookupMode::Name, 3715, "C19H16ClNO4");
            lookup.add("codeine", LookupMode::Name, 5284371, "C18H21NO3");
            lookup.add("phosphoric acid", LookupMode::Name, 1004, "H3PO4");
            lookup.add("water", LookupMode::Name, 962, "H2O");
            lookup.add("ethanol", LookupMode::Name, 702, "C2H6O");
            lookup.add("sodium salicylate", LookupMode::Name, 16760658, "C7H5NaO3");
            // known only by name, the SMILES query fails
            lookup.add("CC(=O)Oc1ccccc1C(=O)O", LookupMode::Name, 2244, "C9H8O4");
            lookup.add("weird", LookupMode::Name, 1, "not a formula");
            lookup
        }

        fn add(&mut self, query: &str, mode: LookupMode, cid: u64, formula: &str) {
            self.records.insert(
                (query.to_string(), mode),
                CompoundRecord::new(cid, formula),
            );
        }

        fn calls(&self) -> Vec<(String, LookupMode)> {
            self.calls.borrow().clone()
        }
    }

    impl CompoundLookup for MockLookup {
        fn lookup(&self, query: &str, mode: LookupMode) -> Result<CompoundRecord, LookupError> {
            self.calls.borrow_mut().push((query.to_string(), mode));
            self.records
                .get(&(query.to_string(), mode))
                .cloned()
                .ok_or(LookupError::NotFound)
        }
    }

    fn st(pairs: &[(&str, f64)]) -> Stoichiometry {
        pairs.iter().map(|(el, n)| (*el, *n)).collect()
    }

    #[test]
    fn test_multiplied_formula_needs_no_lookup() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let formula = resolver.resolve("2H2O").unwrap();
        assert_eq!(formula.combined(), &st(&[("H", 4.0), ("O", 2.0)]));
        assert_eq!(formula.fragments().len(), 1);
        assert_eq!(
            formula.fragments()[0].stage,
            ResolutionStage::MultiplierPrefix
        );
        assert!(formula.fragments()[0].provenance.is_none());
        assert!(lookup.calls().is_empty());
    }

    #[test]
    fn test_cocrystal_by_name() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let formula = resolver.resolve("carbamazepine; indomethacin").unwrap();
        assert_eq!(formula.combined().to_string(), "C34H28N3O5Cl1");
        assert_eq!(
            formula.user_input(),
            vec!["carbamazepine".to_string(), "indomethacin".to_string()]
        );
        let cids: Vec<u64> = formula
            .fragments()
            .iter()
            .filter_map(|f| f.provenance.as_ref().map(|p| p.cid))
            .collect();
        assert_eq!(cids, vec![2554, 3715]);
        let provenance = formula.fragments()[1].provenance.as_ref().unwrap();
        assert_eq!(
            provenance.url,
            "https://pubchem.ncbi.nlm.nih.gov/compound/3715"
        );
        assert_eq!(provenance.mode, LookupMode::Name);
    }

    #[test]
    fn test_combined_is_sum_of_fragments() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let inputs = [
            "C17H17ClN6O3; 2H2O",
            "C15H12N2O; CH3CH2COO-; Na+",
            "sodium salicylate; water",
            "codeine; phosphoric acid; 0.5H2O",
        ];
        for input in inputs {
            let formula = resolver.resolve(input).unwrap();
            let mut expected = Stoichiometry::new();
            for token in formula.user_input() {
                expected.merge(resolver.resolve(&token).unwrap().combined());
            }
            assert_eq!(formula.combined(), &expected);
        }
        let formula = resolver.resolve("C15H12N2O; CH3CH2COO-; Na+").unwrap();
        assert_eq!(
            formula.combined(),
            &st(&[("C", 18.0), ("H", 17.0), ("N", 2.0), ("O", 3.0), ("Na", 1.0)])
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let first = resolver.resolve("sodium salicylate; water").unwrap();
        let second = resolver.resolve("sodium salicylate; water").unwrap();
        assert_eq!(first.combined(), second.combined());
        assert_eq!(first, second);
    }

    #[test]
    fn test_hemihydrate_fragments() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let formula = resolver
            .resolve("codeine; phosphoric acid; 0.5H2O")
            .unwrap();
        assert_eq!(
            formula.combined().to_spaced_string(),
            "C18 H25 N1 O7.5 P1"
        );
    }

    #[test]
    fn test_repeated_tokens_are_looked_up_once() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let formula = resolver
            .resolve("codeine; codeine; phosphoric acid; phosphoric acid; water")
            .unwrap();
        assert_eq!(formula.fragments().len(), 5);
        assert_eq!(
            formula.combined(),
            &st(&[("C", 36.0), ("H", 50.0), ("N", 2.0), ("O", 15.0), ("P", 2.0)])
        );
        let codeine_calls = lookup
            .calls()
            .iter()
            .filter(|(q, _)| q == "codeine")
            .count();
        assert_eq!(codeine_calls, 1);
    }

    #[test]
    fn test_unresolvable_token_aborts_everything() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        match resolver.resolve("carbamazepine; notathing") {
            Err(HofCalcError::UnparseableToken { token, attempts }) => {
                assert_eq!(token, "notathing");
                let stages: Vec<ResolutionStage> = attempts.iter().map(|a| a.stage).collect();
                assert_eq!(
                    stages,
                    vec![
                        ResolutionStage::DirectFormula,
                        ResolutionStage::MultiplierPrefix,
                        ResolutionStage::Lookup(LookupMode::Name),
                        ResolutionStage::Lookup(LookupMode::Smiles),
                    ]
                );
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_unknown_symbol_falls_through_to_lookup_and_fails() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let err = resolver.resolve("Xx2").unwrap_err();
        assert!(matches!(err, HofCalcError::UnparseableToken { .. }));
        assert!(err.to_string().contains("Xx2"));
    }

    #[test]
    fn test_smiles_falls_back_to_name() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        let aspirin = "CC(=O)Oc1ccccc1C(=O)O";
        let formula = resolver.resolve(aspirin).unwrap();
        assert_eq!(formula.combined(), &st(&[("C", 9.0), ("H", 8.0), ("O", 4.0)]));
        let fragment = &formula.fragments()[0];
        assert_eq!(fragment.stage, ResolutionStage::Lookup(LookupMode::Name));
        assert_eq!(
            lookup.calls(),
            vec![
                (aspirin.to_string(), LookupMode::Smiles),
                (aspirin.to_string(), LookupMode::Name),
            ]
        );
    }

    #[test]
    fn test_unreadable_lookup_formula() {
        let table = HofmannTable::builtin();
        let lookup = MockLookup::new();
        let resolver = FragmentResolver::new(&table, Some(&lookup), SplitMode::Semicolon);
        match resolver.resolve("weird") {
            Err(HofCalcError::UnparseableToken { attempts, .. }) => {
                assert!(attempts[2].reason.contains("not a formula"));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_lookup_disabled() {
        let table = HofmannTable::builtin();
        let resolver = FragmentResolver::new(&table, None, SplitMode::Semicolon);
        assert!(resolver.resolve("C2H6O").is_ok());
        match resolver.resolve("ethanol") {
            Err(HofCalcError::UnparseableToken { attempts, .. }) => assert_eq!(attempts.len(), 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        let table = HofmannTable::builtin();
        let resolver = FragmentResolver::new(&table, None, SplitMode::Semicolon);
        assert!(matches!(resolver.resolve(""), Err(HofCalcError::EmptyInput)));
        assert!(matches!(resolver.resolve(" ; ;"), Err(HofCalcError::EmptyInput)));
    }

    #[test]
    fn test_markup_is_stripped() {
        let raw = r#"<html><body><font face="Arial"><b>C<sub>15</sub>H<sub>12</sub>N<sub>2</sub>O</b></font></body></html>"#;
        assert!(has_markup(raw));
        assert!(!has_markup("C15H12N2O"));
        assert_eq!(strip_markup(raw), "C15H12N2O");
        assert_eq!(strip_markup("C<sub>2</sub>H<sub>6</sub>O"), "C2H6O");

        let table = HofmannTable::builtin();
        let resolver = FragmentResolver::new(&table, None, SplitMode::Semicolon);
        let formula = resolver.resolve(raw).unwrap();
        assert_eq!(formula.interpreted_input(), Some("C15H12N2O"));
        assert_eq!(formula.user_input(), vec!["C15H12N2O".to_string()]);
        assert_eq!(resolver.resolve("H2O").unwrap().interpreted_input(), None);
    }

    #[test]
    fn test_tokenize() {
        let table = HofmannTable::builtin();
        let semicolon = FragmentResolver::new(&table, None, SplitMode::Semicolon);
        assert_eq!(
            semicolon.tokenize(" amodiaquine ; 2HCl;;2H2O "),
            vec!["amodiaquine", "2HCl", "2H2O"]
        );
        assert_eq!(semicolon.tokenize("zopiclone, 2H2O"), vec!["zopiclone, 2H2O"]);

        let auto = FragmentResolver::new(&table, None, SplitMode::Auto);
        assert_eq!(auto.tokenize("zopiclone, 2H2O"), vec!["zopiclone", "2H2O"]);
        assert_eq!(auto.tokenize("C15H12N2O 2H2O"), vec!["C15H12N2O", "2H2O"]);
        assert_eq!(auto.tokenize("sodium salicylate"), vec!["sodium salicylate"]);
        assert_eq!(auto.tokenize("a; b, c"), vec!["a", "b, c"]);
    }

    #[test]
    fn test_looks_like_smiles() {
        assert!(looks_like_smiles("CC(=O)O"));
        assert!(looks_like_smiles("c1ccccc1"));
        assert!(looks_like_smiles("[Na+]"));
        assert!(!looks_like_smiles("indomethacin"));
        assert!(!looks_like_smiles("L-glutamic acid"));
        assert!(!looks_like_smiles("phosphoric acid"));
    }
}
