#[cfg(test)]
mod tests {
    use crate::Formula::formula_parser::{
        FormulaError, FormulaParser, normalize, split_multiplier, strip_charge,
    };
    use crate::Formula::stoichiometry::Stoichiometry;
    use crate::Volumes::hofmann_table::HofmannTable;

    fn st(pairs: &[(&str, f64)]) -> Stoichiometry {
        pairs.iter().map(|(el, n)| (*el, *n)).collect()
    }

    #[test]
    fn test_parse_formula() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);

        assert_eq!(
            parser.parse("C6H8O6").unwrap(),
            st(&[("C", 6.0), ("H", 8.0), ("O", 6.0)])
        );
        assert_eq!(
            parser.parse("Na(NO3)2").unwrap(),
            st(&[("Na", 1.0), ("N", 2.0), ("O", 6.0)])
        );
        assert_eq!(parser.parse("H2O").unwrap(), st(&[("H", 2.0), ("O", 1.0)]));
        assert_eq!(
            parser.parse("CH3CH2OH").unwrap(),
            st(&[("C", 2.0), ("H", 6.0), ("O", 1.0)])
        );
    }

    #[test]
    fn test_nested_brackets() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(
            parser.parse("[Co(NH3)6]Cl3").unwrap(),
            st(&[("Co", 1.0), ("N", 6.0), ("H", 18.0), ("Cl", 3.0)])
        );
        assert_eq!(
            parser.parse("Ca(NO3").unwrap_err(),
            FormulaError::UnbalancedBracket
        );
        assert_eq!(
            parser.parse("CaNO3)2").unwrap_err(),
            FormulaError::UnbalancedBracket
        );
    }

    #[test]
    fn test_decimal_subscripts() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(
            parser.parse("C18H25.0N1O7.5P1").unwrap(),
            st(&[("C", 18.0), ("H", 25.0), ("N", 1.0), ("O", 7.5), ("P", 1.0)])
        );
    }

    #[test]
    fn test_leading_multiplier() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(parser.parse("2H2O").unwrap(), st(&[("H", 4.0), ("O", 2.0)]));
        assert_eq!(
            parser.parse("0.5CaSO4").unwrap(),
            st(&[("Ca", 0.5), ("S", 0.5), ("O", 2.0)])
        );
        assert_eq!(parser.parse("0.5H2O").unwrap(), st(&[("H", 1.0), ("O", 0.5)]));
        // direct parsing alone does not accept a multiplier
        assert!(parser.parse_direct("2H2O").is_err());
        assert_eq!(
            parser.parse_with_multiplier("H2O").unwrap_err(),
            FormulaError::NoLeadingMultiplier
        );
    }

    #[test]
    fn test_hydrate_separator() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(
            parser.parse("CuSO4·5H2O").unwrap(),
            st(&[("Cu", 1.0), ("S", 1.0), ("O", 9.0), ("H", 10.0)])
        );
        assert_eq!(
            parser.parse("CaSO4*0.5H2O").unwrap(),
            st(&[("Ca", 1.0), ("S", 1.0), ("O", 4.5), ("H", 1.0)])
        );
    }

    #[test]
    fn test_empty_adduct_segment_rejected() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(parser.parse("H2O·").unwrap_err(), FormulaError::NoElements);
        assert_eq!(parser.parse("H2O**").unwrap_err(), FormulaError::NoElements);
        assert_eq!(parser.parse("·H2O").unwrap_err(), FormulaError::NoElements);
        assert!(parser.parse("CuSO4·5").is_err());
        // two formula segments around '*' are still an adduct
        assert_eq!(parser.parse("CuSO4·5H2O").unwrap().get("H"), Some(10.0));
    }

    #[test]
    fn test_charges_are_stripped() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(parser.parse("O-2").unwrap(), st(&[("O", 1.0)]));
        assert_eq!(parser.parse("O2-").unwrap(), st(&[("O", 2.0)]));
        assert_eq!(parser.parse("Na+").unwrap(), st(&[("Na", 1.0)]));
        assert_eq!(
            parser.parse("CH3CH2COO-").unwrap(),
            st(&[("C", 3.0), ("H", 5.0), ("O", 2.0)])
        );
        assert_eq!(strip_charge("Fe+3"), "Fe");
        assert_eq!(strip_charge("SO4^2-"), "SO4^2");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" H2O(l) "), "H2O");
        assert_eq!(normalize("NaCl(aq)"), "NaCl");
        assert_eq!(normalize("C15H12N2O|"), "C15H12N2O");
    }

    #[test]
    fn test_split_multiplier() {
        assert_eq!(split_multiplier("2H2O"), Some((2.0, "H2O")));
        assert_eq!(split_multiplier("0.5CaSO4"), Some((0.5, "CaSO4")));
        assert_eq!(split_multiplier("H2O"), None);
        assert_eq!(split_multiplier("12"), None);
    }

    #[test]
    fn test_rejections() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(
            parser.parse("Xx2").unwrap_err(),
            FormulaError::UnknownSymbol("Xx".to_string())
        );
        assert!(matches!(
            parser.parse("water").unwrap_err(),
            FormulaError::UnexpectedChar { ch: 'w', pos: 0 }
        ));
        assert!(parser.parse("carbamazepine").is_err());
        assert!(parser.parse("sodium salicylate").is_err());
        assert_eq!(parser.parse("").unwrap_err(), FormulaError::Empty);
        assert_eq!(parser.parse("()").unwrap_err(), FormulaError::NoElements);
    }

    #[test]
    fn test_symbols_missing_from_volume_table() {
        // Md is a real element but Hofmann gives no volume for it
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(
            parser.parse("MdCl3").unwrap_err(),
            FormulaError::NotInVolumeTable("Md".to_string())
        );

        let small =
            HofmannTable::from_entries(vec![("H".to_string(), Some(5.08)), ("O".to_string(), Some(11.39))])
                .unwrap();
        let parser = FormulaParser::new(&small);
        assert!(parser.parse("H2O").is_ok());
        assert_eq!(
            parser.parse("NaCl").unwrap_err(),
            FormulaError::NotInVolumeTable("Na".to_string())
        );
    }

    #[test]
    fn test_undefined_elements_still_parse() {
        let table = HofmannTable::builtin();
        let parser = FormulaParser::new(&table);
        assert_eq!(parser.parse("He").unwrap(), st(&[("He", 1.0)]));
    }
}
