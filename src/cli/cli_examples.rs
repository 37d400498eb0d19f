use prettytable::{Cell, Row, Table};

fn print_table(header: &[&str], rows: &[&[&str]]) {
    let mut table = Table::new();
    table.add_row(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
    for row in rows {
        table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    table.printstd();
}

pub fn basic_examples() {
    println!("\n\x1b[33mBasic\x1b[0m");
    println!(
        "Enter the chemical formula or the name of the material. Names are resolved
by querying PubChem. Formulas can be prefixed with a multiple, e.g. 2H2O."
    );
    print_table(
        &["Search term", "Type", "Volume / Å3"],
        &[
            &["ethanol", "name", "69.61"],
            &["CH3CH2OH", "formula", "69.61"],
            &["water", "name", "21.55"],
            &["2H2O", "formula", "43.10"],
        ],
    );
}

pub fn multiple_terms_examples() {
    println!("\n\x1b[33mMultiple search terms\x1b[0m");
    println!(
        "Names and formulas can be mixed by separating the components with a
semicolon, so 'amodiaquine dihydrochloride dihydrate' can also be entered as
'amodiaquine; 2HCl; 2H2O'."
    );
    print_table(
        &["Search term", "Total volume / Å3"],
        &[
            &["carbamazepine; L-glutamic acid", "497.98"],
            &["zopiclone; 2H2O", "496.02"],
            &["C15H12N2O; CH3CH2COO-; Na+", "419.79"],
            &["sodium salicylate; water", "204.21"],
            &["amodiaquine dihydrochloride dihydrate", "566.61"],
            &["amodiaquine; 2HCl; 2H2O", "566.61"],
        ],
    );
}

pub fn hemihydrate_examples() {
    println!("\n\x1b[33mFractional multiples - hemihydrates\x1b[0m");
    println!(
        "When fractional multiples are needed, check the evaluated formula against
the expected one."
    );
    print_table(
        &[
            "Search term",
            "Evaluated as",
            "Volume / Å3",
            "Divide by",
            "Expected / Å3",
        ],
        &[
            &["calcium sulfate hemihydrate", "Ca2 H2 O9 S2", "253.07", "2", "126.53"],
            &[
                "calcium; calcium; sulfate; sulfate; water",
                "Ca2 H2 O9 S2",
                "253.07",
                "2",
                "126.53",
            ],
            &["calcium; sulfate; 0.5H2O", "Ca1 H1 O4.5 S1", "126.53", "-", "126.53"],
            &["codeine phosphate hemihydrate", "C36 H50 N2 O15 P2", "1006.77", "2", "503.38"],
            &["codeine; phosphoric acid; 0.5H2O", "C18 H25 N1 O7.5 P1", "503.38", "-", "503.38"],
        ],
    );
}

pub fn charge_examples() {
    println!("\n\x1b[33mCharged species\x1b[0m");
    println!("Trailing charges are removed before counting atoms, which changes the meaning of some inputs:");
    print_table(
        &["Search term", "Evaluated as"],
        &[&["O-2", "1 x O"], &["O2-", "2 x O"], &["SO4-2", "1 x S, 4 x O"]],
    );
    println!("Omitting charges is recommended; check the atom counts in the report.");
}

pub fn temperature_help() {
    println!("\n\x1b[33mTemperature\x1b[0m");
    println!("V = sum n_i v_i (1 + alpha (T - 298))");
    println!(
        "n_i and v_i are the count and the Hofmann volume (at 298 K) of element i,
alpha = 0.95e-4 K^-1. Elements without a Hofmann volume contribute 18 Å3 per atom."
    );
}

pub fn unit_cell_examples() {
    println!("\n\x1b[33mUnit cell\x1b[0m");
    println!("With a unit cell volume the ratio V_Cell / V_Hofmann is reported as well.");
    print_table(
        &["Search term", "Unit cell / Å3", "Hofmann volume / Å3", "V_Cell / V_Hofmann"],
        &[
            &["zopiclone; 2H2O", "1874.61", "496.02", "3.78"],
            &["verapamil; HCl", "1382.06", "667.57", "2.07"],
        ],
    );
}

pub fn summary_help() {
    println!("\n\x1b[33mSummary files\x1b[0m");
    println!(
        "Every estimate can be saved as <search terms>_<T>K_HofCalc.json, e.g.
carbamazepine_indomethacin_293K_HofCalc.json. It holds the combined and
per-fragment formulas, the PubChem CIDs and links of looked-up names, the
temperature, the Hofmann volume and density and, if a unit cell volume was
given, V_Cell / V_Hofmann."
    );
}

pub fn references() {
    println!("\n\x1b[33mReferences\x1b[0m");
    println!("D. W. M. Hofmann, Acta Cryst. (2002), B58, 489-493, doi:10.1107/S0108768101021814");
    println!("PubChem PUG REST: https://pubchem.ncbi.nlm.nih.gov/docs/pug-rest");
}

pub fn print_all_examples() {
    basic_examples();
    multiple_terms_examples();
    hemihydrate_examples();
    charge_examples();
    temperature_help();
    unit_cell_examples();
    summary_help();
    references();
}
