use crate::Formula::molmass::atomic_number;
use crate::Volumes::hofmann_table::{HofmannTable, VolumeEntry};
use crate::Volumes::volume_calc::{ALPHA, REFERENCE_TEMPERATURE, round2};
use prettytable::{Cell, Row, Table};

/// Rows of the volume table: symbol, Z, tabulated volume and the volume at
/// `temperature`, "-" for undefined entries.
pub fn volume_table_rows(table: &HofmannTable, temperature: f64) -> Vec<[String; 4]> {
    let correction = 1.0 + ALPHA * (temperature - REFERENCE_TEMPERATURE);
    table
        .iter_periodic()
        .into_iter()
        .map(|(symbol, entry)| {
            let z = atomic_number(symbol)
                .map(|z| z.to_string())
                .unwrap_or_default();
            let (v298, v_t) = match entry {
                VolumeEntry::Defined(v) => (v.to_string(), round2(v * correction).to_string()),
                VolumeEntry::Undefined => ("-".to_string(), "-".to_string()),
            };
            [symbol.to_string(), z, v298, v_t]
        })
        .collect()
}

pub fn print_volume_table(table: &HofmannTable, temperature: f64) {
    let mut pt = Table::new();
    pt.add_row(Row::new(vec![
        Cell::new("Element"),
        Cell::new("Z"),
        Cell::new("V (298 K) / Å3"),
        Cell::new(&format!("V ({} K) / Å3", temperature)),
    ]));
    for row in volume_table_rows(table, temperature) {
        pt.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
    }
    pt.printstd();
    println!("'-': no Hofmann volume, 18 Å3 per atom is used instead");
}
