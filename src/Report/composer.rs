use crate::Formula::stoichiometry::Stoichiometry;
use crate::Resolver::fragment_resolver::MolecularFormula;
use crate::Volumes::volume_calc::{DensityResult, FragmentVolume, VolumeResult, round2};
use prettytable::{Cell, Row, Table};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// String-keyed map that serializes in insertion order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedMap<V>(pub Vec<(String, V)>);

impl<V> OrderedMap<V> {
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert_once(&mut self, key: &str, value: V) {
        if self.get(key).is_none() {
            self.0.push((key.to_string(), value));
        }
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Everything computed for one query. Field order is the order of the summary file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub combined: Stoichiometry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<OrderedMap<Stoichiometry>>,
    pub user_input: Vec<String>,
    #[serde(rename = "PubChem CIDs")]
    pub pubchem_cids: OrderedMap<u64>,
    #[serde(rename = "PubChem URLs")]
    pub pubchem_urls: OrderedMap<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_volumes: Option<OrderedMap<f64>>,
    #[serde(rename = "V_Cell / V_Hofmann", skip_serializing_if = "Option::is_none")]
    pub cell_ratio: Option<f64>,
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Hofmann Volume")]
    pub hofmann_volume: f64,
    #[serde(rename = "Hofmann Density")]
    pub hofmann_density: f64,
    #[serde(rename = "18A Volume")]
    pub eighteen_angstrom_volume: f64,
    #[serde(rename = "Estimated Elements", skip_serializing_if = "Vec::is_empty")]
    pub fallback_elements: Vec<String>,
    #[serde(rename = "Molecular Mass")]
    pub molecular_mass: f64,
    #[serde(rename = "Interpreted Input", skip_serializing_if = "Option::is_none")]
    pub interpreted_input: Option<String>,
}

/// Merges the resolver and calculator outputs into one record. Per-fragment
/// data is only kept when the query had more than one fragment; lookup
/// provenance only for fragments that needed a lookup.
pub fn compose(
    formula: &MolecularFormula,
    volume: &VolumeResult,
    density: &DensityResult,
    temperature: f64,
    unit_cell_volume: Option<f64>,
    individual_volumes: &[FragmentVolume],
) -> Report {
    let multi = formula.is_multi_fragment();

    let mut individual = OrderedMap::default();
    let mut pubchem_cids = OrderedMap::default();
    let mut pubchem_urls = OrderedMap::default();
    for fragment in formula.fragments() {
        if multi {
            individual.insert_once(&fragment.token, fragment.stoichiometry.clone());
        }
        if let Some(provenance) = &fragment.provenance {
            pubchem_cids.insert_once(&fragment.token, provenance.cid);
            pubchem_urls.insert_once(&fragment.token, provenance.url.clone());
        }
    }

    let individual_volumes = if multi {
        let mut map = OrderedMap::default();
        for v in individual_volumes {
            map.insert_once(&v.token, v.volume);
        }
        Some(map)
    } else {
        None
    };

    let cell_ratio = match unit_cell_volume {
        Some(cell) if cell != 0.0 && volume.volume > 0.0 => Some(round2(cell / volume.volume)),
        _ => None,
    };

    Report {
        combined: formula.combined().clone(),
        individual: if multi { Some(individual) } else { None },
        user_input: formula.user_input(),
        pubchem_cids,
        pubchem_urls,
        individual_volumes,
        cell_ratio,
        temperature,
        hofmann_volume: volume.volume,
        hofmann_density: density.density,
        eighteen_angstrom_volume: volume.eighteen_angstrom_volume,
        fallback_elements: volume.fallback_elements.clone(),
        molecular_mass: density.molecular_mass,
        interpreted_input: formula.interpreted_input().map(String::from),
    }
}

impl Report {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Prints the results as tables: the per-fragment breakdown (if any) and the totals.
    pub fn print_report(&self) {
        if let Some(interpreted) = &self.interpreted_input {
            println!("Interpreting formula as {}", interpreted);
        }
        if let Some(individual) = &self.individual {
            let mut table = Table::new();
            table.add_row(Row::new(vec![
                Cell::new("Input"),
                Cell::new("Formula"),
                Cell::new("Volume / Å3"),
                Cell::new("PubChem"),
            ]));
            for (token, stoichiometry) in &individual.0 {
                let volume = self
                    .individual_volumes
                    .as_ref()
                    .and_then(|v| v.get(token))
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                let link = self.pubchem_urls.get(token).cloned().unwrap_or_default();
                table.add_row(Row::new(vec![
                    Cell::new(token),
                    Cell::new(&stoichiometry.to_spaced_string()),
                    Cell::new(&volume),
                    Cell::new(&link),
                ]));
            }
            table.printstd();
        } else if let Some((token, url)) = self.pubchem_urls.0.first() {
            println!("{}: {}", token, url);
        }

        let mut table = Table::new();
        let mut header = vec![
            Cell::new("Total atoms"),
            Cell::new("Hofmann Volume / Å3"),
            Cell::new("Hofmann Density / g cm-3"),
            Cell::new("18 Å rule / Å3"),
        ];
        let mut row = vec![
            Cell::new(&self.combined.to_spaced_string()),
            Cell::new(&self.hofmann_volume.to_string()),
            Cell::new(&self.hofmann_density.to_string()),
            Cell::new(&self.eighteen_angstrom_volume.to_string()),
        ];
        if let Some(ratio) = self.cell_ratio {
            header.push(Cell::new("V_Cell / V_Hofmann"));
            row.push(Cell::new(&ratio.to_string()));
        }
        table.add_row(Row::new(header));
        table.add_row(Row::new(row));
        table.printstd();
        println!("Temperature: {} K", self.temperature);
        if !self.fallback_elements.is_empty() {
            println!(
                "No Hofmann volume for {}, estimated with the 18 Å rule",
                self.fallback_elements.join(", ")
            );
        }
    }
}
