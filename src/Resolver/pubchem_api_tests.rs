#[cfg(test)]
mod tests {
    use crate::Resolver::pubchem_api::{
        CompoundLookup, CompoundRecord, HttpClient, LookupError, LookupMode,
        PUBCHEM_REST_URL, PubChemClient,
    };
    use std::cell::RefCell;
    use std::collections::HashMap;

    // canned responses keyed by URL; unknown URLs answer with a PUG REST fault
    #[derive(Default)]
    struct MockHttpClient {
        responses: HashMap<String, String>,
        requested: RefCell<Vec<String>>,
    }

    impl MockHttpClient {
        fn mock_response(&mut self, url: &str, body: &str) {
            self.responses.insert(url.to_string(), body.to_string());
        }
    }

    impl HttpClient for MockHttpClient {
        fn get_text(&self, url: &str) -> Result<String, reqwest::Error> {
            self.requested.borrow_mut().push(url.to_string());
            Ok(self.responses.get(url).cloned().unwrap_or_else(|| {
                r#"{"Fault": {"Code": "PUGREST.NotFound", "Message": "No CID found"}}"#
                    .to_string()
            }))
        }
    }

    const CARBAMAZEPINE_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/carbamazepine/property/MolecularFormula/JSON";
    const CARBAMAZEPINE_JSON: &str = r#"{
        "PropertyTable": {
            "Properties": [
                {"CID": 2554, "MolecularFormula": "C15H12N2O"}
            ]
        }
    }"#;

    #[test]
    fn test_url_construction() {
        let client = PubChemClient::with_client(MockHttpClient::default(), PUBCHEM_REST_URL);

        let name_url = client
            .construct_url("carbamazepine", LookupMode::Name)
            .unwrap();
        assert_eq!(name_url.as_str(), CARBAMAZEPINE_URL);

        // space handling
        let space_url = client
            .construct_url("sodium salicylate", LookupMode::Name)
            .unwrap();
        assert_eq!(
            space_url.as_str(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/name/sodium%20salicylate/property/MolecularFormula/JSON"
        );

        let smiles_url = client.construct_url("CCO", LookupMode::Smiles).unwrap();
        assert_eq!(
            smiles_url.as_str(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/compound/smiles/property/MolecularFormula/JSON?smiles=CCO"
        );

        // trailing slash of the base is ignored
        let client = PubChemClient::with_client(
            MockHttpClient::default(),
            "https://pubchem.ncbi.nlm.nih.gov/rest/pug/",
        );
        let name_url = client
            .construct_url("carbamazepine", LookupMode::Name)
            .unwrap();
        assert_eq!(name_url.as_str(), CARBAMAZEPINE_URL);
    }

    #[test]
    fn test_successful_lookup() {
        let mut http = MockHttpClient::default();
        http.mock_response(CARBAMAZEPINE_URL, CARBAMAZEPINE_JSON);
        let client = PubChemClient::with_client(http, PUBCHEM_REST_URL);
        let record = client.lookup("carbamazepine", LookupMode::Name).unwrap();
        assert_eq!(
            record,
            CompoundRecord {
                cid: 2554,
                molecular_formula: "C15H12N2O".to_string(),
                url: "https://pubchem.ncbi.nlm.nih.gov/compound/2554".to_string(),
            }
        );
    }

    #[test]
    fn test_not_found() {
        let client = PubChemClient::with_client(MockHttpClient::default(), PUBCHEM_REST_URL);
        let result = client.lookup("NonexistentSubstance123", LookupMode::Name);
        assert!(matches!(result, Err(LookupError::NotFound)));
    }

    #[test]
    fn test_empty_query_is_not_sent() {
        let client = PubChemClient::with_client(MockHttpClient::default(), PUBCHEM_REST_URL);
        assert!(matches!(
            client.lookup("  ", LookupMode::Name),
            Err(LookupError::NotFound)
        ));
        assert!(client.client_requests().is_empty());
    }

    #[test]
    fn test_malformed_responses() {
        let client = PubChemClient::with_client(MockHttpClient::default(), PUBCHEM_REST_URL);
        assert!(matches!(
            client.parse_response("<html>busy</html>"),
            Err(LookupError::InvalidResponse(_))
        ));
        assert!(matches!(
            client.parse_response(r#"{"PropertyTable": {"Properties": []}}"#),
            Err(LookupError::NotFound)
        ));
        assert!(matches!(
            client.parse_response(r#"{"PropertyTable": {"Properties": [{"CID": 1}]}}"#),
            Err(LookupError::InvalidResponse(_))
        ));
        assert!(matches!(
            client.parse_response(r#"{"Fault": {"Code": "PUGREST.ServerBusy"}}"#),
            Err(LookupError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_lookup_modes() {
        assert_eq!(LookupMode::Name.alternate(), LookupMode::Smiles);
        assert_eq!(LookupMode::Smiles.alternate(), LookupMode::Name);
        assert_eq!(LookupMode::Smiles.to_string(), "smiles");
    }

    #[test]
    fn test_lookup_mode_as_map_key() {
        let mut cids: HashMap<(String, LookupMode), u64> = HashMap::new();
        cids.insert(("aspirin".to_string(), LookupMode::Name), 2244);
        cids.insert(("CC(=O)Oc1ccccc1C(=O)O".to_string(), LookupMode::Smiles), 2244);
        assert_eq!(cids.get(&("aspirin".to_string(), LookupMode::Name)), Some(&2244));
        assert_eq!(cids.get(&("aspirin".to_string(), LookupMode::Smiles)), None);
    }

    impl PubChemClient<MockHttpClient> {
        fn client_requests(&self) -> Vec<String> {
            self.http().requested.borrow().clone()
        }
    }
}
