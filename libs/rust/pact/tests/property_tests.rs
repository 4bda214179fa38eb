//! Property-based tests for the pact library.

use pact_contract::{Contract, PactBuilder};
use proptest::prelude::*;

fn participant_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{2,15}"
}

fn query_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("lolz".to_string()),
        "[0-9]{2}/[0-9]{2}/[0-9]{4}",
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Repeated query keys keep every value, in insertion order.
    #[test]
    fn prop_query_values_accumulate(values in prop::collection::vec(query_value_strategy(), 1..5)) {
        let mut builder = PactBuilder::upon_receiving("repeated query")
            .with_request("GET", "/api/provider");
        for value in &values {
            builder = builder.with_query("validDateTime", value.clone());
        }
        let interaction = builder.will_respond_with(200).build();

        let pairs: Vec<String> = interaction
            .request
            .query_pairs()
            .into_iter()
            .map(|(_, v)| v.to_string())
            .collect();
        prop_assert_eq!(pairs, values);
    }

    /// The pact file name always follows `<consumer>-<provider>.json`.
    #[test]
    fn prop_file_name_convention(
        consumer in participant_strategy(),
        provider in participant_strategy(),
    ) {
        let contract = Contract::new(&consumer, &provider);
        prop_assert_eq!(contract.file_name(), format!("{consumer}-{provider}.json"));
    }

    /// A written pact loads back to the same contract.
    #[test]
    fn prop_written_pact_loads_back(
        state in "There is (no )?data",
        status in prop_oneof![Just(200u16), Just(400u16), Just(404u16)],
    ) {
        let mut pact = PactBuilder::new("Consumer", "Provider");
        pact.add(
            PactBuilder::upon_receiving("generated")
                .given(state)
                .with_request("GET", "/api/provider")
                .with_query("validDateTime", "04/04/2018")
                .will_respond_with(status)
                .build(),
        );
        let expected = pact.clone().build();

        let dir = tempfile::tempdir().unwrap();
        let path = pact.write(dir.path()).unwrap();
        prop_assert_eq!(Contract::load(path).unwrap(), expected);
    }
}
