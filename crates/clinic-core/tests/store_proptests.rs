//! Property tests: store invariants over arbitrary add sequences.

use clinic_core::{Gender, PatientFields, PatientStore};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct AddCase {
    name: String,
    age: u32,
    gender: Gender,
    link_to_first: bool,
}

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
    ]
}

fn add_case() -> impl Strategy<Value = AddCase> {
    ("[A-Za-z]{1,16}", 0u32..=120, gender_strategy(), any::<bool>()).prop_map(
        |(name, age, gender, link_to_first)| AddCase {
            name,
            age,
            gender,
            link_to_first,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// After any sequence of valid adds, the stats totals match the
    /// collection, ids are unique, and the dependent relation is
    /// consistent from both sides.
    #[test]
    fn totals_ids_and_links_stay_consistent(cases in proptest::collection::vec(add_case(), 1..12)) {
        let store = PatientStore::new().unwrap();
        let mut first_id: Option<String> = None;
        let mut expected_dependents = Vec::new();

        for case in &cases {
            let primary = if case.link_to_first { first_id.as_deref() } else { None };
            let patient = store
                .add_patient(PatientFields::new(case.name.as_str(), case.age, case.gender), primary)
                .unwrap();

            if primary.is_some() {
                expected_dependents.push(patient.id.clone());
            }
            if first_id.is_none() {
                first_id = Some(patient.id.clone());
            }
        }

        let patients = store.list_patients().unwrap();
        prop_assert_eq!(patients.len(), cases.len());

        let stats = store.patient_stats().unwrap();
        prop_assert_eq!(stats.total_patients, cases.len());
        // Everything was just created, so everything is "new"
        prop_assert_eq!(stats.new_patients, cases.len());

        // Ids are unique
        let mut ids: Vec<_> = patients.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), cases.len());

        // The first patient's dependents list mirrors the linked adds, in order
        let first = store.get_patient(first_id.as_deref().unwrap()).unwrap();
        prop_assert_eq!(first.dependents, expected_dependents);

        // Primary listing excludes exactly the dependents
        let primaries = store.list_primary_patients().unwrap();
        prop_assert!(primaries.iter().all(|p| !p.is_dependent()));
        prop_assert_eq!(
            primaries.len() + patients.iter().filter(|p| p.is_dependent()).count(),
            cases.len()
        );
    }

    /// Minted ids follow the zero-padded sequential format.
    #[test]
    fn ids_are_sequential(count in 1usize..8) {
        let store = PatientStore::new().unwrap();
        for i in 0..count {
            let patient = store
                .add_patient(PatientFields::new("Patient", 30, Gender::Other), None)
                .unwrap();
            prop_assert_eq!(patient.id, format!("P{:03}", i + 1));
        }
    }
}
