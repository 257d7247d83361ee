#![forbid(unsafe_code)]
use cardio_roster::scheduler::RestrictionTable;
use cardio_roster::{seed, ProviderId, ProviderType, Rules, SiteKind};
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn ids(list: &[&str]) -> Vec<ProviderId> {
    list.iter().map(ProviderId::new).collect()
}

#[test]
fn missing_rules_fall_back_to_defaults() {
    let rules = Rules::from_value(&Value::Null);
    assert!(rules.rotations.wt_hospital_md.is_empty());
    assert!(rules.obl.physicians.is_empty());
    assert!(!rules.icd_clinic.enabled);
    assert_eq!(rules.icd_clinic.gated_apn, ProviderId::new("NMC"));
    assert_eq!(rules.exclusions, BTreeSet::from([ProviderId::new("MJK")]));
    assert!(rules.call.excluded.contains(&ProviderId::new("HAS")));
    assert!(rules.call.excluded.contains(&ProviderId::new("DAS")));
    assert_eq!(rules.restrictions, RestrictionTable::standard());
    assert_eq!(rules, Rules::default());
}

#[test]
fn malformed_entries_are_ignored() {
    let value = json!({
        "rotations": "oops",
        "obl": { "physicians": [1, "DPR", null, "APZ"] },
        "icd_clinic": {
            "enabled": "yes",
            "ep_mds": ["EKT"],
            "nmc_days": [0, 9, "x", 1]
        }
    });
    let rules = Rules::from_value(&value);
    assert!(rules.rotations.rmc_md.is_empty());
    assert_eq!(rules.obl.physicians, ids(&["DPR", "APZ"]));
    assert!(!rules.icd_clinic.enabled);
    assert_eq!(rules.icd_clinic.ep_mds, ids(&["EKT"]));
    assert_eq!(rules.icd_clinic.nmc_days, BTreeSet::from([0, 1]));
}

#[test]
fn explicit_sections_replace_defaults() {
    let value = json!({
        "exclusions": [],
        "call": { "excluded": ["RAC"] },
        "restrictions": {
            "hospital": { "MD": { "ABC": ["RMC"] } },
            "office": { "APN": { "XY": [] } }
        }
    });
    let rules = Rules::from_value(&value);
    assert!(rules.exclusions.is_empty());
    assert_eq!(rules.call.excluded, BTreeSet::from([ProviderId::new("RAC")]));

    let table = &rules.restrictions;
    let abc = table
        .allowed_sites(SiteKind::Hospital, ProviderType::Md, &ProviderId::new("ABC"))
        .unwrap();
    assert!(abc.contains("RMC"));
    assert_eq!(abc.len(), 1);
    let xy = table
        .allowed_sites(SiteKind::Office, ProviderType::Apn, &ProviderId::new("XY"))
        .unwrap();
    assert!(xy.is_empty());
    assert!(table
        .allowed_sites(SiteKind::Hospital, ProviderType::Md, &ProviderId::new("RAC"))
        .is_none());
}

#[test]
fn rules_survive_a_json_round_trip() {
    let rules = seed::demo_rules();
    let value = rules.to_value();
    assert_eq!(value["icd_clinic"]["nmc_days"], json!([0, 1]));
    assert_eq!(Rules::from_value(&value), rules);
}

#[test]
fn malformed_lists_keep_practice_defaults() {
    let value = json!({
        "exclusions": "MJK",
        "call": { "excluded": { "HAS": true } },
        "restrictions": 42
    });
    let rules = Rules::from_value(&value);
    assert_eq!(rules.exclusions, BTreeSet::from([ProviderId::new("MJK")]));
    assert_eq!(rules.call, Rules::default().call);
    assert_eq!(rules.restrictions, RestrictionTable::standard());
}
