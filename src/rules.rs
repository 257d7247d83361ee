//! Vue typée sur la configuration des règles (valeur JSON déjà parsée).
//!
//! Lecture tolérante : une section de rotation absente ou mal formée devient
//! vide, une entrée de mauvais type est ignorée. Les sections `exclusions`,
//! `restrictions` et `call.excluded` absentes ou mal formées gardent les
//! valeurs de la pratique. Rien ici ne renvoie d'erreur.

use crate::model::{ProviderId, ProviderType, SiteKind};
use crate::scheduler::RestrictionTable;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Praticien APN dont la présence en clinique ICD dépend du jour.
pub const DEFAULT_GATED_APN: &str = "NMC";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RotationSeeds {
    pub wt_hospital_md: Vec<ProviderId>,
    pub wt_hospital_apn: Vec<ProviderId>,
    pub rmc_md: Vec<ProviderId>,
    pub rmc_apn: Vec<ProviderId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OblRules {
    pub physicians: Vec<ProviderId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IcdClinicRules {
    pub enabled: bool,
    pub ep_mds: Vec<ProviderId>,
    pub ep_apns: Vec<ProviderId>,
    /// Jours (0 = lundi) où l'APN `gated_apn` peut tenir la clinique.
    pub nmc_days: BTreeSet<u32>,
    pub gated_apn: ProviderId,
}

impl Default for IcdClinicRules {
    fn default() -> Self {
        Self {
            enabled: false,
            ep_mds: Vec::new(),
            ep_apns: Vec::new(),
            nmc_days: BTreeSet::new(),
            gated_apn: ProviderId::new(DEFAULT_GATED_APN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRules {
    /// Retirés du pool de garde non invasive.
    pub excluded: BTreeSet<ProviderId>,
}

impl Default for CallRules {
    fn default() -> Self {
        Self {
            excluded: ["HAS", "DAS"].into_iter().map(ProviderId::new).collect(),
        }
    }
}

/// Règles complètes d'une résolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rules {
    pub rotations: RotationSeeds,
    pub obl: OblRules,
    pub icd_clinic: IcdClinicRules,
    pub call: CallRules,
    pub exclusions: BTreeSet<ProviderId>,
    pub restrictions: RestrictionTable,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            rotations: RotationSeeds::default(),
            obl: OblRules::default(),
            icd_clinic: IcdClinicRules::default(),
            call: CallRules::default(),
            exclusions: default_exclusions(),
            restrictions: RestrictionTable::standard(),
        }
    }
}

fn default_exclusions() -> BTreeSet<ProviderId> {
    BTreeSet::from([ProviderId::new("MJK")])
}

impl Rules {
    /// Construit les règles depuis la valeur parsée du fichier de règles.
    pub fn from_value(value: &Value) -> Self {
        let rotations = section(value, "rotations");
        let obl = section(value, "obl");
        let icd = section(value, "icd_clinic");

        let icd_clinic = IcdClinicRules {
            enabled: icd
                .and_then(|s| s.get("enabled"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
            ep_mds: id_list(icd, "ep_mds"),
            ep_apns: id_list(icd, "ep_apns"),
            nmc_days: icd
                .and_then(|s| s.get("nmc_days"))
                .and_then(Value::as_array)
                .map(|days| {
                    days.iter()
                        .filter_map(Value::as_u64)
                        .filter(|d| *d < 7)
                        .map(|d| d as u32)
                        .collect()
                })
                .unwrap_or_default(),
            gated_apn: icd
                .and_then(|s| s.get("gated_apn"))
                .and_then(Value::as_str)
                .map(ProviderId::new)
                .unwrap_or_else(|| ProviderId::new(DEFAULT_GATED_APN)),
        };

        let call = match section(value, "call")
            .and_then(|s| s.get("excluded"))
            .filter(|v| v.is_array())
        {
            Some(list) => CallRules {
                excluded: id_set(list),
            },
            None => CallRules::default(),
        };

        let exclusions = value
            .get("exclusions")
            .filter(|v| v.is_array())
            .map(id_set)
            .unwrap_or_else(default_exclusions);

        let restrictions = match section(value, "restrictions") {
            Some(table) => restriction_table(table),
            None => RestrictionTable::standard(),
        };

        Self {
            rotations: RotationSeeds {
                wt_hospital_md: id_list(rotations, "wt_hospital_md"),
                wt_hospital_apn: id_list(rotations, "wt_hospital_apn"),
                rmc_md: id_list(rotations, "rmc_md"),
                rmc_apn: id_list(rotations, "rmc_apn"),
            },
            obl: OblRules {
                physicians: id_list(obl, "physicians"),
            },
            icd_clinic,
            call,
            exclusions,
            restrictions,
        }
    }

    /// Forme JSON relue par [`Rules::from_value`].
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn section<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    value.get(key).filter(|v| v.is_object())
}

fn id_list(section: Option<&Value>, key: &str) -> Vec<ProviderId> {
    section
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ProviderId::new)
                .collect()
        })
        .unwrap_or_default()
}

fn id_set(value: &Value) -> BTreeSet<ProviderId> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ProviderId::new)
                .collect()
        })
        .unwrap_or_default()
}

fn restriction_table(value: &Value) -> RestrictionTable {
    let mut table = RestrictionTable::default();
    for kind in [SiteKind::Hospital, SiteKind::Office] {
        let Some(by_type) = section(value, kind.as_str()) else {
            continue;
        };
        for (label, provider_type) in [("MD", ProviderType::Md), ("APN", ProviderType::Apn)] {
            let Some(entries) = by_type.get(label).and_then(Value::as_object) else {
                continue;
            };
            for (initials, sites) in entries {
                let Some(sites) = sites.as_array() else {
                    continue;
                };
                let sites: Vec<&str> = sites.iter().filter_map(Value::as_str).collect();
                table.restrict(kind, provider_type, initials, &sites);
            }
        }
    }
    table
}
