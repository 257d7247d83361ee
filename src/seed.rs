//! Jeu de données de démonstration : sites, praticiens, fériés 2026, congés
//! et règles d'un cabinet de cardiologie.

use crate::model::{
    Holiday, Privileges, Provider, ProviderId, ProviderType, SiteHospital, SiteKind, SiteOffice,
    Snapshot, VacationRequest, VacationStatus,
};
use crate::rules::{IcdClinicRules, OblRules, RotationSeeds, Rules};
use chrono::NaiveDate;

pub const OFFICES: &[(&str, &str)] = &[
    ("HH", "Haddon Heights Office"),
    ("HH3", "Haddon Heights 3"),
    ("SVI", "South Jersey Vein Institute"),
    ("WT", "Washington Township Office"),
    ("ELM", "Elmer Office"),
    ("MAR", "Marlton Office"),
    ("VOR", "Voorhees Office"),
];

pub const HOSPITALS: &[(&str, &str)] = &[
    ("COO", "Cooper Clinical"),
    ("VMA", "Virtua Marlton"),
    ("VVO", "Virtua Voorhees"),
    ("STR", "Jeff Stratford Hospital"),
    ("CHH", "Jeff Cherry Hill Hospital"),
    ("RMC", "Regional Medical Center"),
    ("ELH", "Elmer Hospital"),
    ("WTH", "Washington Township Hospital"),
];

const FEDERAL_HOLIDAYS_2026: &[((i32, u32, u32), &str)] = &[
    ((2026, 1, 1), "New Year's Day"),
    ((2026, 1, 19), "MLK Day"),
    ((2026, 2, 16), "Presidents Day"),
    ((2026, 5, 25), "Memorial Day"),
    ((2026, 7, 3), "Independence Day Observed"),
    ((2026, 9, 7), "Labor Day"),
    ((2026, 11, 26), "Thanksgiving"),
    ((2026, 12, 25), "Christmas"),
];

const INVASIVE_MDS: &[(&str, &str)] = &[
    ("DPR", "Derek Porter"),
    ("APZ", "Alex Perez"),
    ("AML", "Amelia Lang"),
    ("VKV", "Vikram Verma"),
    ("ZZR", "Zara Ruiz"),
];

const EP_MDS: &[(&str, &str)] = &[
    ("EKT", "Elliot Trent"),
    ("JWW", "Jordan Wells"),
    ("NOM", "Nora O'Malley"),
    ("JKA", "Jamie Kato"),
];

const NONINVASIVE_MDS: &[(&str, &str)] = &[
    ("JOO", "Joon Oh"),
    ("RAM", "Ramon Ahn"),
    ("LMS", "Liam Singh"),
    ("KSG", "Katie Sung"),
    ("DJT", "Danielle Truitt"),
    ("RAC", "Rae Chen"),
    ("HAS", "Hannah Shah"),
    ("SHF", "Sharon Fields"),
    ("SMC", "Samir Chawla"),
    ("MCR", "Miles Carr"),
    ("DAS", "Deepa Singh"),
    ("BWL", "Brian Lee"),
    ("CLN", "Carla Nunez"),
    ("FRG", "Frances Grant"),
    ("GHM", "Graham Hill"),
    ("HLN", "Helen Lin"),
    ("IVY", "Ivy Young"),
    ("JLC", "Julia Cho"),
    ("KRN", "Karen Novak"),
    ("LHN", "Lena Han"),
    ("MTN", "Martin Noon"),
    ("NLS", "Niels Sato"),
    ("OPR", "Olivia Park"),
    ("PRS", "Priya Shah"),
    ("QLM", "Quinn Lam"),
    ("RHD", "Richard Doe"),
    ("SAL", "Sasha Lee"),
    ("TOM", "Tomas Ortega"),
    ("UGO", "Uma Gomez"),
    ("VIN", "Vince Nolan"),
    ("WES", "Wes Stone"),
    ("XAV", "Xavier Pace"),
    ("YUK", "Yuki Chan"),
    ("ZED", "Zed Duran"),
];

/// (initiales, nom, EP)
const APNS: &[(&str, &str, bool)] = &[
    ("VJC", "Valerie Cruz", false),
    ("JKT", "Jenna Kurt", true),
    ("NMC", "Nora McCarthy", true),
    ("MB", "Mara Blake", false),
    ("AG", "Ariel Grant", false),
    ("KC", "Kayla Choi", false),
    ("ACS", "Alan Chen", false),
    ("AD", "Alice Dwyer", false),
    ("MJK", "Mia Keller", false),
    ("RMO", "Rita Monroe", false),
];

/// Date évaluée à la compilation : une date invalide ne compile pas.
const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid calendar date"),
    }
}

/// Lundi 5 janvier 2026.
pub const DEMO_WINDOW_START: NaiveDate = ymd(2026, 1, 5);
/// Vendredi 27 mars 2026.
pub const DEMO_WINDOW_END: NaiveDate = ymd(2026, 3, 27);

/// Fenêtre de démonstration, bornes incluses.
pub fn demo_window() -> (NaiveDate, NaiveDate) {
    (DEMO_WINDOW_START, DEMO_WINDOW_END)
}

/// Privilèges MD ; `role` remplace les rôles hospitaliers de `sites`.
fn md_privileges(role: &str, sites: &[&str]) -> Privileges {
    let mut privileges = Privileges::new().grant(SiteKind::Hospital, "COO", ["INT", "EP"]);
    for code in ["VMA", "VVO", "STR", "CHH", "RMC", "ELH", "WTH"] {
        privileges = privileges.grant(SiteKind::Hospital, code, ["NONINV"]);
    }
    for code in sites {
        privileges = privileges.replace(SiteKind::Hospital, *code, [role]);
    }
    for (code, _) in OFFICES {
        privileges = privileges.grant(SiteKind::Office, *code, ["GENERAL"]);
    }
    privileges
}

fn apn_privileges() -> Privileges {
    let mut privileges = Privileges::new();
    for code in ["RMC", "WTH", "COO", "CHH"] {
        privileges = privileges.grant(SiteKind::Hospital, code, ["APN"]);
    }
    for (code, _) in OFFICES {
        privileges = privileges.grant(SiteKind::Office, *code, ["APN"]);
    }
    privileges
}

pub fn demo_providers() -> Vec<Provider> {
    let mut out = Vec::new();
    for (initials, name) in INVASIVE_MDS {
        let mut p = Provider::new(initials, *name, ProviderType::Md);
        p.is_invasive = true;
        p.privileges = md_privileges("INT", &["COO", "RMC", "WTH"]);
        out.push(p);
    }
    for (initials, name) in EP_MDS {
        let mut p = Provider::new(initials, *name, ProviderType::Md);
        p.is_ep = true;
        p.privileges = md_privileges("EP", &["COO", "RMC"]);
        out.push(p);
    }
    for (initials, name) in NONINVASIVE_MDS {
        let mut p = Provider::new(initials, *name, ProviderType::Md);
        p.privileges = md_privileges("NONINV", &[]);
        out.push(p);
    }
    for (initials, name, ep) in APNS {
        let mut p = Provider::new(initials, *name, ProviderType::Apn);
        p.is_ep = *ep;
        p.weekend_team_eligible = *initials != "MJK";
        p.privileges = apn_privileges();
        out.push(p);
    }
    out
}

pub fn demo_holidays() -> Vec<Holiday> {
    FEDERAL_HOLIDAYS_2026
        .iter()
        .filter_map(|((y, m, d), name)| {
            NaiveDate::from_ymd_opt(*y, *m, *d).map(|date| Holiday {
                date,
                name: name.to_string(),
                is_office_closed: true,
                extend_weekend: true,
            })
        })
        .collect()
}

/// JOO et APZ en congés approuvés la semaine du 2 février ; une demande de
/// KSG reste en brouillon.
pub fn demo_vacations() -> Vec<VacationRequest> {
    let mut out = Vec::new();
    let (Some(feb2), Some(feb6)) = (
        NaiveDate::from_ymd_opt(2026, 2, 2),
        NaiveDate::from_ymd_opt(2026, 2, 6),
    ) else {
        return out;
    };
    for initials in ["JOO", "APZ"] {
        out.push(VacationRequest {
            provider_id: ProviderId::new(initials),
            start_date: feb2,
            end_date: feb6,
            status: VacationStatus::Approved,
        });
    }
    if let (Some(mar2), Some(mar6)) = (
        NaiveDate::from_ymd_opt(2026, 3, 2),
        NaiveDate::from_ymd_opt(2026, 3, 6),
    ) {
        out.push(VacationRequest {
            provider_id: ProviderId::new("KSG"),
            start_date: mar2,
            end_date: mar6,
            status: VacationStatus::Draft,
        });
    }
    out
}

pub fn demo_snapshot() -> Snapshot {
    Snapshot {
        providers: demo_providers(),
        offices: OFFICES
            .iter()
            .map(|(code, name)| SiteOffice {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect(),
        hospitals: HOSPITALS
            .iter()
            .map(|(code, name)| SiteHospital {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect(),
        holidays: demo_holidays(),
        vacation_requests: demo_vacations(),
    }
}

fn ids(initials: &[&str]) -> Vec<ProviderId> {
    initials.iter().map(ProviderId::new).collect()
}

pub fn demo_rules() -> Rules {
    Rules {
        rotations: RotationSeeds {
            wt_hospital_md: ids(&["JOO", "RAM", "LMS", "KSG", "DJT", "BWL", "CLN", "FRG"]),
            wt_hospital_apn: ids(&["AD", "ACS", "MB", "AG"]),
            rmc_md: ids(&["GHM", "HLN", "IVY", "JLC", "SMC"]),
            rmc_apn: ids(&["VJC", "JKT"]),
        },
        obl: OblRules {
            physicians: ids(&["DPR", "APZ", "AML", "VKV", "ZZR"]),
        },
        icd_clinic: IcdClinicRules {
            enabled: true,
            ep_mds: ids(&["EKT", "JWW", "JKA"]),
            ep_apns: ids(&["NMC", "JKT"]),
            nmc_days: [0, 1].into_iter().collect(),
            ..IcdClinicRules::default()
        },
        ..Rules::default()
    }
}
