use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Identifiant fort d'un praticien : ses initiales (clé d'identité partout).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ProviderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProviderType {
    #[serde(rename = "MD")]
    Md,
    #[serde(rename = "APN")]
    Apn,
}

/// Nature d'un site : hôpital ou cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    Hospital,
    Office,
}

impl SiteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Hospital => "hospital",
            SiteKind::Office => "office",
        }
    }
}

/// Demi-journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Block {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Block {
    pub const ALL: [Block; 2] = [Block::Am, Block::Pm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Block::Am => "AM",
            Block::Pm => "PM",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Privilèges : nature de site -> code de site -> rôles autorisés.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Privileges(BTreeMap<SiteKind, BTreeMap<String, BTreeSet<String>>>);

impl Privileges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant<C, R, I>(mut self, kind: SiteKind, site_code: C, roles: I) -> Self
    where
        C: Into<String>,
        R: Into<String>,
        I: IntoIterator<Item = R>,
    {
        self.0
            .entry(kind)
            .or_default()
            .entry(site_code.into())
            .or_default()
            .extend(roles.into_iter().map(Into::into));
        self
    }

    /// Remplace les rôles d'un site.
    pub fn replace<C, R, I>(mut self, kind: SiteKind, site_code: C, roles: I) -> Self
    where
        C: Into<String>,
        R: Into<String>,
        I: IntoIterator<Item = R>,
    {
        self.0
            .entry(kind)
            .or_default()
            .insert(site_code.into(), roles.into_iter().map(Into::into).collect());
        self
    }

    /// Rôles autorisés pour un code de site exact (sans résolution d'alias).
    pub fn roles(&self, kind: SiteKind, site_code: &str) -> Option<&BTreeSet<String>> {
        self.0.get(&kind).and_then(|sites| sites.get(site_code))
    }
}

/// Praticien (médecin ou APN). Immuable pendant une résolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub initials: ProviderId,
    #[serde(default)]
    pub full_name: String,
    #[serde(rename = "type")]
    pub kind: ProviderType,
    #[serde(default)]
    pub is_invasive: bool,
    #[serde(default)]
    pub is_ep: bool,
    #[serde(default = "default_true")]
    pub weekend_team_eligible: bool,
    #[serde(default)]
    pub seniority: Option<u32>,
    #[serde(default)]
    pub privileges: Privileges,
}

fn default_true() -> bool {
    true
}

impl Provider {
    pub fn new<I: AsRef<str>, N: Into<String>>(initials: I, full_name: N, kind: ProviderType) -> Self {
        Self {
            initials: ProviderId::new(initials),
            full_name: full_name.into(),
            kind,
            is_invasive: false,
            is_ep: false,
            weekend_team_eligible: true,
            seniority: None,
            privileges: Privileges::default(),
        }
    }

    pub fn id(&self) -> &ProviderId {
        &self.initials
    }

    pub fn is_md(&self) -> bool {
        self.kind == ProviderType::Md
    }

    pub fn is_apn(&self) -> bool {
        self.kind == ProviderType::Apn
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteOffice {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteHospital {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub is_office_closed: bool,
    #[serde(default = "default_true")]
    pub extend_weekend: bool,
}

impl Holiday {
    /// Jour férié fermé et rattaché au week-end : aucune affectation de semaine.
    pub fn closes_weekday(&self) -> bool {
        self.is_office_closed && self.extend_weekend
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

/// Demande de congés, bornes incluses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    pub provider_id: ProviderId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: VacationStatus,
}

impl VacationRequest {
    pub fn new(
        provider_id: ProviderId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: VacationStatus,
    ) -> Result<Self, String> {
        if end_date < start_date {
            return Err("vacation end must not be before start".to_string());
        }
        Ok(Self {
            provider_id,
            start_date,
            end_date,
            status,
        })
    }

    pub fn is_approved(&self) -> bool {
        self.status == VacationStatus::Approved
    }
}

/// Accès en lecture seule aux entités consommées par le moteur.
pub trait SnapshotSource {
    fn providers(&self) -> &[Provider];
    fn holidays(&self) -> &[Holiday];
    fn offices(&self) -> &[SiteOffice];
    fn hospitals(&self) -> &[SiteHospital];
    fn vacation_requests(&self) -> &[VacationRequest];
}

/// Photographie complète des données d'entrée d'une résolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub providers: Vec<Provider>,
    #[serde(default)]
    pub offices: Vec<SiteOffice>,
    #[serde(default)]
    pub hospitals: Vec<SiteHospital>,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub vacation_requests: Vec<VacationRequest>,
}

impl Snapshot {
    pub fn find_provider<'a>(&'a self, initials: &str) -> Option<&'a Provider> {
        self.providers.iter().find(|p| p.initials.as_str() == initials)
    }
}

impl SnapshotSource for Snapshot {
    fn providers(&self) -> &[Provider] {
        &self.providers
    }
    fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }
    fn offices(&self) -> &[SiteOffice] {
        &self.offices
    }
    fn hospitals(&self) -> &[SiteHospital] {
        &self.hospitals
    }
    fn vacation_requests(&self) -> &[VacationRequest] {
        &self.vacation_requests
    }
}
