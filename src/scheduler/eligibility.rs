use super::vacation::VacationIndex;
use crate::model::{Block, Provider, ProviderId, ProviderType, SiteKind};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Codes virtuels résolus vers le privilège d'un site physique.
const SITE_ALIASES: &[(&str, &str)] = &[("COO_OBL", "COO"), ("VEIN", "WT"), ("PVD", "WT")];

fn alias_of(site_code: &str) -> Option<&'static str> {
    SITE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == site_code)
        .map(|(_, target)| *target)
}

/// Exceptions par type de praticien : initiales -> sites autorisés.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleRestrictions {
    #[serde(rename = "MD")]
    pub md: BTreeMap<ProviderId, BTreeSet<String>>,
    #[serde(rename = "APN")]
    pub apn: BTreeMap<ProviderId, BTreeSet<String>>,
}

impl RoleRestrictions {
    fn for_type(&self, kind: ProviderType) -> &BTreeMap<ProviderId, BTreeSet<String>> {
        match kind {
            ProviderType::Md => &self.md,
            ProviderType::Apn => &self.apn,
        }
    }

    fn for_type_mut(&mut self, kind: ProviderType) -> &mut BTreeMap<ProviderId, BTreeSet<String>> {
        match kind {
            ProviderType::Md => &mut self.md,
            ProviderType::Apn => &mut self.apn,
        }
    }
}

/// Table des restrictions de sites, partitionnée par nature de site puis par
/// type de praticien. Une entrée à liste vide interdit tout site de cette nature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestrictionTable {
    pub hospital: RoleRestrictions,
    pub office: RoleRestrictions,
}

impl RestrictionTable {
    /// Table en vigueur dans la pratique.
    pub fn standard() -> Self {
        use ProviderType::{Apn, Md};
        use SiteKind::{Hospital, Office};

        let mut t = Self::default();
        // hôpital (gardes et blocs hospitaliers)
        t.restrict(Hospital, Md, "RAC", &[]);
        t.restrict(Hospital, Md, "HAS", &[]);
        t.restrict(Hospital, Md, "DAS", &[]);
        t.restrict(Hospital, Md, "SMC", &["RMC"]);
        t.restrict(Hospital, Md, "SHF", &["ELH"]);
        t.restrict(Hospital, Md, "MCR", &["ELH"]);
        t.restrict(Hospital, Apn, "AD", &["WTH", "CHH"]);
        t.restrict(Hospital, Apn, "VJC", &["RMC"]);
        t.restrict(Hospital, Apn, "JKT", &["RMC"]);
        t.restrict(Hospital, Apn, "KC", &["COO"]);
        t.restrict(Hospital, Apn, "ACS", &["WTH"]);
        t.restrict(Hospital, Apn, "MB", &["COO", "WTH", "CHH"]);
        t.restrict(Hospital, Apn, "AG", &["COO", "WTH"]);
        // cabinets
        t.restrict(Office, Md, "SMC", &["SVI"]);
        t.restrict(Office, Md, "RAC", &["ELM", "SVI", "WT", "HH3", "HH"]);
        t.restrict(Office, Md, "HAS", &["HH", "HH3", "SVI", "WT"]);
        t.restrict(Office, Md, "SHF", &["ELM", "WT", "SVI", "HH3"]);
        t.restrict(Office, Md, "DAS", &["WT", "MAR", "SVI", "HH"]);
        t.restrict(Office, Md, "MCR", &["SVI", "ELM", "MAR"]);
        t.restrict(Office, Apn, "VJC", &["SVI", "ELM"]);
        t.restrict(Office, Apn, "JKT", &["SVI", "ELM"]);
        t.restrict(Office, Apn, "KC", &["VEIN", "PVD"]);
        t.restrict(Office, Apn, "ACS", &["VEIN", "WT"]);
        t.restrict(Office, Apn, "AD", &["VEIN"]);
        t.restrict(Office, Apn, "MB", &[]);
        t.restrict(Office, Apn, "AG", &["VEIN"]);
        t
    }

    /// Ajoute (ou étend) l'entrée d'un praticien.
    pub fn restrict(
        &mut self,
        kind: SiteKind,
        provider_type: ProviderType,
        initials: &str,
        sites: &[&str],
    ) {
        self.by_kind_mut(kind)
            .for_type_mut(provider_type)
            .entry(ProviderId::new(initials))
            .or_default()
            .extend(sites.iter().map(|s| s.to_string()));
    }

    /// Liste des sites permis, si le praticien a une entrée pour ce contexte.
    pub fn allowed_sites(
        &self,
        kind: SiteKind,
        provider_type: ProviderType,
        id: &ProviderId,
    ) -> Option<&BTreeSet<String>> {
        self.by_kind(kind).for_type(provider_type).get(id)
    }

    fn by_kind(&self, kind: SiteKind) -> &RoleRestrictions {
        match kind {
            SiteKind::Hospital => &self.hospital,
            SiteKind::Office => &self.office,
        }
    }

    fn by_kind_mut(&mut self, kind: SiteKind) -> &mut RoleRestrictions {
        match kind {
            SiteKind::Hospital => &mut self.hospital,
            SiteKind::Office => &mut self.office,
        }
    }
}

/// Décide si un praticien peut être affecté à (site, bloc, date).
///
/// Ordre des contrôles, le premier échec court-circuite :
/// 1. exclusion globale,
/// 2. congés approuvés,
/// 3. restriction de sites par praticien,
/// 4. privilège (avec résolution d'alias).
#[derive(Debug, Clone)]
pub struct EligibilityPolicy<'a> {
    excluded: &'a BTreeSet<ProviderId>,
    restrictions: &'a RestrictionTable,
    vacations: VacationIndex,
}

impl<'a> EligibilityPolicy<'a> {
    pub fn new(
        excluded: &'a BTreeSet<ProviderId>,
        restrictions: &'a RestrictionTable,
        vacations: VacationIndex,
    ) -> Self {
        Self {
            excluded,
            restrictions,
            vacations,
        }
    }

    pub fn vacations(&self) -> &VacationIndex {
        &self.vacations
    }

    pub fn is_eligible(
        &self,
        provider: &Provider,
        site_code: &str,
        kind: SiteKind,
        block: Block,
        day: NaiveDate,
    ) -> bool {
        let id = provider.id();
        if self.excluded.contains(id) {
            tracing::trace!(provider = %id, site_code, %block, %day, "ineligible: excluded");
            return false;
        }
        if self.vacations.is_blocked(id, day) {
            tracing::trace!(provider = %id, site_code, %block, %day, "ineligible: vacation");
            return false;
        }
        if let Some(allowed) = self.restrictions.allowed_sites(kind, provider.kind, id) {
            if !allowed.contains(site_code) {
                tracing::trace!(provider = %id, site_code, %block, %day, "ineligible: site restriction");
                return false;
            }
        }
        let privileged = provider.privileges.roles(kind, site_code).is_some()
            || alias_of(site_code)
                .map(|target| provider.privileges.roles(kind, target).is_some())
                .unwrap_or(false);
        if !privileged {
            tracing::trace!(provider = %id, site_code, %block, %day, "ineligible: no privilege");
        }
        privileged
    }
}
