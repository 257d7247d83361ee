mod call;
mod eligibility;
mod rotation;
mod types;
mod util;
mod vacation;
mod weekday;

pub use eligibility::{EligibilityPolicy, RestrictionTable, RoleRestrictions};
pub use rotation::RotationCycle;
pub use types::{
    CallAssignment, CallType, DayAssignment, ScheduleOutput, SolveError, VacationSpan,
};
pub use vacation::VacationIndex;

use crate::model::{Holiday, Provider, ProviderId, SnapshotSource};
use crate::rules::Rules;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Hôpital de Washington Township : MD du jour.
pub const WT_HOSPITAL: &str = "WTH";
/// Hôpital de Washington Township : binôme d'APN.
pub const WT_HOSPITAL_APN: &str = "WTH_APN";
pub const RMC_HOSPITAL: &str = "RMC";
/// Vacation OBL du mercredi, contrôlée sur les privilèges de `COO`.
pub const OBL_SITE: &str = "COO_OBL";
pub const OBL_HOSPITAL: &str = "COO";
pub const OFFICE_CODES: [&str; 4] = ["HH", "HH3", "SVI", "WT"];
/// Sites de la clinique ICD : jour pair (lundi = 0) puis impair.
pub const ICD_SITES: [&str; 2] = ["WT", "SVI"];

/// Moteur de rotation : lit une photographie et des règles, produit un planning.
///
/// Aucun état n'est partagé entre deux appels à [`Solver::solve`] : chaque
/// résolution construit ses propres rotations.
#[derive(Debug)]
pub struct Solver<'a> {
    providers: Vec<&'a Provider>,
    by_initials: HashMap<&'a str, &'a Provider>,
    holidays: HashMap<NaiveDate, &'a Holiday>,
    rules: &'a Rules,
    policy: EligibilityPolicy<'a>,
}

impl<'a> Solver<'a> {
    pub fn new<S: SnapshotSource + ?Sized>(snapshot: &'a S, rules: &'a Rules) -> Self {
        let providers: Vec<&Provider> = snapshot.providers().iter().collect();
        let by_initials = providers
            .iter()
            .map(|&p| (p.initials.as_str(), p))
            .collect();
        let holidays = snapshot.holidays().iter().map(|h| (h.date, h)).collect();

        for code in OFFICE_CODES {
            if !snapshot.offices().iter().any(|o| o.code == code) {
                tracing::warn!(site_code = code, "office missing from snapshot");
            }
        }
        for code in [WT_HOSPITAL, RMC_HOSPITAL, OBL_HOSPITAL] {
            if !snapshot.hospitals().iter().any(|h| h.code == code) {
                tracing::warn!(site_code = code, "hospital missing from snapshot");
            }
        }

        let vacations = VacationIndex::build(snapshot.vacation_requests());
        let policy = EligibilityPolicy::new(&rules.exclusions, &rules.restrictions, vacations);

        Self {
            providers,
            by_initials,
            holidays,
            rules,
            policy,
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy<'a> {
        &self.policy
    }

    pub fn rules(&self) -> &'a Rules {
        self.rules
    }

    /// Construit le planning complet de `[start, end]`.
    pub fn solve(&self, start: NaiveDate, end: NaiveDate) -> Result<ScheduleOutput, SolveError> {
        if end < start {
            return Err(SolveError::InvalidWindow { start, end });
        }

        let mut output = ScheduleOutput::default();
        self.record_vacations(&mut output);
        weekday::WeekdayPlanner::new(self).plan(start, end, &mut output);
        call::CallScheduler::new(self).plan(start, end, &mut output);

        tracing::info!(
            %start,
            %end,
            assignments = output.assignments.len(),
            calls = output.call_assignments.len(),
            gaps = output.assignments.iter().filter(|a| a.is_gap()).count(),
            "schedule solved"
        );
        Ok(output)
    }

    fn record_vacations(&self, output: &mut ScheduleOutput) {
        for provider in &self.providers {
            let spans = self.policy.vacations().spans(provider.id());
            if !spans.is_empty() {
                output.vacations.insert(provider.id().clone(), spans);
            }
        }
    }

    fn providers(&self) -> &[&'a Provider] {
        &self.providers
    }

    /// Fermé et rattaché au week-end : aucune affectation de semaine.
    fn is_closed_holiday(&self, day: NaiveDate) -> bool {
        self.holidays.get(&day).is_some_and(|h| h.closes_weekday())
    }

    /// Résout une liste d'initiales ; les inconnues sont ignorées.
    fn resolve(&self, ids: &[ProviderId], duty: &str) -> Vec<&'a Provider> {
        ids.iter()
            .filter_map(|id| {
                let found = self.by_initials.get(id.as_str()).copied();
                if found.is_none() {
                    tracing::warn!(provider = %id, duty, "unknown provider in rules, dropped");
                }
                found
            })
            .collect()
    }
}

/// Raccourci : construit un [`Solver`] et résout la fenêtre.
pub fn solve_schedule<S: SnapshotSource + ?Sized>(
    snapshot: &S,
    rules: &Rules,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ScheduleOutput, SolveError> {
    Solver::new(snapshot, rules).solve(start, end)
}
