use crate::model::{Block, ProviderId, SiteKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Affectation d'une demi-journée sur un site. L'ordre des praticiens compte :
/// le premier est le titulaire (MD avant APN).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub date: NaiveDate,
    pub block: Block,
    pub site_code: String,
    pub site_type: SiteKind,
    pub providers: Vec<ProviderId>,
}

impl DayAssignment {
    pub fn new<C: Into<String>>(
        date: NaiveDate,
        block: Block,
        site_code: C,
        site_type: SiteKind,
        providers: Vec<ProviderId>,
    ) -> Self {
        Self {
            date,
            block,
            site_code: site_code.into(),
            site_type,
            providers,
        }
    }

    /// Aucun praticien trouvé : trou de couverture.
    pub fn is_gap(&self) -> bool {
        self.providers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallType {
    NoninvasiveWeekday,
    InterventionalWeekday,
    WeekendNoninv,
    InterventionalWeekend,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::NoninvasiveWeekday => "noninvasive_weekday",
            CallType::InterventionalWeekday => "interventional_weekday",
            CallType::WeekendNoninv => "weekend_noninv",
            CallType::InterventionalWeekend => "interventional_weekend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallAssignment {
    pub date: NaiveDate,
    pub call_type: CallType,
    pub label: String,
    pub providers: Vec<ProviderId>,
}

impl CallAssignment {
    pub fn new<L: Into<String>>(
        date: NaiveDate,
        call_type: CallType,
        label: L,
        providers: Vec<ProviderId>,
    ) -> Self {
        Self {
            date,
            call_type,
            label: label.into(),
            providers,
        }
    }
}

/// Séquence de jours de congés contigus, bornes incluses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Résultat d'une résolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutput {
    pub assignments: Vec<DayAssignment>,
    pub call_assignments: Vec<CallAssignment>,
    pub vacations: BTreeMap<ProviderId, Vec<VacationSpan>>,
    /// Site retenu pour la clinique ICD tournante, par date.
    pub icd_sites: BTreeMap<NaiveDate, String>,
}

impl ScheduleOutput {
    pub fn add_assignment(&mut self, assignment: DayAssignment) {
        if assignment.is_gap() {
            tracing::debug!(
                date = %assignment.date,
                block = %assignment.block,
                site_code = %assignment.site_code,
                "coverage gap"
            );
        }
        self.assignments.push(assignment);
    }

    pub fn add_call(&mut self, call: CallAssignment) {
        self.call_assignments.push(call);
    }

    pub fn assignments_on(&self, date: NaiveDate) -> impl Iterator<Item = &DayAssignment> + '_ {
        self.assignments.iter().filter(move |a| a.date == date)
    }

    pub fn calls_of(&self, call_type: CallType) -> impl Iterator<Item = &CallAssignment> + '_ {
        self.call_assignments
            .iter()
            .filter(move |c| c.call_type == call_type)
    }
}

#[derive(Error, Debug)]
pub enum SolveError {
    #[error("invalid window: end {end} is before start {start}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
