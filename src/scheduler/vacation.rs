use super::types::VacationSpan;
use crate::model::{ProviderId, VacationRequest};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Jours bloqués par praticien, dérivés des congés approuvés.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacationIndex {
    blocked: BTreeMap<ProviderId, BTreeSet<NaiveDate>>,
}

impl VacationIndex {
    /// Seules les demandes `APPROVED` bloquent ; chaque jour de `[start, end]`
    /// devient un jour bloqué.
    pub fn build(requests: &[VacationRequest]) -> Self {
        let mut blocked: BTreeMap<ProviderId, BTreeSet<NaiveDate>> = BTreeMap::new();
        for request in requests.iter().filter(|r| r.is_approved()) {
            let days = request
                .start_date
                .iter_days()
                .take_while(|d| *d <= request.end_date);
            blocked
                .entry(request.provider_id.clone())
                .or_default()
                .extend(days);
        }
        Self { blocked }
    }

    pub fn is_blocked(&self, id: &ProviderId, day: NaiveDate) -> bool {
        self.blocked.get(id).is_some_and(|days| days.contains(&day))
    }

    pub fn blocked_days(&self, id: &ProviderId) -> Option<&BTreeSet<NaiveDate>> {
        self.blocked.get(id)
    }

    /// Regroupe les jours bloqués en séquences contiguës.
    pub fn spans(&self, id: &ProviderId) -> Vec<VacationSpan> {
        let mut out: Vec<VacationSpan> = Vec::new();
        let Some(days) = self.blocked.get(id) else {
            return out;
        };
        for &day in days {
            match out.last_mut() {
                Some(span) if span.end.succ_opt() == Some(day) => span.end = day,
                _ => out.push(VacationSpan {
                    start: day,
                    end: day,
                }),
            }
        }
        out
    }
}
