use super::{
    util, DayAssignment, RotationCycle, ScheduleOutput, Solver, ICD_SITES, OBL_HOSPITAL, OBL_SITE,
    OFFICE_CODES, RMC_HOSPITAL, WT_HOSPITAL, WT_HOSPITAL_APN,
};
use crate::model::{Block, Provider, ProviderId, SiteKind};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Affectations de semaine : hôpitaux, cabinets, OBL, clinique ICD.
pub(super) struct WeekdayPlanner<'a, 's> {
    solver: &'s Solver<'a>,
    wt_md: RotationCycle<&'a Provider>,
    wt_apn: RotationCycle<&'a Provider>,
    rmc_md: RotationCycle<&'a Provider>,
    rmc_apn: RotationCycle<&'a Provider>,
    obl: RotationCycle<&'a Provider>,
    ep_mds: Vec<&'a Provider>,
    ep_apns: Vec<&'a Provider>,
}

impl<'a, 's> WeekdayPlanner<'a, 's> {
    pub(super) fn new(solver: &'s Solver<'a>) -> Self {
        let rules = solver.rules();
        let seeds = &rules.rotations;
        let mut ep_apns = solver.resolve(&rules.icd_clinic.ep_apns, "icd_clinic.ep_apns");
        let mut seen = HashSet::new();
        ep_apns.retain(|p| seen.insert(p.initials.clone()));
        Self {
            solver,
            wt_md: RotationCycle::new(solver.resolve(&seeds.wt_hospital_md, "wt_hospital_md")),
            wt_apn: RotationCycle::new(solver.resolve(&seeds.wt_hospital_apn, "wt_hospital_apn")),
            rmc_md: RotationCycle::new(solver.resolve(&seeds.rmc_md, "rmc_md")),
            rmc_apn: RotationCycle::new(solver.resolve(&seeds.rmc_apn, "rmc_apn")),
            obl: RotationCycle::new(solver.resolve(&rules.obl.physicians, "obl")),
            ep_mds: solver.resolve(&rules.icd_clinic.ep_mds, "icd_clinic.ep_mds"),
            ep_apns,
        }
    }

    pub(super) fn plan(&mut self, start: NaiveDate, end: NaiveDate, out: &mut ScheduleOutput) {
        for day in util::workdays(start, end) {
            if self.solver.is_closed_holiday(day) {
                tracing::debug!(%day, "closed holiday, weekday assignments skipped");
                continue;
            }
            let wt_md = self.plan_wt_hospital(day, out);
            self.plan_rmc(day, out);
            self.plan_offices(day, wt_md, out);
            if day.weekday() == Weekday::Wed && !self.obl.is_empty() {
                self.plan_obl(day, out);
            }
            if self.solver.rules().icd_clinic.enabled {
                self.plan_icd_clinic(day, out);
            }
        }
    }

    /// Un MD pour la journée (tiré sur le bloc AM), deux APN distincts par bloc.
    fn plan_wt_hospital(&mut self, day: NaiveDate, out: &mut ScheduleOutput) -> Option<&'a Provider> {
        let policy = self.solver.policy();
        let md = self
            .wt_md
            .advance_until(|p| policy.is_eligible(p, WT_HOSPITAL, SiteKind::Hospital, Block::Am, day));

        for block in Block::ALL {
            out.add_assignment(DayAssignment::new(
                day,
                block,
                WT_HOSPITAL,
                SiteKind::Hospital,
                ids(md),
            ));

            let mut apns: Vec<&Provider> = Vec::with_capacity(2);
            for _ in 0..2 {
                let drawn = self.wt_apn.advance_until(|p| {
                    policy.is_eligible(p, WT_HOSPITAL, SiteKind::Hospital, block, day)
                        && !apns.iter().any(|a| a.id() == p.id())
                });
                if let Some(apn) = drawn {
                    apns.push(apn);
                }
            }
            out.add_assignment(DayAssignment::new(
                day,
                block,
                WT_HOSPITAL_APN,
                SiteKind::Hospital,
                ids(apns),
            ));
        }
        md
    }

    /// Binôme MD + APN par bloc ; un binôme incomplet reste visible tel quel.
    fn plan_rmc(&mut self, day: NaiveDate, out: &mut ScheduleOutput) {
        let policy = self.solver.policy();
        for block in Block::ALL {
            let md = self
                .rmc_md
                .advance_until(|p| policy.is_eligible(p, RMC_HOSPITAL, SiteKind::Hospital, block, day));
            let apn = self
                .rmc_apn
                .advance_until(|p| policy.is_eligible(p, RMC_HOSPITAL, SiteKind::Hospital, block, day));
            out.add_assignment(DayAssignment::new(
                day,
                block,
                RMC_HOSPITAL,
                SiteKind::Hospital,
                ids(md.into_iter().chain(apn)),
            ));
        }
    }

    fn plan_offices(&self, day: NaiveDate, wt_md: Option<&'a Provider>, out: &mut ScheduleOutput) {
        for code in OFFICE_CODES {
            for block in Block::ALL {
                let md = self.office_md(day, code, block, wt_md);
                out.add_assignment(DayAssignment::new(day, block, code, SiteKind::Office, ids(md)));
            }
        }
    }

    /// Sélection directe : MD non invasif éligible de plus faible
    /// (ancienneté, initiales), hors MD de WTH du jour.
    fn office_md(
        &self,
        day: NaiveDate,
        code: &str,
        block: Block,
        skip: Option<&'a Provider>,
    ) -> Option<&'a Provider> {
        let policy = self.solver.policy();
        self.solver
            .providers()
            .iter()
            .copied()
            .filter(|p| p.is_md() && !p.is_invasive)
            .filter(|p| skip.map_or(true, |s| s.id() != p.id()))
            .filter(|p| !policy.vacations().is_blocked(p.id(), day))
            .filter(|p| policy.is_eligible(p, code, SiteKind::Office, block, day))
            .min_by(|a, b| {
                a.seniority
                    .unwrap_or(0)
                    .cmp(&b.seniority.unwrap_or(0))
                    .then_with(|| a.id().cmp(b.id()))
            })
    }

    fn plan_obl(&mut self, day: NaiveDate, out: &mut ScheduleOutput) {
        let policy = self.solver.policy();
        for block in Block::ALL {
            let physician = self
                .obl
                .advance_until(|p| policy.is_eligible(p, OBL_HOSPITAL, SiteKind::Hospital, block, day));
            out.add_assignment(DayAssignment::new(
                day,
                block,
                OBL_SITE,
                SiteKind::Hospital,
                ids(physician),
            ));
        }
    }

    /// Un MD EP et deux APN EP, pris dans l'ordre des listes de règles.
    /// Sans deux APN disponibles, pas de clinique ce jour-là.
    fn plan_icd_clinic(&self, day: NaiveDate, out: &mut ScheduleOutput) {
        let clinic = &self.solver.rules().icd_clinic;
        let vacations = self.solver.policy().vacations();
        let weekday_index = day.weekday().num_days_from_monday();

        let ep_md = self
            .ep_mds
            .iter()
            .copied()
            .find(|p| p.is_md() && p.is_ep && !vacations.is_blocked(p.id(), day));

        let ep_apns: Vec<&Provider> = self
            .ep_apns
            .iter()
            .copied()
            .filter(|p| p.is_apn() && p.is_ep)
            .filter(|p| *p.id() != clinic.gated_apn || clinic.nmc_days.contains(&weekday_index))
            .filter(|p| !vacations.is_blocked(p.id(), day))
            .take(2)
            .collect();

        let (Some(ep_md), [first, second]) = (ep_md, ep_apns.as_slice()) else {
            tracing::debug!(%day, "icd clinic not staffed");
            return;
        };

        let site = ICD_SITES[(weekday_index % 2) as usize];
        let code = format!("ICD_{site}");
        out.icd_sites.insert(day, site.to_string());
        for block in Block::ALL {
            out.add_assignment(DayAssignment::new(
                day,
                block,
                code.as_str(),
                SiteKind::Office,
                ids([ep_md, *first, *second]),
            ));
        }
    }
}

fn ids<'p, I: IntoIterator<Item = &'p Provider>>(providers: I) -> Vec<ProviderId> {
    providers.into_iter().map(|p| p.id().clone()).collect()
}
