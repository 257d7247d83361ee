use super::{util, CallAssignment, CallType, RotationCycle, ScheduleOutput, Solver, VacationIndex};
use crate::model::Provider;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Gardes de semaine et de week-end, semaine par semaine (ancrées au lundi).
pub(super) struct CallScheduler<'a, 's> {
    solver: &'s Solver<'a>,
    noninvasive: RotationCycle<&'a Provider>,
    interventional: RotationCycle<&'a Provider>,
}

impl<'a, 's> CallScheduler<'a, 's> {
    pub(super) fn new(solver: &'s Solver<'a>) -> Self {
        let excluded = &solver.rules().call.excluded;
        let noninvasive = solver
            .providers()
            .iter()
            .copied()
            .filter(|p| p.is_md() && !p.is_invasive && !p.is_ep && !excluded.contains(p.id()))
            .collect();
        let interventional = solver
            .providers()
            .iter()
            .copied()
            .filter(|p| p.is_md() && p.is_invasive)
            .collect();
        Self {
            solver,
            noninvasive: RotationCycle::new(noninvasive),
            interventional: RotationCycle::new(interventional),
        }
    }

    pub(super) fn plan(&mut self, start: NaiveDate, end: NaiveDate, out: &mut ScheduleOutput) {
        for monday in util::mondays(start, end) {
            self.plan_week(monday, end, out);
        }
    }

    fn plan_week(&mut self, monday: NaiveDate, end: NaiveDate, out: &mut ScheduleOutput) {
        let vacations = self.solver.policy().vacations();
        let mut friday_label: Option<String> = None;

        for day in monday.iter_days().take(5).take_while(|d| *d <= end) {
            if let Some([hh, ch]) = draw_pair(&mut self.noninvasive, vacations, day) {
                let label = format!("HH: {} CH: {}", hh.id(), ch.id());
                if day.weekday() == Weekday::Fri {
                    friday_label = Some(label.clone());
                }
                out.add_call(CallAssignment::new(
                    day,
                    CallType::NoninvasiveWeekday,
                    label,
                    vec![hh.id().clone(), ch.id().clone()],
                ));
            }
            if let Some([primary, backup]) = draw_pair(&mut self.interventional, vacations, day) {
                out.add_call(CallAssignment::new(
                    day,
                    CallType::InterventionalWeekday,
                    format!("{}. {}.", primary.id(), backup.id()),
                    vec![primary.id().clone(), backup.id().clone()],
                ));
            }
        }

        let Some(friday) = monday.checked_add_days(Days::new(4)) else {
            return;
        };
        let mut weekend: Vec<(NaiveDate, &'a Provider)> = Vec::with_capacity(3);
        for day in friday.iter_days().take(3) {
            let drawn = self
                .noninvasive
                .advance_until(|p| !vacations.is_blocked(p.id(), day));
            if let Some(provider) = drawn {
                weekend.push((day, provider));
            }
        }

        // tout ou rien pour le trio vendredi / samedi / dimanche
        let [(fri, fri_md), (sat, sat_md), (sun, sun_md)] = weekend.as_slice() else {
            tracing::debug!(%monday, drawn = weekend.len(), "weekend call not staffed");
            return;
        };
        let fri_label = friday_label.unwrap_or_else(|| fri_md.id().to_string());
        out.add_call(CallAssignment::new(
            *fri,
            CallType::WeekendNoninv,
            fri_label,
            vec![fri_md.id().clone()],
        ));
        for (day, provider) in [(sat, sat_md), (sun, sun_md)] {
            out.add_call(CallAssignment::new(
                *day,
                CallType::WeekendNoninv,
                provider.id().to_string(),
                vec![provider.id().clone()],
            ));
        }
        out.add_call(CallAssignment::new(
            *fri,
            CallType::InterventionalWeekend,
            sun_md.id().to_string(),
            vec![sun_md.id().clone()],
        ));
    }
}

/// Deux tirages successifs dans la même rotation, le second distinct du premier.
fn draw_pair<'a>(
    cycle: &mut RotationCycle<&'a Provider>,
    vacations: &VacationIndex,
    day: NaiveDate,
) -> Option<[&'a Provider; 2]> {
    let first = cycle.advance_until(|p| !vacations.is_blocked(p.id(), day));
    let second = cycle.advance_until(|p| {
        !vacations.is_blocked(p.id(), day) && first.map_or(true, |f| f.id() != p.id())
    });
    Some([first?, second?])
}
