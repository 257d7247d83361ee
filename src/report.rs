use crate::model::{Block, ProviderId, SiteKind};
use crate::scheduler::{CallType, ScheduleOutput};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Demi-journées sans praticien pour un site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageSummary {
    pub site: String,
    pub gaps: Vec<(NaiveDate, Block)>,
}

/// Décompte par praticien pour une métrique d'équité.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairnessSummary {
    pub metric: String,
    pub values: BTreeMap<ProviderId, u32>,
}

/// Trous de couverture groupés par code de site (ordre alphabétique).
pub fn coverage_gaps(schedule: &ScheduleOutput) -> Vec<CoverageSummary> {
    let mut by_site: BTreeMap<&str, Vec<(NaiveDate, Block)>> = BTreeMap::new();
    for assignment in schedule.assignments.iter().filter(|a| a.is_gap()) {
        by_site
            .entry(assignment.site_code.as_str())
            .or_default()
            .push((assignment.date, assignment.block));
    }
    by_site
        .into_iter()
        .map(|(site, gaps)| CoverageSummary {
            site: site.to_string(),
            gaps,
        })
        .collect()
}

/// `weekend_call` : week-ends non invasifs ; `hospital_days` : présences en
/// affectation hospitalière.
pub fn fairness(schedule: &ScheduleOutput) -> Vec<FairnessSummary> {
    let mut weekend: BTreeMap<ProviderId, u32> = BTreeMap::new();
    for call in schedule.call_assignments.iter() {
        if call.call_type != CallType::WeekendNoninv {
            continue;
        }
        if let Some(first) = call.providers.first() {
            *weekend.entry(first.clone()).or_default() += 1;
        }
    }

    let mut hospital: BTreeMap<ProviderId, u32> = BTreeMap::new();
    for assignment in schedule
        .assignments
        .iter()
        .filter(|a| a.site_type == SiteKind::Hospital)
    {
        for provider in &assignment.providers {
            *hospital.entry(provider.clone()).or_default() += 1;
        }
    }

    vec![
        FairnessSummary {
            metric: "weekend_call".to_string(),
            values: weekend,
        },
        FairnessSummary {
            metric: "hospital_days".to_string(),
            values: hospital,
        },
    ]
}

fn day_abbrev(day: NaiveDate) -> &'static str {
    match day.weekday() {
        Weekday::Mon => "M",
        Weekday::Tue => "T",
        Weekday::Wed => "W",
        Weekday::Thu => "Th",
        Weekday::Fri => "F",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Notes de congés d'une semaine (lundi -> dimanche), ex. `JOO — M–F`.
pub fn weekly_vacation_notes(schedule: &ScheduleOutput, week_start: NaiveDate) -> Vec<String> {
    let Some(week_end) = week_start.checked_add_days(Days::new(6)) else {
        return Vec::new();
    };
    let mut notes = Vec::new();
    for (provider, spans) in &schedule.vacations {
        for span in spans {
            if span.end < week_start || span.start > week_end {
                continue;
            }
            let from = span.start.max(week_start);
            let to = span.end.min(week_end);
            let text = if from == to {
                day_abbrev(from).to_string()
            } else {
                format!("{}–{}", day_abbrev(from), day_abbrev(to))
            };
            notes.push(format!("{provider} — {text}"));
        }
    }
    notes
}

/// Permet de customiser le rendu des rapports (texte, markdown, etc.).
pub trait ReportRenderer {
    fn render_coverage(&self, coverage: &[CoverageSummary]) -> String;
    fn render_fairness(&self, fairness: &[FairnessSummary]) -> String;
}

/// Rendu texte brut pour le terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl ReportRenderer for TextReport {
    fn render_coverage(&self, coverage: &[CoverageSummary]) -> String {
        if coverage.is_empty() {
            return "OK: no coverage gaps\n".to_string();
        }
        let mut out = String::new();
        for summary in coverage {
            let _ = writeln!(out, "{} ({} gap(s))", summary.site, summary.gaps.len());
            for (date, block) in &summary.gaps {
                let _ = writeln!(out, "  {date} {block}");
            }
        }
        out
    }

    fn render_fairness(&self, fairness: &[FairnessSummary]) -> String {
        let mut out = String::new();
        for summary in fairness {
            let _ = writeln!(out, "{}", summary.metric);
            for (provider, count) in &summary.values {
                let _ = writeln!(out, "  {provider}: {count}");
            }
        }
        out
    }
}
