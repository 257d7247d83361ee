use crate::model::{ProviderId, VacationRequest, VacationStatus};
use crate::report::FairnessSummary;
use crate::scheduler::ScheduleOutput;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de congés depuis CSV: header `provider,start_date,end_date[,status]`
/// (dates `YYYY-MM-DD`, statut `APPROVED` par défaut).
pub fn import_vacations_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<VacationRequest>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let provider = rec.get(0).context("missing provider")?.trim();
        if provider.is_empty() {
            bail!("invalid vacation row (empty provider)");
        }
        let start = parse_date(rec.get(1).context("missing start_date")?)
            .with_context(|| format!("invalid start_date for {provider}"))?;
        let end = parse_date(rec.get(2).context("missing end_date")?)
            .with_context(|| format!("invalid end_date for {provider}"))?;
        let status = match rec.get(3).map(str::trim) {
            None | Some("") => VacationStatus::Approved,
            Some(raw) => parse_status(raw)
                .with_context(|| format!("invalid status for {provider}"))?,
        };
        let request = VacationRequest::new(ProviderId::new(provider), start, end, status)
            .map_err(anyhow::Error::msg)?;
        out.push(request);
    }
    Ok(out)
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn parse_status(raw: &str) -> anyhow::Result<VacationStatus> {
    match raw.to_ascii_uppercase().as_str() {
        "DRAFT" => Ok(VacationStatus::Draft),
        "SUBMITTED" => Ok(VacationStatus::Submitted),
        "APPROVED" => Ok(VacationStatus::Approved),
        "REJECTED" => Ok(VacationStatus::Rejected),
        _ => bail!("expected DRAFT, SUBMITTED, APPROVED or REJECTED"),
    }
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &ScheduleOutput) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV des affectations: header `date,block,site_code,site_type,providers`
/// (initiales séparées par `/`, titulaire en premier).
pub fn export_assignments_csv<P: AsRef<Path>>(path: P, schedule: &ScheduleOutput) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "block", "site_code", "site_type", "providers"])?;
    for a in &schedule.assignments {
        let date = a.date.to_string();
        let providers = join_ids(&a.providers);
        w.write_record([
            date.as_str(),
            a.block.as_str(),
            a.site_code.as_str(),
            a.site_type.as_str(),
            providers.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des gardes: header `date,call_type,label,providers`
pub fn export_calls_csv<P: AsRef<Path>>(path: P, schedule: &ScheduleOutput) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "call_type", "label", "providers"])?;
    for c in &schedule.call_assignments {
        let date = c.date.to_string();
        let providers = join_ids(&c.providers);
        w.write_record([
            date.as_str(),
            c.call_type.as_str(),
            c.label.as_str(),
            providers.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Export CSV des métriques d'équité: header `metric,provider,count`
pub fn export_fairness_csv<P: AsRef<Path>>(path: P, fairness: &[FairnessSummary]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["metric", "provider", "count"])?;
    let mut buf = itoa::Buffer::new();
    for summary in fairness {
        for (provider, count) in &summary.values {
            w.write_record([summary.metric.as_str(), provider.as_str(), buf.format(*count)])?;
        }
    }
    w.flush()?;
    Ok(())
}

fn join_ids(ids: &[ProviderId]) -> String {
    ids.iter().map(ProviderId::as_str).collect::<Vec<_>>().join("/")
}
