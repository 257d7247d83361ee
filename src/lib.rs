#![forbid(unsafe_code)]
//! Cardio Roster — moteur de rotation pour plannings de cardiologie (sans BD).
//!
//! - Affectations de semaine (hôpitaux, cabinets, OBL, clinique ICD).
//! - Gardes de semaine et de week-end en round-robin.
//! - Éligibilité : exclusions, congés, restrictions de sites, privilèges.
//! - Résolution déterministe ; un besoin non couvert reste visible comme un trou.

pub mod config;
pub mod io;
pub mod model;
pub mod report;
pub mod rules;
pub mod scheduler;
pub mod seed;
pub mod storage;

pub use config::{load_rules, Settings};
pub use model::{
    Block, Holiday, Privileges, Provider, ProviderId, ProviderType, SiteHospital, SiteKind,
    SiteOffice, Snapshot, SnapshotSource, VacationRequest, VacationStatus,
};
pub use report::{
    coverage_gaps, fairness, weekly_vacation_notes, CoverageSummary, FairnessSummary,
    ReportRenderer, TextReport,
};
pub use rules::Rules;
pub use scheduler::{
    solve_schedule, CallAssignment, CallType, DayAssignment, EligibilityPolicy, RotationCycle,
    ScheduleOutput, SolveError, Solver, VacationIndex,
};
pub use storage::{JsonStorage, Storage};
