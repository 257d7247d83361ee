#![forbid(unsafe_code)]
use cardio_roster::{
    coverage_gaps, seed, solve_schedule, Block, CallType, Provider, ProviderId, ProviderType, Rules,
    ScheduleOutput, Snapshot, SolveError, Solver, VacationRequest, VacationStatus,
};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn demo_schedule() -> ScheduleOutput {
    let snapshot = seed::demo_snapshot();
    let rules = seed::demo_rules();
    let (start, end) = seed::demo_window();
    solve_schedule(&snapshot, &rules, start, end).unwrap()
}

fn site<'s>(
    schedule: &'s ScheduleOutput,
    day: NaiveDate,
    block: Block,
    code: &str,
) -> Option<&'s cardio_roster::DayAssignment> {
    schedule
        .assignments_on(day)
        .find(|a| a.block == block && a.site_code == code)
}

fn id(s: &str) -> ProviderId {
    ProviderId::new(s)
}

#[test]
fn one_weekday_slate_per_open_day() {
    let schedule = demo_schedule();
    let wth_am = schedule
        .assignments
        .iter()
        .filter(|a| a.site_code == "WTH" && a.block == Block::Am)
        .count();
    // 12 semaines ouvrées, moins MLK et Presidents Day
    assert_eq!(wth_am, 58);
    assert!(schedule.assignments.iter().all(|a| a.date.weekday() != Weekday::Sat
        && a.date.weekday() != Weekday::Sun));
}

#[test]
fn closed_holidays_have_no_assignments() {
    let schedule = demo_schedule();
    assert_eq!(schedule.assignments_on(date(2026, 1, 19)).count(), 0);
    assert_eq!(schedule.assignments_on(date(2026, 2, 16)).count(), 0);
    assert!(schedule.assignments_on(date(2026, 1, 20)).count() > 0);
}

#[test]
fn wt_hospital_has_one_md_and_two_distinct_apns() {
    let schedule = demo_schedule();
    let rules = seed::demo_rules();
    for am in schedule
        .assignments
        .iter()
        .filter(|a| a.site_code == "WTH" && a.block == Block::Am)
    {
        assert_eq!(am.providers.len(), 1, "WTH on {}", am.date);
        assert!(rules.rotations.wt_hospital_md.contains(&am.providers[0]));
        let pm = site(&schedule, am.date, Block::Pm, "WTH").unwrap();
        assert_eq!(pm.providers, am.providers, "same MD all day on {}", am.date);

        for block in Block::ALL {
            let apns = site(&schedule, am.date, block, "WTH_APN").unwrap();
            assert_eq!(apns.providers.len(), 2);
            assert_ne!(apns.providers[0], apns.providers[1]);
            assert!(apns
                .providers
                .iter()
                .all(|p| rules.rotations.wt_hospital_apn.contains(p)));
        }
    }
}

#[test]
fn rmc_pairs_an_md_with_an_apn() {
    let schedule = demo_schedule();
    let rules = seed::demo_rules();
    let rmc: Vec<_> = schedule
        .assignments
        .iter()
        .filter(|a| a.site_code == "RMC")
        .collect();
    assert_eq!(rmc.len(), 58 * 2);
    for a in rmc {
        assert_eq!(a.providers.len(), 2);
        assert!(rules.rotations.rmc_md.contains(&a.providers[0]));
        assert!(rules.rotations.rmc_apn.contains(&a.providers[1]));
    }
}

#[test]
fn offices_take_a_noninvasive_md_other_than_the_wt_hospital_md() {
    let snapshot = seed::demo_snapshot();
    let schedule = demo_schedule();
    for a in schedule
        .assignments
        .iter()
        .filter(|a| ["HH", "HH3", "SVI", "WT"].contains(&a.site_code.as_str()))
    {
        assert_eq!(a.providers.len(), 1, "{} {} {}", a.site_code, a.date, a.block);
        let md = snapshot.find_provider(a.providers[0].as_str()).unwrap();
        assert!(md.is_md() && !md.is_invasive);
        let wth = site(&schedule, a.date, Block::Am, "WTH").unwrap();
        assert!(!wth.providers.contains(&a.providers[0]));
    }
}

#[test]
fn obl_runs_on_wednesdays_only() {
    let schedule = demo_schedule();
    let pool = seed::demo_rules().obl.physicians;
    let obl: Vec<_> = schedule
        .assignments
        .iter()
        .filter(|a| a.site_code == "COO_OBL")
        .collect();
    assert!(!obl.is_empty());
    for a in obl {
        assert_eq!(a.date.weekday(), Weekday::Wed);
        assert_eq!(a.providers.len(), 1);
        assert!(pool.contains(&a.providers[0]));
    }
}

#[test]
fn icd_clinic_follows_the_gated_apn_days() {
    let schedule = demo_schedule();
    let icd: Vec<_> = schedule
        .assignments
        .iter()
        .filter(|a| a.site_code.starts_with("ICD_"))
        .collect();
    assert!(!icd.is_empty());
    for a in &icd {
        let expected = match a.date.weekday() {
            Weekday::Mon => "ICD_WT",
            Weekday::Tue => "ICD_SVI",
            other => panic!("icd clinic on {other}"),
        };
        assert_eq!(a.site_code, expected);
        assert_eq!(a.providers, vec![id("EKT"), id("NMC"), id("JKT")]);
    }
    assert_eq!(schedule.icd_sites.get(&date(2026, 1, 5)).map(String::as_str), Some("WT"));
    assert_eq!(schedule.icd_sites.get(&date(2026, 1, 6)).map(String::as_str), Some("SVI"));
    assert!(!schedule.icd_sites.contains_key(&date(2026, 1, 7)));
}

#[test]
fn approved_vacations_keep_providers_off_every_duty() {
    let schedule = demo_schedule();
    let away = [id("JOO"), id("APZ")];
    for offset in 0..5 {
        let day = date(2026, 2, 2) + Days::new(offset);
        for a in schedule.assignments_on(day) {
            assert!(a.providers.iter().all(|p| !away.contains(p)), "{a:?}");
        }
        for c in schedule.call_assignments.iter().filter(|c| c.date == day) {
            assert!(c.providers.iter().all(|p| !away.contains(p)), "{c:?}");
        }
    }
    let keys: Vec<_> = schedule.vacations.keys().cloned().collect();
    assert_eq!(keys, vec![id("APZ"), id("JOO")]);
}

#[test]
fn weekday_calls_draw_two_distinct_providers() {
    let schedule = demo_schedule();
    let snapshot = seed::demo_snapshot();
    let excluded = &seed::demo_rules().call.excluded;
    for c in schedule.calls_of(CallType::NoninvasiveWeekday) {
        let [hh, ch] = c.providers.as_slice() else {
            panic!("pair expected: {c:?}");
        };
        assert_ne!(hh, ch);
        assert_eq!(c.label, format!("HH: {hh} CH: {ch}"));
        for p in [hh, ch] {
            let md = snapshot.find_provider(p.as_str()).unwrap();
            assert!(md.is_md() && !md.is_invasive && !md.is_ep);
            assert!(!excluded.contains(p));
        }
    }
    for c in schedule.calls_of(CallType::InterventionalWeekday) {
        let [primary, backup] = c.providers.as_slice() else {
            panic!("pair expected: {c:?}");
        };
        assert_ne!(primary, backup);
        assert_eq!(c.label, format!("{primary}. {backup}."));
        assert!(snapshot.find_provider(primary.as_str()).unwrap().is_invasive);
    }
}

#[test]
fn weekend_calls_mirror_friday_and_sunday() {
    let schedule = demo_schedule();
    let weekend: Vec<_> = schedule.calls_of(CallType::WeekendNoninv).collect();
    // 12 week-ends complets dans la fenêtre de démonstration
    assert_eq!(weekend.len(), 36);

    for fri in weekend.iter().filter(|c| c.date.weekday() == Weekday::Fri) {
        let weekday = schedule
            .calls_of(CallType::NoninvasiveWeekday)
            .find(|c| c.date == fri.date)
            .unwrap();
        assert_eq!(fri.label, weekday.label);
    }

    let interventional: Vec<_> = schedule.calls_of(CallType::InterventionalWeekend).collect();
    assert_eq!(interventional.len(), 12);
    for c in interventional {
        assert_eq!(c.date.weekday(), Weekday::Fri);
        let sunday = c.date + Days::new(2);
        let sun_call = weekend.iter().find(|w| w.date == sunday).unwrap();
        assert_eq!(c.providers, sun_call.providers);
        assert_eq!(c.label, sun_call.providers[0].to_string());
    }
}

#[test]
fn solving_twice_gives_identical_output() {
    let first = serde_json::to_string(&demo_schedule()).unwrap();
    let second = serde_json::to_string(&demo_schedule()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_rules_leave_visible_gaps() {
    let snapshot = seed::demo_snapshot();
    let rules = Rules::from_value(&Value::Null);
    let schedule = Solver::new(&snapshot, &rules)
        .solve(date(2026, 1, 5), date(2026, 1, 9))
        .unwrap();

    for code in ["WTH", "WTH_APN", "RMC"] {
        let slots: Vec<_> = schedule.assignments.iter().filter(|a| a.site_code == code).collect();
        assert_eq!(slots.len(), 10);
        assert!(slots.iter().all(|a| a.is_gap()));
    }
    assert!(!schedule.assignments.iter().any(|a| a.site_code == "COO_OBL"));
    assert!(!schedule.assignments.iter().any(|a| a.site_code.starts_with("ICD_")));
    assert!(schedule
        .assignments
        .iter()
        .filter(|a| a.site_code == "HH")
        .all(|a| !a.is_gap()));
    assert_eq!(schedule.calls_of(CallType::NoninvasiveWeekday).count(), 5);
}

#[test]
fn unknown_initials_are_dropped_from_rotations() {
    let snapshot = seed::demo_snapshot();
    let rules = Rules::from_value(&json!({
        "rotations": { "wt_hospital_md": ["ZZZ", "JOO"] }
    }));
    let schedule = Solver::new(&snapshot, &rules)
        .solve(date(2026, 1, 26), date(2026, 2, 6))
        .unwrap();

    let jan26 = site(&schedule, date(2026, 1, 26), Block::Am, "WTH").unwrap();
    assert_eq!(jan26.providers, vec![id("JOO")]);
    // JOO en congés : trou plutôt qu'un remplaçant hors rotation
    let feb3 = site(&schedule, date(2026, 2, 3), Block::Am, "WTH").unwrap();
    assert!(feb3.is_gap());
}

#[test]
fn weekend_call_is_all_or_nothing() {
    let aaa = Provider::new("AAA", "Only One", ProviderType::Md);
    let snapshot = Snapshot {
        providers: vec![aaa],
        vacation_requests: vec![VacationRequest::new(
            id("AAA"),
            date(2026, 1, 11),
            date(2026, 1, 11),
            VacationStatus::Approved,
        )
        .unwrap()],
        ..Snapshot::default()
    };
    let rules = Rules::default();
    let schedule = Solver::new(&snapshot, &rules)
        .solve(date(2026, 1, 5), date(2026, 1, 16))
        .unwrap();

    // un seul praticien : aucune paire de semaine possible
    assert_eq!(schedule.calls_of(CallType::NoninvasiveWeekday).count(), 0);
    assert_eq!(schedule.calls_of(CallType::InterventionalWeekday).count(), 0);

    let dates: BTreeSet<_> = schedule.call_assignments.iter().map(|c| c.date).collect();
    assert!(!dates.contains(&date(2026, 1, 9)));
    assert!(!dates.contains(&date(2026, 1, 10)));

    let weekend: Vec<_> = schedule.calls_of(CallType::WeekendNoninv).collect();
    assert_eq!(
        weekend.iter().map(|c| c.date).collect::<Vec<_>>(),
        vec![date(2026, 1, 16), date(2026, 1, 17), date(2026, 1, 18)]
    );
    assert!(weekend.iter().all(|c| c.label == "AAA"));

    let interventional: Vec<_> = schedule.calls_of(CallType::InterventionalWeekend).collect();
    assert_eq!(interventional.len(), 1);
    assert_eq!(interventional[0].date, date(2026, 1, 16));
    assert_eq!(interventional[0].providers, vec![id("AAA")]);
}

#[test]
fn reversed_window_is_rejected() {
    let snapshot = seed::demo_snapshot();
    let rules = seed::demo_rules();
    let err = solve_schedule(&snapshot, &rules, date(2026, 2, 1), date(2026, 1, 1)).unwrap_err();
    assert!(matches!(err, SolveError::InvalidWindow { .. }));
}

#[test]
fn single_day_window_is_accepted() {
    let snapshot = seed::demo_snapshot();
    let rules = seed::demo_rules();
    let day = date(2026, 1, 7);
    let schedule = solve_schedule(&snapshot, &rules, day, day).unwrap();
    assert!(schedule.assignments.iter().all(|a| a.date == day));
    assert!(schedule.assignments.iter().any(|a| a.site_code == "COO_OBL"));
    // pas de lundi dans la fenêtre : aucune garde
    assert!(schedule.call_assignments.is_empty());
}

#[test]
fn partial_pairs_are_emitted_as_found() {
    let snapshot = seed::demo_snapshot();
    let rules = Rules::from_value(&json!({
        "rotations": { "rmc_apn": ["VJC"], "wt_hospital_apn": ["AD"] }
    }));
    let day = date(2026, 1, 6);
    let schedule = Solver::new(&snapshot, &rules).solve(day, day).unwrap();

    for block in Block::ALL {
        assert!(site(&schedule, day, block, "WTH").unwrap().is_gap());
        assert_eq!(site(&schedule, day, block, "WTH_APN").unwrap().providers, vec![id("AD")]);
        assert_eq!(site(&schedule, day, block, "RMC").unwrap().providers, vec![id("VJC")]);
    }

    // seules les listes vides comptent comme trous
    let sites: Vec<_> = coverage_gaps(&schedule).into_iter().map(|c| c.site).collect();
    assert_eq!(sites, vec!["WTH".to_string()]);
}

#[test]
fn holiday_needs_both_flags_to_close_the_day() {
    let rules = seed::demo_rules();
    let mlk = date(2026, 1, 19);

    let mut open_weekend = seed::demo_snapshot();
    for holiday in open_weekend.holidays.iter_mut().filter(|h| h.date == mlk) {
        holiday.extend_weekend = false;
    }
    let schedule = Solver::new(&open_weekend, &rules).solve(mlk, mlk).unwrap();
    assert!(site(&schedule, mlk, Block::Am, "WTH").is_some());
    assert!(site(&schedule, mlk, Block::Pm, "HH").is_some());

    let mut offices_open = seed::demo_snapshot();
    for holiday in offices_open.holidays.iter_mut().filter(|h| h.date == mlk) {
        holiday.is_office_closed = false;
    }
    let schedule = Solver::new(&offices_open, &rules).solve(mlk, mlk).unwrap();
    assert!(schedule.assignments_on(mlk).count() > 0);

    let closed = seed::demo_snapshot();
    let schedule = Solver::new(&closed, &rules).solve(mlk, mlk).unwrap();
    assert_eq!(schedule.assignments_on(mlk).count(), 0);
}
