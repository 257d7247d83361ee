#![forbid(unsafe_code)]
use cardio_roster::RotationCycle;

#[test]
fn empty_cycle_yields_nothing() {
    let mut cycle: RotationCycle<u32> = RotationCycle::new(Vec::new());
    assert!(cycle.is_empty());
    assert_eq!(cycle.advance_until(|_| true), None);
    assert_eq!(cycle.cursor(), 0);
}

#[test]
fn draws_members_in_order_and_wraps() {
    let mut cycle = RotationCycle::new(vec!["a", "b", "c"]);
    let drawn: Vec<_> = (0..4).filter_map(|_| cycle.advance_until(|_| true)).collect();
    assert_eq!(drawn, vec!["a", "b", "c", "a"]);
    assert_eq!(cycle.cursor(), 1);
}

#[test]
fn skipped_members_lose_their_turn() {
    let mut cycle = RotationCycle::new(vec![1, 2, 3, 4]);
    assert_eq!(cycle.advance_until(|x| *x == 3), Some(3));
    assert_eq!(cycle.cursor(), 3);
    // 1 et 2 ont été examinés : ils ne repassent pas avant 4
    assert_eq!(cycle.advance_until(|_| true), Some(4));
    assert_eq!(cycle.advance_until(|_| true), Some(1));
}

#[test]
fn no_match_consumes_a_full_turn() {
    let mut cycle = RotationCycle::new(vec![1, 2, 3]);
    cycle.advance_until(|_| true);
    assert_eq!(cycle.advance_until(|_| false), None);
    assert_eq!(cycle.cursor(), 1);
    assert_eq!(cycle.advance_until(|_| true), Some(2));
}
