use super::*;

#[test]
fn seeded_random_is_deterministic() {
    let mut a = SeededRandom::from_seed(123);
    let mut b = SeededRandom::from_seed(123);
    for _ in 0..32 {
        assert_eq!(a.next_f64(), b.next_f64());
    }
}

#[test]
fn seeded_draws_stay_in_unit_interval() {
    let mut r = SeededRandom::from_seed(7);
    for _ in 0..1000 {
        let v = r.next_f64();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn scripted_random_cycles_and_clamps() {
    let mut r = ScriptedRandom::new(vec![0.25, 1.5, -3.0]);
    assert_eq!(r.next_f64(), 0.25);
    assert!(r.next_f64() < 1.0);
    assert_eq!(r.next_f64(), 0.0);
    assert_eq!(r.next_f64(), 0.25);
    assert_eq!(r.draws(), 4);
}

#[test]
fn next_index_never_reaches_len() {
    let mut r = ScriptedRandom::constant(0.999_999);
    assert_eq!(r.next_index(3), 2);
    assert_eq!(r.next_index(0), 0);
    let mut r = ScriptedRandom::constant(0.0);
    assert_eq!(r.next_index(6), 0);
}

#[test]
fn chance_is_strictly_below() {
    let mut r = ScriptedRandom::new(vec![0.1, 0.09]);
    assert!(!r.chance(0.1));
    assert!(r.chance(0.1));
}
