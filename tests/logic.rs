// Host-side tests for the pure janken logic: the outcome truth table and
// the randomized selection helpers. No wasm or browser APIs involved.

use moramora_janken::logic::{Hand, Outcome, pick, pick_different, resolve};

#[test]
fn outcome_truth_table_covers_all_nine_pairs() {
    let cases = [
        (Hand::Rock, Hand::Rock, Outcome::Draw),
        (Hand::Rock, Hand::Scissors, Outcome::Win),
        (Hand::Rock, Hand::Paper, Outcome::Lose),
        (Hand::Scissors, Hand::Rock, Outcome::Lose),
        (Hand::Scissors, Hand::Scissors, Outcome::Draw),
        (Hand::Scissors, Hand::Paper, Outcome::Win),
        (Hand::Paper, Hand::Rock, Outcome::Win),
        (Hand::Paper, Hand::Scissors, Outcome::Lose),
        (Hand::Paper, Hand::Paper, Outcome::Draw),
    ];
    for (user, npc, expected) in cases {
        assert_eq!(resolve(user, npc), expected, "{user:?} vs {npc:?}");
    }
}

#[test]
fn pick_empty_returns_none() {
    let empty: [Hand; 0] = [];
    assert_eq!(pick(&empty), None);
}

#[test]
fn pick_single_always_returns_that_element() {
    for _ in 0..50 {
        assert_eq!(pick(&[Hand::Paper]), Some(&Hand::Paper));
    }
}

#[test]
fn pick_result_is_always_in_the_list() {
    let list = [3u32, 7, 11, 19];
    for _ in 0..100 {
        let value = *pick(&list).expect("non-empty list must yield a value");
        assert!(list.contains(&value), "pick returned {value} not in the list");
    }
}

#[test]
fn pick_different_empty_returns_prev() {
    let empty: [Hand; 0] = [];
    assert_eq!(pick_different(&empty, Hand::Rock), Hand::Rock);
}

#[test]
fn pick_different_single_returns_it_even_when_equal_to_prev() {
    // Documented best-effort policy: a one-element pool cannot satisfy
    // "different", so it returns its element unconditionally.
    assert_eq!(pick_different(&[Hand::Rock], Hand::Rock), Hand::Rock);
    assert_eq!(pick_different(&[Hand::Paper], Hand::Rock), Hand::Paper);
}

#[test]
fn pick_different_never_repeats_prev() {
    for _ in 0..100 {
        let result = pick_different(&Hand::ALL, Hand::Rock);
        assert_ne!(result, Hand::Rock);
        assert!(Hand::ALL.contains(&result));
    }
}

#[test]
fn pick_different_result_is_always_in_the_list() {
    let list = [1i64, 2, 3, 4, 5];
    for _ in 0..100 {
        let result = pick_different(&list, 3);
        assert_ne!(result, 3);
        assert!(list.contains(&result));
    }
}

#[test]
fn pick_different_all_equal_pool_returns_prev() {
    // A pool made entirely of prev can never satisfy the constraint; it
    // must bail out instead of spinning.
    assert_eq!(pick_different(&[7u8, 7, 7], 7), 7);
}
