// Integration tests (native) for the round state machine and the config
// layer. These avoid wasm-specific functionality and exercise pure Rust
// logic so they can run under `cargo test` on the host.

use moramora_janken::config::GameConfig;
use moramora_janken::logic::{Hand, Outcome, resolve};
use moramora_janken::round::{Phase, RoundState};

#[test]
fn full_round_flow() {
    let mut round = RoundState::new();
    assert_eq!(round.phase(), Phase::Shuffling);

    // A few shuffle ticks, each changing the displayed hand.
    for _ in 0..5 {
        let shown = round.npc_hand();
        assert_ne!(round.shuffle_tick().unwrap(), shown);
    }

    let frozen = round.choose(Hand::Scissors).unwrap();
    assert_eq!(round.phase(), Phase::LockedPendingReveal);

    let reveal = round.reveal().unwrap();
    assert_eq!(reveal.user, Hand::Scissors);
    assert_eq!(reveal.npc, frozen);
    assert_eq!(reveal.outcome, resolve(Hand::Scissors, frozen));
    assert_eq!(round.phase(), Phase::ResultShown);

    round.restart();
    assert_eq!(round.phase(), Phase::Shuffling);
    assert_eq!(round.npc_hand(), Hand::Rock);
}

#[test]
fn locked_round_ignores_further_input() {
    let mut round = RoundState::new();
    let _ = round.shuffle_tick();
    round.choose(Hand::Rock).unwrap();
    assert_eq!(round.choose(Hand::Paper), None);
    assert_eq!(round.shuffle_tick(), None);

    round.reveal().unwrap();
    assert_eq!(round.choose(Hand::Paper), None);
    assert_eq!(round.reveal(), None);
}

#[test]
fn config_defaults_are_complete() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.shuffle_interval_ms, 250);
    assert_eq!(cfg.reveal_delay_ms, 900);
    assert_eq!(cfg.shake_duration_ms, 420);
    for outcome in [Outcome::Win, Outcome::Lose, Outcome::Draw] {
        assert!(!cfg.message_for(outcome).is_empty());
    }
    assert!(cfg.expression_for().is_some());
}

#[test]
fn config_round_trips_camel_case_keys() {
    let cfg = GameConfig::from_json(
        r#"{
            "shuffleIntervalMs": 120,
            "revealDelayMs": 600,
            "shakeDurationMs": 300,
            "expressions": ["assets/alt.png"]
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.shuffle_interval_ms, 120);
    assert_eq!(cfg.reveal_delay_ms, 600);
    assert_eq!(cfg.shake_duration_ms, 300);
    assert_eq!(cfg.expression_for(), Some("assets/alt.png"));
}

#[test]
fn config_rejects_malformed_json() {
    assert!(GameConfig::from_json("{not json").is_err());
}

#[test]
fn empty_expression_pool_yields_none() {
    let cfg = GameConfig::from_json(r#"{"expressions": []}"#).unwrap();
    // The round driver falls back to the base expression art in this case.
    assert_eq!(cfg.expression_for(), None);
}
