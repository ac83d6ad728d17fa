//! Presentation tuning supplied by the embedding page.
//!
//! The page passes a JSON blob (timings, per-outcome message pools,
//! expression image paths) to [`crate::start_game_with_config`]. Every field
//! is optional on the wire; missing fields keep their defaults so a page can
//! override just the knobs it cares about.

use serde::Deserialize;

use crate::logic::{Outcome, pick};

/// Timing and message configuration for a game session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Period of the NPC hand shuffle tick.
    pub shuffle_interval_ms: u32,
    /// Delay between the user committing a hand and the result reveal.
    pub reveal_delay_ms: u32,
    /// How long the page shake animation class stays applied.
    pub shake_duration_ms: u32,
    pub messages: MessagePools,
    /// Expression art shown on win / draw; the neutral base face is kept on lose.
    pub expressions: Vec<String>,
}

/// Per-outcome result message pools.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessagePools {
    pub win: Vec<String>,
    pub lose: Vec<String>,
    pub draw: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            shuffle_interval_ms: 250,
            reveal_delay_ms: 900,
            shake_duration_ms: 420,
            messages: MessagePools::default(),
            expressions: vec![
                "assets/expression_01.png".to_string(),
                "assets/expression_02.png".to_string(),
                "assets/expression_03.png".to_string(),
            ],
        }
    }
}

impl Default for MessagePools {
    fn default() -> Self {
        let owned = |msgs: &[&str]| msgs.iter().map(|m| m.to_string()).collect();
        Self {
            win: owned(&[
                "あなたの勝ち！やったね、モラモラはとこちゃんはちょっとくやしそう。",
                "あなたの勝ち！モラモラはとこちゃんが「まいった〜」と言ってるよ。",
                "あなたの勝ち！あ～あ、モラモラはとこちゃんは不満そうだね。",
            ]),
            lose: owned(&[
                "あなたの負け…。モラモラはとこちゃんがニコニコしています。",
                "あなたの負け…。もう一回挑戦してみる？",
                "あなたの負け…。次は負けないで！",
            ]),
            draw: owned(&[
                "あいこ！もう一度勝負しよう。",
                "あいこ！次こそ決着をつけよう！",
                "あいこ！リトライしてね。",
            ]),
        }
    }
}

impl GameConfig {
    /// Parse a page-supplied JSON blob.
    pub fn from_json(json: &str) -> Result<GameConfig, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A random result message for the given outcome. An emptied-out pool
    /// falls back to a built-in message so the result bar never goes blank.
    pub fn message_for(&self, outcome: Outcome) -> &str {
        let pool = match outcome {
            Outcome::Win => &self.messages.win,
            Outcome::Lose => &self.messages.lose,
            Outcome::Draw => &self.messages.draw,
        };
        match pick(pool) {
            Some(msg) => msg.as_str(),
            None => default_message(outcome),
        }
    }

    /// A random expression image path, `None` when the pool is empty.
    pub fn expression_for(&self) -> Option<&str> {
        pick(&self.expressions).map(String::as_str)
    }
}

fn default_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "あなたの勝ち！やったね、モラモラはちょっとくやしそう。",
        Outcome::Lose => "あなたの負け…。モラモラがニコニコしています。",
        Outcome::Draw => "あいこ！もう一度勝負しよう。",
    }
}
