//! Pure janken rules: outcome resolution and randomized hand selection.
//!
//! Nothing in this module touches the DOM or timers. The round driver in
//! [`crate::round`] consumes these functions, which keeps the interesting
//! logic runnable under plain `cargo test` on the host.

/// A playable janken hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Rock,
    Scissors,
    Paper,
}

impl Hand {
    /// All hands, in display order. Selection pool for the NPC shuffle.
    pub const ALL: [Hand; 3] = [Hand::Rock, Hand::Scissors, Hand::Paper];

    /// The hand this hand defeats.
    pub fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Scissors => Hand::Paper,
            Hand::Paper => Hand::Rock,
        }
    }

    /// Stable key used in DOM `data-hand` attributes.
    pub fn as_key(self) -> &'static str {
        match self {
            Hand::Rock => "rock",
            Hand::Scissors => "scissors",
            Hand::Paper => "paper",
        }
    }

    /// Parse a `data-hand` attribute value.
    pub fn from_key(key: &str) -> Option<Hand> {
        match key {
            "rock" => Some(Hand::Rock),
            "scissors" => Some(Hand::Scissors),
            "paper" => Some(Hand::Paper),
            _ => None,
        }
    }
}

/// Result of a round, always from the user's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

impl Outcome {
    /// Stable key used for CSS classes (`is-win` etc.) and message pools.
    pub fn as_key(self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Lose => "lose",
            Outcome::Draw => "draw",
        }
    }
}

/// Determine the outcome of a round from the user's perspective.
///
/// Equal hands draw; otherwise the user wins exactly when the NPC shows the
/// hand the user's hand defeats.
pub fn resolve(user: Hand, npc: Hand) -> Outcome {
    if user == npc {
        Outcome::Draw
    } else if npc == user.beats() {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Pick a uniformly random element, or `None` for an empty slice.
pub fn pick<T>(list: &[T]) -> Option<&T> {
    if list.is_empty() {
        None
    } else {
        list.get(rand_index(list.len()))
    }
}

/// Pick a random element that differs from `prev`, best effort.
///
/// An empty pool returns `prev` unchanged and a single-element pool returns
/// its element even when it equals `prev`; neither can satisfy the
/// "different" constraint. A pool whose entries all equal `prev` likewise
/// returns `prev` rather than spinning. Otherwise retry until the draw
/// differs; each draw repeats `prev` with probability at most 1/len, so the
/// expected number of retries is O(1).
pub fn pick_different<T: Copy + PartialEq>(list: &[T], prev: T) -> T {
    match list {
        [] => prev,
        [only] => *only,
        _ if list.iter().all(|v| *v == prev) => prev,
        _ => {
            for _ in 0..16 {
                if let Some(&candidate) = pick(list) {
                    if candidate != prev {
                        return candidate;
                    }
                }
            }
            // Only reachable when the entropy source is wedged and keeps
            // yielding the same index; fall back to a linear scan.
            list.iter().copied().find(|v| *v != prev).unwrap_or(prev)
        }
    }
}

/// Uniform index into a pool of `len` elements.
///
/// Backed by `getrandom` so the same code path works natively and in the
/// browser. The modulo bias is irrelevant for the tiny pools used here; a
/// failed entropy read falls back to index 0.
fn rand_index(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut buf = [0u8; 8];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    (u64::from_le_bytes(buf) % len as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_forms_a_cycle() {
        assert_eq!(Hand::Rock.beats(), Hand::Scissors);
        assert_eq!(Hand::Scissors.beats(), Hand::Paper);
        assert_eq!(Hand::Paper.beats(), Hand::Rock);
    }

    #[test]
    fn hand_keys_parse_back() {
        for hand in Hand::ALL {
            assert_eq!(Hand::from_key(hand.as_key()), Some(hand));
        }
        assert_eq!(Hand::from_key("lizard"), None);
    }

    #[test]
    fn resolve_is_antisymmetric_for_unequal_hands() {
        for user in Hand::ALL {
            for npc in Hand::ALL {
                if user == npc {
                    continue;
                }
                let forward = resolve(user, npc);
                let backward = resolve(npc, user);
                match forward {
                    Outcome::Win => assert_eq!(backward, Outcome::Lose),
                    Outcome::Lose => assert_eq!(backward, Outcome::Win),
                    Outcome::Draw => panic!("unequal hands must not draw"),
                }
            }
        }
    }
}
