//! Drawing numbers rounds the way the game show does.

use numbers_core::Error;
use rand::seq::SliceRandom;
use rand::Rng;

/// The four large numbers, one card each
pub const LARGE_NUMBERS: [u64; 4] = [25, 50, 75, 100];

/// Small numbers come from two cards of each value
pub const SMALL_NUMBERS: [u64; 20] = [
    1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10,
];

/// Targets are drawn uniformly from this range
pub const TARGET_RANGE: std::ops::RangeInclusive<u64> = 101..=999;

/// A drawn target and its source numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub target: u64,
    pub sources: Vec<u64>,
}

/// Draws `large` large numbers, fills up to `count` with small numbers, and picks a target
pub fn draw_round<R>(rng: &mut R, large: usize, count: usize) -> numbers_core::Result<Round>
where
    R: Rng + ?Sized,
{
    if large > LARGE_NUMBERS.len() {
        return Err(Error::InvalidInput(format!(
            "at most {} large numbers can be drawn, got {}",
            LARGE_NUMBERS.len(),
            large
        )));
    }

    if count == 0 || count < large {
        return Err(Error::InvalidInput(format!(
            "cannot draw {} numbers with {} large",
            count, large
        )));
    }

    let small = count - large;
    if small > SMALL_NUMBERS.len() {
        return Err(Error::InvalidInput(format!(
            "at most {} small numbers can be drawn, got {}",
            SMALL_NUMBERS.len(),
            small
        )));
    }

    let mut large_deck = LARGE_NUMBERS.to_vec();
    large_deck.shuffle(rng);
    let mut small_deck = SMALL_NUMBERS.to_vec();
    small_deck.shuffle(rng);

    let mut sources = Vec::with_capacity(count);
    sources.extend_from_slice(&large_deck[..large]);
    sources.extend_from_slice(&small_deck[..small]);

    Ok(Round {
        target: rng.random_range(TARGET_RANGE),
        sources,
    })
}
