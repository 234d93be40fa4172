//! Trial generator.
//!
//! One trial starts from the initial wealth and applies the betting
//! recurrence once per coin flip: the wager `wealth * fraction` is set
//! aside, multiplied by the win or lose rate, and added back to whatever
//! was kept. Wealth is never clamped here; it may grow without bound or
//! collapse to exactly zero.

use rand::Rng;

use crate::config::PayoffRates;

/// Success probability of every coin flip.
pub const FAIR_COIN: f64 = 0.5;

/// Apply the betting recurrence to a known sequence of flips.
///
/// `true` is a winning flip. The arithmetic order is fixed (subtract the
/// wager, scale it, add it back) so results follow IEEE-754 `f64` rounding
/// exactly as written.
pub fn final_wealth<I>(fraction: f64, flips: I, rates: PayoffRates, initial: f64) -> f64
where
    I: IntoIterator<Item = bool>,
{
    let mut wealth = initial;
    for won in flips {
        let mut bet = wealth * fraction;
        wealth -= bet;
        bet *= if won { rates.win } else { rates.lose };
        wealth += bet;
    }
    wealth
}

/// Run one trial of `num_flips` fair coin flips drawn from `rng`.
pub fn run_trial<R: Rng + ?Sized>(
    fraction: f64,
    num_flips: usize,
    rates: PayoffRates,
    initial: f64,
    rng: &mut R,
) -> f64 {
    let flips = (0..num_flips).map(|_| rng.gen_bool(FAIR_COIN));
    final_wealth(fraction, flips, rates, initial)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
