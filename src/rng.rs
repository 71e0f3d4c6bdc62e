//! Park–Miller "minimal standard" pseudo-random stream.
//!
//! Every synthetic number on the dashboard comes out of this stream, so the
//! multiplier, modulus and output normalisation must not change.

const MULTIPLIER: i128 = 16_807;
const MODULUS: i128 = 2_147_483_647;

#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: i128,
}

impl SeededRandom {
    pub fn new(seed: i64) -> Self {
        Self {
            state: i128::from(seed),
        }
    }

    /// Stream for a user's metrics snapshot.
    pub fn for_user(user_id: i64) -> Self {
        Self {
            state: i128::from(user_id) * 137 + 42,
        }
    }

    /// Advances the stream and returns a value in `[0, 1)` for in-range seeds.
    pub fn next_f64(&mut self) -> f64 {
        // `%` truncates toward zero, so negative seeds stay negative.
        self.state = (self.state * MULTIPLIER) % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// `floor(next() * range) + offset`.
    pub fn draw(&mut self, range: i64, offset: i64) -> i64 {
        (self.next_f64() * range as f64).floor() as i64 + offset
    }
}

/// Formats `value` with exactly one decimal digit.
///
/// Exact binary ties (`x.x5` values that are representable, i.e. quarters)
/// round away from zero; every other value rounds to the nearest digit.
pub fn format_one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters.abs() < 1e15 && (quarters as i64) % 2 != 0 {
        let tenths = (value * 10.0).round();
        return format!("{:.1}", tenths / 10.0);
    }
    format!("{:.1}", value)
}
