use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Simulation time in seconds. Every timer in the core counts in these.
pub type Seconds = Fixed64;

/// Steps are the atomic unit of simulation bookkeeping.
pub type Steps = u64;

/// Convert an f64 to Fixed64. Use only for initialization, never in sim loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Like [`f64_to_fixed64`], but `None` for NaN, infinities and values
/// outside the Q32.32 range instead of panicking. For untrusted input.
#[inline]
pub fn checked_f64_to_fixed64(v: f64) -> Option<Fixed64> {
    Fixed64::checked_from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Whole seconds, as used by configuration defaults.
#[inline]
pub fn secs(whole: i32) -> Seconds {
    Seconds::from_num(whole)
}

/// Subtract `dt` from `remaining`, clamping at zero.
#[inline]
pub fn countdown(remaining: Seconds, dt: Seconds) -> Seconds {
    if dt >= remaining {
        Seconds::ZERO
    } else {
        remaining - dt
    }
}

/// Render a duration as `mm:ss`, truncating partial seconds.
///
/// Negative durations render as `00:00`. Minutes are not capped at 59.
pub fn format_countdown(remaining: Seconds) -> String {
    let whole: i64 = if remaining <= Seconds::ZERO {
        0
    } else {
        remaining.floor().to_num()
    };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}
