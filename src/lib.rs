//! Numeric-range regular-expression compiler.
//!
//! Converts an inclusive integer range `[min, max]` into a minimal sequence
//! of regex fragments that together match exactly the decimal strings of the
//! integers in the range, and nothing else.
//!
//! # Architecture
//!
//! The pipeline is:
//!
//! ```text
//! [min, max]  ──split_to_ranges──>  breakpoints  ──range_to_pattern──>  digit patterns
//!                                                                            │
//!                                              merged/quantified  <──merge───┘
//! ```
//!
//! ## Splitting
//!
//! A single fixed-width digit-class pattern such as `2[0-4][0-9]` can only
//! cover a range whose bounds agree digit-by-digit except for a contiguous
//! trailing run of free positions.  [`split_to_ranges`] therefore cuts
//! `[min, max]` at two families of boundaries:
//!
//! * **nines expansion** — `min` with its last `k` digits replaced by 9s,
//!   for growing `k`.  These are the points where `min`'s trailing digits
//!   roll over (9, 99, 199, ... above `min = 123`).
//! * **zeros expansion** — one less than `max + 1` with its last `k` digits
//!   truncated to zero, for growing `k`.  These sit just below each
//!   power-of-ten-aligned block reaching up to `max` (199, 229, ... below
//!   `max = 234`).
//!
//! Both passes run in exact integer arithmetic; a nines expansion that
//! leaves `i64` is reported as [`Error::Overflow`] rather than wrapped.
//!
//! ## Pattern compilation
//!
//! Each sub-range becomes one [`DigitPattern`]: aligned digit pairs of the
//! bounds are emitted as literals (`1` vs `1`), digit classes (`0` vs `5`
//! gives `[0-5]`), or — for a `0` vs `9` pair — counted as a trailing
//! wildcard position.  All wildcard positions collapse into a single
//! `[0-9]` marker plus a repetition count.
//!
//! Consecutive sub-ranges whose base patterns are textually identical are
//! merged: their wildcard counts fold into one `{a,b}` quantifier.  For
//! `[1, 9999]` the widths 2 through 4 all produce `[1-9][0-9]`, so the
//! result is the two fragments `[1-9]` and `[1-9][0-9]{1,3}`.
//!
//! Callers are expected to assemble the final expression themselves,
//! typically by joining the optimised fragments with `|` and anchoring.

use std::fmt;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// An error returned when a range cannot be compiled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// [`compile_range`] requires `0 <= min < max`.
    InvalidRange { min: i64, max: i64 },
    /// A digit-boundary expansion produced a value outside `i64`.
    ///
    /// `n` is the number being expanded and `trailing` the number of
    /// trailing digits that were being replaced with 9s.
    Overflow { n: i64, trailing: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRange { min, max } => {
                write!(f, "invalid range [{min}, {max}]: expected 0 <= min < max")
            }
            Self::Overflow { n, trailing } => {
                write!(
                    f,
                    "replacing the last {trailing} digits of {n} with nines overflows i64"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Digit arithmetic
// ---------------------------------------------------------------------------

/// Every power of ten representable in an `i64` (10^0 through 10^18).
const POW10: [i64; 19] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
];

/// Number of decimal digits of `|n|` (1 for 0).
///
/// Walks the [`POW10`] threshold ladder instead of taking a logarithm, so
/// values sitting exactly on a power of ten are classified exactly.
fn digit_count(n: i64) -> usize {
    let abs = n.unsigned_abs();
    let mut count = 1;
    while count < POW10.len() && abs >= POW10[count] as u64 {
        count += 1;
    }
    count
}

/// Decimal digits of `|n|`, most significant first (`[0]` for 0).
fn digits_of(n: i64) -> Vec<u8> {
    let mut abs = n.unsigned_abs();
    let mut digits = vec![0u8; digit_count(n)];
    for slot in digits.iter_mut().rev() {
        *slot = (abs % 10) as u8;
        abs /= 10;
    }
    digits
}

/// `n` with its last `trailing` decimal digits overwritten by 9s.
///
/// When `trailing` meets or exceeds `n`'s digit count the result is
/// `trailing` digits of all 9s (`10^trailing - 1`).  The rebuilt value is
/// accumulated with checked arithmetic; [`Error::Overflow`] is returned if
/// it does not fit in an `i64`.
fn replace_trailing_nines(n: i64, trailing: usize) -> Result<i64, Error> {
    let digits = digits_of(n);
    let width = digits.len().max(trailing);
    let keep = width - trailing;

    let mut value: i64 = 0;
    for position in 0..width {
        let digit = if position < keep {
            i64::from(digits[position])
        } else {
            9
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit))
            .ok_or(Error::Overflow { n, trailing })?;
    }
    Ok(value)
}

/// `n` with its last `trailing` decimal digits truncated to zero.
///
/// Exact modulo arithmetic only; when `10^trailing` exceeds every `i64`
/// the whole number is truncated and the result is 0.
fn zero_floor(n: i64, trailing: usize) -> i64 {
    match POW10.get(trailing) {
        Some(&p) => n - n % p,
        None => 0,
    }
}

// ---------------------------------------------------------------------------
// Range splitting
// ---------------------------------------------------------------------------

/// The sorted, deduplicated breakpoint sequence for `[min, max]`.
///
/// Consecutive breakpoints (with `min` as the implicit leading bound)
/// delimit sub-ranges whose bounds share a digit width and differ only in
/// positions expressible as a single digit class — the precondition
/// [`range_to_pattern`] relies on.  The sequence always ends at `max`.
fn split_to_ranges(min: i64, max: i64) -> Result<Vec<i64>, Error> {
    let mut stops = vec![max];

    // Nines expansion: points where min's trailing digits roll over.  The
    // stop value grows strictly with `nines`, so the loop exits once it
    // leaves [min, max] (or the expansion overflows).
    let mut nines = 1;
    let mut stop = replace_trailing_nines(min, nines)?;
    while min <= stop && stop <= max {
        stops.push(stop);
        nines += 1;
        stop = replace_trailing_nines(min, nines)?;
    }

    // Zeros expansion: one below each power-of-ten-aligned block above max.
    // max == i64::MAX cannot reach this point: the nines pass above always
    // exits through an overflow error for that max.
    let above = max
        .checked_add(1)
        .ok_or(Error::Overflow { n: max, trailing: 1 })?;
    let mut zeros = 1;
    let mut stop = zero_floor(above, zeros) - 1;
    while min < stop && stop <= max {
        stops.push(stop);
        zeros += 1;
        stop = zero_floor(above, zeros) - 1;
    }

    stops.sort_unstable();
    stops.dedup();
    Ok(stops)
}

// ---------------------------------------------------------------------------
// Pattern compilation
// ---------------------------------------------------------------------------

/// Trailing-wildcard count history for one [`DigitPattern`].
///
/// Only the first sub-range's count and the most recent merge boundary ever
/// matter for quantifier rendering, so the history is a fixed two-slot
/// structure rather than a stack: a later merge overwrites `merged`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct WildcardCounts {
    first: usize,
    merged: Option<usize>,
}

impl WildcardCounts {
    fn new(first: usize) -> Self {
        Self {
            first,
            merged: None,
        }
    }

    /// Record the wildcard count of a sub-range merged into this pattern.
    fn push(&mut self, count: usize) {
        self.merged = Some(count);
    }

    /// Render the repetition suffix for the trailing `[0-9]` marker.
    ///
    /// A lone count of 0 or 1 needs no suffix; a lone larger count renders
    /// as `{first}`; once a merge has happened the suffix is always
    /// `{first,merged}`.
    fn quantifier(self) -> String {
        match self.merged {
            Some(merged) => format!("{{{},{}}}", self.first, merged),
            None if self.first > 1 => format!("{{{}}}", self.first),
            None => String::new(),
        }
    }
}

/// The compiled pattern for one sub-range of the input.
///
/// All integers of [`digits`](Self::digits) decimal digits whose digit
/// string matches [`pattern`](Self::pattern) lie inside the original range,
/// and no other integers of that width do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DigitPattern {
    pattern: String,
    optimised: String,
    digits: usize,
    counts: WildcardCounts,
}

impl DigitPattern {
    /// The base digit-class pattern, e.g. `1[0-4][0-9]`.
    ///
    /// Contains at most one trailing `[0-9]` marker standing for all
    /// wildcard positions; see [`wildcards`](Self::wildcards) for how many.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The base pattern with its rendered quantifier, e.g. `1[0-9]{2}`.
    pub fn optimised(&self) -> &str {
        &self.optimised
    }

    /// Decimal width of the first sub-range folded into this pattern.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Trailing-wildcard counts: the first sub-range's count, plus the most
    /// recently merged sub-range's count if any merge has happened.
    pub fn wildcards(&self) -> (usize, Option<usize>) {
        (self.counts.first, self.counts.merged)
    }

    /// Fold another sub-range with an identical base pattern into this one.
    fn merge(&mut self, other: &DigitPattern) {
        self.counts.push(other.counts.first);
        self.optimised = format!("{}{}", self.pattern, self.counts.quantifier());
    }
}

impl fmt::Display for DigitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.optimised)
    }
}

/// Compile one sub-range into a [`DigitPattern`].
///
/// `start` and `end` must have equal digit width and agree in every
/// position left of the first free position, which [`split_to_ranges`]
/// guarantees for consecutive breakpoints.
fn range_to_pattern(start: i64, end: i64) -> DigitPattern {
    if start == end {
        let literal = start.to_string();
        let digits = literal.len();
        return DigitPattern {
            optimised: literal.clone(),
            pattern: literal,
            digits,
            counts: WildcardCounts::new(0),
        };
    }

    let lo = digits_of(start);
    let hi = digits_of(end);
    debug_assert_eq!(lo.len(), hi.len(), "sub-range bounds must share a width");

    let mut pattern = String::new();
    let mut wildcards = 0;
    for (&l, &h) in lo.iter().zip(&hi) {
        if l == h {
            pattern.push(char::from(b'0' + l));
        } else if (l, h) != (0, 9) {
            pattern.push('[');
            pattern.push(char::from(b'0' + l));
            if h - l > 1 {
                pattern.push('-');
            }
            pattern.push(char::from(b'0' + h));
            pattern.push(']');
        } else {
            // Fully free position; the breakpoint construction puts all of
            // these at the tail of the digit sequence.
            wildcards += 1;
        }
    }
    if wildcards > 0 {
        pattern.push_str("[0-9]");
    }

    let counts = WildcardCounts::new(wildcards);
    let optimised = format!("{pattern}{}", counts.quantifier());
    DigitPattern {
        pattern,
        optimised,
        digits: lo.len(),
        counts,
    }
}

/// Compile `[min, max]` into an ordered sequence of [`DigitPattern`]s.
///
/// Requires `0 <= min < max`.  The returned patterns cover disjoint,
/// ascending sub-ranges whose union is exactly `[min, max]`; joining their
/// [`optimised`](DigitPattern::optimised) forms with `|` (and anchoring)
/// yields a regex matching exactly the decimal strings of the range.
pub fn compile_range(min: i64, max: i64) -> Result<Vec<DigitPattern>, Error> {
    if min < 0 || max <= min {
        return Err(Error::InvalidRange { min, max });
    }

    let stops = split_to_ranges(min, max)?;
    let mut patterns: Vec<DigitPattern> = Vec::new();
    let mut start = min;
    for stop in stops {
        let current = range_to_pattern(start, stop);
        start = stop + 1;
        match patterns.last_mut() {
            Some(previous) if previous.pattern == current.pattern => {
                previous.merge(&current);
            }
            _ => patterns.push(current),
        }
    }
    Ok(patterns)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
