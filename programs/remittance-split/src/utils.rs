use crate::constants::PERCENT_DENOMINATOR;

/// Calculate a bucket's floored share of the total amount
///
/// Equal to `floor(total * percent / 100)` for non-negative totals, but split
/// into quotient and remainder so the full product is never formed.
pub fn calculate_bucket_amount(total: i128, percent: u32) -> i128 {
    let denominator = PERCENT_DENOMINATOR as i128;
    let percent = percent as i128;
    let quotient = total / denominator;
    let remainder = total % denominator;

    quotient * percent + (remainder * percent) / denominator
}

/// Sum all bucket percentages
/// Returns None on overflow
pub fn sum_percentages(percents: &[u32]) -> Option<u32> {
    percents
        .iter()
        .try_fold(0u32, |acc, p| acc.checked_add(*p))
}

/// Floored whole percent that `part` makes of `whole`
///
/// Equal to `floor(part * 100 / whole)`, found without forming `part * 100`:
/// the remainder of `part / whole` reaches `p` percent once it covers the
/// ceiling of `whole * p / 100`.
/// Returns None when `whole` is not positive or the result overflows
pub fn floor_percent(part: i128, whole: i128) -> Option<i128> {
    if whole <= 0 {
        return None;
    }

    let quotient = part.div_euclid(whole);
    let remainder = part.rem_euclid(whole);
    let within = (1..=PERCENT_DENOMINATOR)
        .take_while(|&percent| remainder >= ceil_bucket_amount(whole, percent))
        .count() as i128;

    quotient
        .checked_mul(PERCENT_DENOMINATOR as i128)?
        .checked_add(within)
}

fn ceil_bucket_amount(total: i128, percent: u32) -> i128 {
    let denominator = PERCENT_DENOMINATOR as i128;
    let floor = calculate_bucket_amount(total, percent);
    if (total % denominator) * percent as i128 % denominator == 0 {
        floor
    } else {
        floor + 1
    }
}

/// Absolute difference between two amounts
/// Returns None on overflow
pub fn abs_difference(a: i128, b: i128) -> Option<i128> {
    a.checked_sub(b)?.checked_abs()
}
