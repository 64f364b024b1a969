//! Amount fixtures, in smallest units (7 decimals per token)

use remittance_split::constants::UNITS_PER_TOKEN;

/// Converts whole tokens to smallest units
pub fn tokens(whole: i128) -> i128 {
    whole * UNITS_PER_TOKEN
}

/// 5,000 tokens, 10,000, 7,500, 15,000, 3,000
pub fn multiple_remittances() -> Vec<i128> {
    [5_000, 10_000, 7_500, 15_000, 3_000]
        .into_iter()
        .map(tokens)
        .collect()
}

/// 100 remittances starting at 5,000 tokens, stepping by 100 tokens
pub fn high_volume() -> Vec<i128> {
    (0..100i128).map(|i| tokens(5_000) + i * tokens(100)).collect()
}

/// 10,000 tokens, 20,000, 15,000
pub fn percentage_maintenance() -> Vec<i128> {
    [10_000, 20_000, 15_000].into_iter().map(tokens).collect()
}

/// Amounts that stress floor division
pub fn rounding_edge_cases() -> Vec<(i128, &'static str)> {
    vec![
        (1, "Minimum amount"),
        (7, "Prime number"),
        (99, "Just under 100"),
        (tokens(1_000), "1,000 tokens"),
        (tokens(3_333), "Doesn't divide evenly"),
        (99_999_999_999, "Large odd number"),
    ]
}
