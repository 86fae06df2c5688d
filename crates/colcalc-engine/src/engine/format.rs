/// Format a number for display.
///
/// Whole numbers print without decimals, fractions keep up to four decimals
/// with trailing zeros trimmed, and very large or very small magnitudes switch
/// to scientific notation.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e10 || n.abs() < 1e-4 {
        format!("{:.3e}", n)
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        let fixed = format!("{:.4}", n);
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
