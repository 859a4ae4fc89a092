/// Renders `value` in base 10 with `delim` between every group of three digits,
/// counting from the right. Negative values keep a leading `-`.
pub fn group_digits(value: i64, delim: char) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }

    let lead = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(delim);
        }
        out.push(c);
    }
    out
}
