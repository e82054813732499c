use chrono::{Days, Months, NaiveDate};

/// Computes a warranty expiration date from a purchase date string and a
/// free-text warranty period such as "1 year" or "24 months".
///
/// The period is lower-cased, the first integer substring is the magnitude,
/// and the unit is matched by substring in priority order: "year", then
/// "month", then "day". Anything unparseable yields `None` rather than an
/// error: a missing integer, an unknown unit, or a purchase date not in
/// `YYYY-MM-DD` form.
///
/// Month arithmetic clamps to the end of the target month, so
/// 2024-01-31 + "1 month" is 2024-02-29.
pub fn derive_expiration(purchase_date: &str, warranty_period: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(purchase_date.trim(), "%Y-%m-%d").ok()?;
    let period = warranty_period.to_lowercase();
    let amount = first_integer(&period)?;
    if period.contains("year") {
        date.checked_add_months(Months::new(amount.checked_mul(12)?))
    } else if period.contains("month") {
        date.checked_add_months(Months::new(amount))
    } else if period.contains("day") {
        date.checked_add_days(Days::new(u64::from(amount)))
    } else {
        None
    }
}

fn first_integer(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: &str = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}
