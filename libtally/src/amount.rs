use crate::error::ErrorKind;

/// Parse a transaction amount, accepting `,` as well as `.` as decimal point.
pub fn parse_amount(token: &str) -> Result<f64, ErrorKind> {
    let nominal = token
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ErrorKind::InvalidAmount)?;

    if !nominal.is_finite() {
        return Err(ErrorKind::InvalidAmount);
    }

    Ok(nominal)
}

/// Two decimals, or `-` for anything that rounds to zero.
pub fn balance_to_string(v: f64) -> String {
    let s = format!("{:.2}", v);
    if s == "0.00" || s == "-0.00" {
        return "-".to_string();
    }
    s
}

/// Two decimals with an explicit sign; a zero is always `+0.00`.
pub fn delta_to_string(v: f64) -> String {
    let s = format!("{:+.2}", v);
    if s == "-0.00" {
        return "+0.00".to_string();
    }
    s
}

pub fn amount_to_string(v: f64) -> String {
    format!("{:.2}", v)
}
