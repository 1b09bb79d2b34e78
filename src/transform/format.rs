// Numbers leave the core as strings. Values use the shortest representation
// that parses back to the same f64; quantile and bucket keys use fixed-point
// notation with six decimals so that field names stay stable.

pub fn format_value(v: f64) -> String {
    match special(v) {
        Some(s) => s.to_string(),
        None => v.to_string(),
    }
}

pub fn format_count(c: u64) -> String {
    c.to_string()
}

pub fn format_fixed(v: f64) -> String {
    match special(v) {
        Some(s) => s.to_string(),
        None => format!("{:.6}", v),
    }
}

fn special(v: f64) -> Option<&'static str> {
    if v.is_nan() {
        Some("NaN")
    } else if v == f64::INFINITY {
        Some("+Inf")
    } else if v == f64::NEG_INFINITY {
        Some("-Inf")
    } else {
        None
    }
}
