use crate::constants::Degree;

/// Split a sexagesimal field `"A B C"` into its three numeric components.
fn sexagesimal_parts(field: &str) -> Option<(&str, f64, f64)> {
    let parts: Vec<&str> = field.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let m: f64 = parts[1].parse().ok()?;
    let s: f64 = parts[2].parse().ok()?;
    if !(0.0..60.0).contains(&m) || !(0.0..60.0).contains(&s) {
        return None;
    }
    Some((parts[0], m, s))
}

/// Parse a right ascension string to degrees
///
/// Arguments
/// ---------
/// * `ra`: a string representing the right ascension in the format `HH MM SS.SS`
///
/// Returns
/// -------
/// * The right ascension in degrees, `None` if the input format is invalid.
pub fn parse_ra_to_deg(ra: &str) -> Option<Degree> {
    let (h, m, s) = sexagesimal_parts(ra)?;
    let h: f64 = h.parse().ok()?;
    if !(0.0..24.0).contains(&h) {
        return None;
    }
    Some((h + m / 60.0 + s / 3600.0) * 15.0)
}

/// Parse a declination string to degrees
///
/// Arguments
/// ---------
/// * `dec`: a string representing the declination in the format `±DD MM SS.SS`
///
/// Returns
/// -------
/// * The declination in degrees, `None` if the input format is invalid.
///
/// The sign is read from the degree field so that `-00 30 00` stays negative.
pub fn parse_dec_to_deg(dec: &str) -> Option<Degree> {
    let (d, m, s) = sexagesimal_parts(dec)?;
    let sign = if d.starts_with('-') { -1.0 } else { 1.0 };
    let d: f64 = d.trim_start_matches(&['-', '+'][..]).parse().ok()?;

    let dec_deg = sign * (d + m / 60.0 + s / 3600.0);
    (-90.0..=90.0).contains(&dec_deg).then_some(dec_deg)
}
