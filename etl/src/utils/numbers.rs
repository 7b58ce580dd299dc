/// Parses an integer count, tolerating a float rendering such as `3.0`.
pub fn parse_count(value: &str) -> Result<i64, String> {
    let value = value.trim();
    if let Ok(count) = value.parse::<i64>() {
        return Ok(count);
    }
    match value.parse::<f64>() {
        Ok(float) if float.is_finite() && float.fract() == 0.0 => Ok(float as i64),
        Ok(_) => Err("not a whole number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

pub fn parse_decimal(value: &str) -> Result<f64, String> {
    let value = value.trim();
    match value.parse::<f64>() {
        Ok(float) if float.is_finite() => Ok(float),
        Ok(_) => Err("not a finite number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
