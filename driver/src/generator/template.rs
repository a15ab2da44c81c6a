/// Log line carrying a distance reading, in the sensor's own format.
pub fn distance_line(sensor: &str, reading_mm: i32) -> String {
    format!("{} Distance:{}mm", sensor, reading_mm)
}

/// Housekeeping line without a distance marker.
pub fn status_line(sensor: &str, sequence: usize) -> String {
    format!("{} status: ping {} ok", sensor, sequence)
}

/// Distance line whose payload was corrupted in transit.
pub fn garbled_line(sensor: &str) -> String {
    format!("{} Distance:ERRmm", sensor)
}
