use super::Envelope;

/// A window is silent when its loudness is at or below the threshold
pub fn is_silent(db: f32, threshold_db: f32) -> bool {
    db <= threshold_db
}

/// Label every envelope point; `true` means silent
pub fn classify(envelope: &Envelope, threshold_db: f32) -> Vec<bool> {
    envelope
        .points()
        .iter()
        .map(|point| is_silent(point.db, threshold_db))
        .collect()
}
