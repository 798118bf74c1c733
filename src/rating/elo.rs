use super::types::RatingValue;

/// Rating gap that corresponds to 10:1 odds
const LOGISTIC_SCALE: f64 = 400.0;

/// Expected score of `own` against `opponent` on the standard Elo logistic curve
pub fn expected_score(opponent: RatingValue, own: RatingValue) -> f64 {
    let exponent = (opponent - own) / LOGISTIC_SCALE;
    1.0 / (1.0 + 10.0_f64.powf(exponent))
}

/// Expected scores for both sides of a pairing, in (home, away) order
pub fn expected_pair(home: RatingValue, away: RatingValue) -> (f64, f64) {
    (expected_score(away, home), expected_score(home, away))
}

/// One Elo step: `current + k * (actual - expected)`
pub fn updated_rating(current: RatingValue, expected: f64, actual: f64, k_factor: f64) -> RatingValue {
    current + k_factor * (actual - expected)
}
