//! Sky-condition heuristics used by the scoring engine
//!
//! These are deliberately coarse stand-ins for an ephemeris and a
//! light-pollution atlas.

use chrono::{Datelike, NaiveDate};

/// Synodic month, days
pub const LUNAR_CYCLE_DAYS: f64 = 29.53;

/// Distance (degrees) under which an observer counts as inside a city
const CITY_RADIUS_DEGREES: f64 = 0.5;

/// Floor applied to the distance-decayed pollution of the nearest city
const MIN_DECAYED_POLLUTION: f64 = 3.0;

/// Pollution used when no city is closer than infinity (non-finite input)
const FALLBACK_POLLUTION: f64 = 5.0;

struct ReferenceCity {
    lat: f64,
    lng: f64,
    pollution: f64,
}

const REFERENCE_CITIES: [ReferenceCity; 4] = [
    // New York
    ReferenceCity { lat: 40.7128, lng: -74.006, pollution: 9.0 },
    // Los Angeles
    ReferenceCity { lat: 34.0522, lng: -118.2437, pollution: 8.0 },
    // London
    ReferenceCity { lat: 51.5074, lng: -0.1278, pollution: 8.0 },
    // Tokyo
    ReferenceCity { lat: 35.6762, lng: 139.6503, pollution: 9.0 },
];

/// Moon illumination proxy in [0, 1]: 0 is dark, 1 is bright
pub fn moon_phase(date: NaiveDate) -> f64 {
    // NaiveDate::default() is 1970-01-01
    let days_since_epoch = (date - NaiveDate::default()).num_days() as f64;
    let cycle_position = days_since_epoch % LUNAR_CYCLE_DAYS;
    ((cycle_position / LUNAR_CYCLE_DAYS) * 2.0 * std::f64::consts::PI)
        .sin()
        .abs()
}

/// Light pollution on a 1-10 scale from the nearest reference city
pub fn estimate_light_pollution(lat: f64, lng: f64) -> f64 {
    let mut min_distance = f64::INFINITY;
    let mut pollution = FALLBACK_POLLUTION;

    for city in REFERENCE_CITIES.iter() {
        let distance = ((lat - city.lat).powi(2) + (lng - city.lng).powi(2)).sqrt();
        if distance < min_distance {
            min_distance = distance;
            pollution = if distance < CITY_RADIUS_DEGREES {
                city.pollution
            } else {
                MIN_DECAYED_POLLUTION.max(city.pollution - distance * 2.0)
            };
        }
    }

    pollution.clamp(1.0, 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

/// Meteorological season at `date` for the hemisphere of `latitude`
pub fn season(date: NaiveDate, latitude: f64) -> Season {
    let northern = match date.month() {
        12 | 1 | 2 => Season::Winter,
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        _ => Season::Fall,
    };

    if latitude > 0.0 {
        northern
    } else {
        match northern {
            Season::Winter => Season::Summer,
            Season::Spring => Season::Fall,
            Season::Summer => Season::Winter,
            Season::Fall => Season::Spring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_moon_phase_at_epoch_is_dark() {
        assert_eq!(moon_phase(date(1970, 1, 1)), 0.0);
    }

    #[test]
    fn test_moon_phase_bounds() {
        let mut day = date(2024, 1, 1);
        for _ in 0..60 {
            let phase = moon_phase(day);
            assert!((0.0..=1.0).contains(&phase));
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_light_pollution_inside_city() {
        assert_eq!(estimate_light_pollution(40.7128, -74.006), 9.0);
        assert_eq!(estimate_light_pollution(51.5, -0.1), 8.0);
    }

    #[test]
    fn test_light_pollution_decays_to_floor() {
        // Nearest is New York, about 4.4 degrees away
        assert_eq!(estimate_light_pollution(45.0, -75.0), 3.0);
        // Just outside the city radius: 9 - 2 * 1.0
        assert!((estimate_light_pollution(41.7128, -74.006) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_light_pollution_non_finite_input() {
        assert_eq!(estimate_light_pollution(f64::NAN, 0.0), 5.0);
        assert_eq!(estimate_light_pollution(f64::INFINITY, 0.0), 5.0);
    }

    #[test]
    fn test_season_by_hemisphere() {
        assert_eq!(season(date(2024, 1, 15), 45.0), Season::Winter);
        assert_eq!(season(date(2024, 7, 15), 45.0), Season::Summer);
        assert_eq!(season(date(2024, 7, 15), -30.0), Season::Winter);
        assert_eq!(season(date(2024, 12, 1), 0.0), Season::Summer);
        assert_eq!(season(date(2024, 10, 1), -10.0), Season::Spring);
    }
}
