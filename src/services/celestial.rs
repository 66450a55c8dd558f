//! Upcoming celestial events near an observer
//!
//! Events come from an [`EventSource`]. The bundled [`SyntheticEventSource`]
//! draws a plausible month of events at random and always includes a meteor
//! shower peak and a bright ISS pass, so the dashboard never shows an empty
//! sky.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use crate::models::celestial::{CelestialEvent, EventType, SkyPosition};
use crate::utils::errors::Result;

const HORIZON_DAYS: i64 = 30;
const DAILY_EVENT_PROBABILITY: f64 = 0.3;
const ECLIPSE_PROBABILITY: f64 = 0.1;
const ID_SUFFIX_LEN: usize = 9;

const METEOR_SHOWERS: [&str; 6] = [
    "Perseids",
    "Geminids",
    "Leonids",
    "Quadrantids",
    "Lyrids",
    "Eta Aquariids",
];

const PLANET_PAIRS: [(&str, &str); 4] = [
    ("Venus", "Jupiter"),
    ("Mars", "Saturn"),
    ("Venus", "Mars"),
    ("Jupiter", "Saturn"),
];

/// Supplier of celestial events for a location
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Events over the coming weeks, sorted by date
    async fn events_near(&self, lat: f64, lng: f64) -> Result<Vec<CelestialEvent>>;
}

/// Randomly generated events, optionally pinned to a clock and seed
#[derive(Debug, Clone, Default)]
pub struct SyntheticEventSource {
    now: Option<DateTime<Utc>>,
    seed: Option<u64>,
}

impl SyntheticEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate relative to a fixed instant instead of the wall clock
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Make the generated month reproducible
    pub fn seeded(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn generate(&self) -> Vec<CelestialEvent> {
        let now = self.now.unwrap_or_else(Utc::now);
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut events = Vec::new();
        for offset in 0..HORIZON_DAYS {
            if !rng.gen_bool(DAILY_EVENT_PROBABILITY) {
                continue;
            }
            let Some(&event_type) = EventType::ALL.choose(&mut rng) else {
                continue;
            };
            if let Some(event) = random_event(&mut rng, event_type, now + Duration::days(offset)) {
                events.push(event);
            }
        }

        events.extend(guaranteed_events(now.date_naive()));
        events.sort_by_key(|event| event.date);
        events
    }
}

#[async_trait]
impl EventSource for SyntheticEventSource {
    async fn events_near(&self, _lat: f64, _lng: f64) -> Result<Vec<CelestialEvent>> {
        Ok(self.generate())
    }
}

/// The first ISS pass in a date-sorted event list
pub fn next_iss_pass(events: &[CelestialEvent]) -> Option<&CelestialEvent> {
    events.iter().find(|e| e.event_type == EventType::IssPass)
}

fn random_suffix(rng: &mut impl Rng) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..ID_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// `HH:MM` with hours past midnight wrapped onto the next day's clock
fn clock_time(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour % 24, minute)
}

fn random_event(rng: &mut impl Rng, event_type: EventType, at: DateTime<Utc>) -> Option<CelestialEvent> {
    let id = format!("{}_{}_{}", event_type, at.timestamp_millis(), random_suffix(rng));
    let date = at.date_naive();

    let event = match event_type {
        EventType::MeteorShower => {
            let shower = METEOR_SHOWERS.choose(rng)?;
            CelestialEvent {
                id,
                name: format!("{} Meteor Shower", shower),
                event_type,
                date,
                time: clock_time(rng.gen_range(22..26), rng.gen_range(0..60)),
                duration: "2-4 hours".to_string(),
                description: format!(
                    "The {} meteor shower peaks tonight, offering spectacular shooting stars across the night sky. \
                     Best viewing is typically after midnight when the radiant is highest.",
                    shower
                ),
                coordinates: Some(SkyPosition {
                    altitude: rng.gen_range(45.0..75.0),
                    azimuth: rng.gen_range(0.0..360.0),
                }),
            }
        }
        EventType::IssPass => CelestialEvent {
            id,
            name: "International Space Station Pass".to_string(),
            event_type,
            date,
            time: clock_time(rng.gen_range(18..22), rng.gen_range(0..60)),
            duration: "3-5 minutes".to_string(),
            description: "The International Space Station will be visible as a bright, fast-moving star crossing the sky. \
                          It appears brighter than most stars and moves steadily across the heavens."
                .to_string(),
            coordinates: Some(SkyPosition {
                altitude: rng.gen_range(20.0..70.0),
                azimuth: rng.gen_range(0.0..360.0),
            }),
        },
        EventType::PlanetConjunction => {
            let (first, second) = PLANET_PAIRS.choose(rng)?;
            CelestialEvent {
                id,
                name: format!("{} and {} Conjunction", first, second),
                event_type,
                date,
                time: clock_time(rng.gen_range(19..22), rng.gen_range(0..60)),
                duration: "1-2 hours".to_string(),
                description: format!(
                    "{} and {} will appear very close together in the sky tonight, creating a beautiful celestial alignment. \
                     Use binoculars or a telescope for the best view.",
                    first, second
                ),
                coordinates: Some(SkyPosition {
                    altitude: rng.gen_range(30.0..70.0),
                    azimuth: rng.gen_range(180.0..300.0),
                }),
            }
        }
        EventType::Eclipse => {
            if !rng.gen_bool(ECLIPSE_PROBABILITY) {
                return None;
            }
            if rng.gen_bool(0.5) {
                CelestialEvent {
                    id,
                    name: "Lunar Eclipse".to_string(),
                    event_type,
                    date,
                    time: "21:30".to_string(),
                    duration: "2-3 hours".to_string(),
                    description: "A lunar eclipse will be visible from your location. \
                                  The moon will take on a reddish hue during totality."
                        .to_string(),
                    coordinates: Some(SkyPosition { altitude: 45.0, azimuth: 180.0 }),
                }
            } else {
                CelestialEvent {
                    id,
                    name: "Solar Eclipse (Partial)".to_string(),
                    event_type,
                    date,
                    time: "14:20".to_string(),
                    duration: "1-2 hours".to_string(),
                    description: "A solar eclipse (partial) will be visible from your location. \
                                  Remember to use proper eclipse glasses for safe viewing."
                        .to_string(),
                    coordinates: Some(SkyPosition { altitude: 60.0, azimuth: 200.0 }),
                }
            }
        }
    };

    Some(event)
}

fn guaranteed_events(today: NaiveDate) -> [CelestialEvent; 2] {
    [
        CelestialEvent {
            id: "guaranteed_perseid".to_string(),
            name: "Perseid Meteor Shower Peak".to_string(),
            event_type: EventType::MeteorShower,
            date: today + Duration::days(3),
            time: "23:30".to_string(),
            duration: "3-4 hours".to_string(),
            description: "The famous Perseid meteor shower reaches its peak tonight! This is one of the most reliable \
                          and spectacular meteor showers of the year, producing up to 60 meteors per hour under dark skies."
                .to_string(),
            coordinates: Some(SkyPosition { altitude: 60.0, azimuth: 45.0 }),
        },
        CelestialEvent {
            id: "guaranteed_iss".to_string(),
            name: "ISS Bright Pass".to_string(),
            event_type: EventType::IssPass,
            date: today + Duration::days(1),
            time: "19:45".to_string(),
            duration: "4 minutes".to_string(),
            description: "A bright pass of the International Space Station! The ISS will be easily visible as it crosses \
                          from southwest to northeast, reaching a maximum altitude of 70 degrees."
                .to_string(),
            coordinates: Some(SkyPosition { altitude: 70.0, azimuth: 225.0 }),
        },
    ]
}
