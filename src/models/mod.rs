//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod celestial;
pub mod weather;
pub mod saved_event;
pub mod learning;
pub mod feeds;

// Re-export commonly used models
pub use user::{User, UserIdentity};
pub use celestial::{CelestialEvent, EventType, SkyPosition};
pub use weather::{Location, WeatherData};
pub use saved_event::{NewSavedEvent, RemoveEventPayload, SaveEventPayload, SavedEvent};
pub use learning::{
    CompleteLessonRequest, Lesson, LessonRow, Module, ModuleWithLessons, ProgressRow,
    UserProgress,
};
pub use feeds::{
    Astronaut, EarthEvent, EarthEventPage, EarthEventSummary, GeoPoint, IssPosition,
    IssSnapshot, NewsArticle, NewsPage,
};
