//! Built-in learning catalogue and its idempotent seeding

use sqlx::types::Json;
use crate::database::LearningRepository;
use crate::models::learning::{LessonRow, Module};
use crate::utils::errors::StarCastError;

pub struct SeedLesson {
    pub id: &'static str,
    pub title: &'static str,
    pub link: &'static str,
    pub question: &'static str,
    pub answers: [&'static str; 4],
    pub correct_answer: &'static str,
}

pub struct SeedModule {
    pub id: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub lessons: [SeedLesson; 5],
}

pub static CATALOGUE: [SeedModule; 5] = [
    SeedModule {
        id: 1,
        title: "The Solar System",
        description: "Learn about our cosmic neighborhood",
        lessons: [
            SeedLesson {
                id: "1.1",
                title: "The Sun",
                link: "https://spaceplace.nasa.gov/",
                question: "What powers the Sun's energy?",
                answers: ["Combustion", "Solar panels", "Nuclear fusion", "Static electricity"],
                correct_answer: "Nuclear fusion",
            },
            SeedLesson {
                id: "1.2",
                title: "Inner Planets",
                link: "https://solarsystem.nasa.gov/planets/overview/",
                question: "Which of the following is an inner planet?",
                answers: ["Neptune", "Mars", "Jupiter", "Uranus"],
                correct_answer: "Mars",
            },
            SeedLesson {
                id: "1.3",
                title: "Outer Planets",
                link: "https://solarsystem.nasa.gov/planets/jupiter/overview/",
                question: "Which planet is known for its large red storm?",
                answers: ["Saturn", "Uranus", "Jupiter", "Neptune"],
                correct_answer: "Jupiter",
            },
            SeedLesson {
                id: "1.4",
                title: "Dwarf Planets",
                link: "https://solarsystem.nasa.gov/planets/dwarf-planets/overview/",
                question: "What is Pluto classified as?",
                answers: ["Moon", "Asteroid", "Dwarf planet", "Comet"],
                correct_answer: "Dwarf planet",
            },
            SeedLesson {
                id: "1.5",
                title: "Asteroids & Comets",
                link: "https://spaceplace.nasa.gov/asteroid-or-comet/en/",
                question: "What's the main difference between asteroids and comets?",
                answers: [
                    "Comets have tails",
                    "Asteroids are made of ice",
                    "Comets orbit planets",
                    "Asteroids are alive",
                ],
                correct_answer: "Comets have tails",
            },
        ],
    },
    SeedModule {
        id: 2,
        title: "Stars & Galaxies",
        description: "Explore the wonders beyond our solar system",
        lessons: [
            SeedLesson {
                id: "2.1",
                title: "Star Formation",
                link: "https://www.esa.int/Science_Exploration/Space_Science/Stars_and_galaxies",
                question: "Where are stars born?",
                answers: ["Black holes", "Planetary rings", "Nebulae", "Comets"],
                correct_answer: "Nebulae",
            },
            SeedLesson {
                id: "2.2",
                title: "Star Life Cycle",
                link: "https://spaceplace.nasa.gov/life-of-a-star/en/",
                question: "What does a medium-sized star like the Sun become at the end of its life?",
                answers: ["Supernova", "Neutron star", "White dwarf", "Pulsar"],
                correct_answer: "White dwarf",
            },
            SeedLesson {
                id: "2.3",
                title: "Types of Stars",
                link: "https://imagine.gsfc.nasa.gov/science/objects/stars1.html",
                question: "What color are the hottest stars?",
                answers: ["Red", "Blue", "Yellow", "White"],
                correct_answer: "Blue",
            },
            SeedLesson {
                id: "2.4",
                title: "Galaxies",
                link: "https://hubblesite.org/contents/articles/galaxies",
                question: "What type of galaxy is the Milky Way?",
                answers: ["Elliptical", "Irregular", "Spiral", "Ring"],
                correct_answer: "Spiral",
            },
            SeedLesson {
                id: "2.5",
                title: "Star Clusters",
                link: "https://www.spacetelescope.org/science/star_clusters/",
                question: "What are star clusters?",
                answers: [
                    "Groups of galaxies",
                    "Groups of moons",
                    "Groups of stars bound by gravity",
                    "Floating black holes",
                ],
                correct_answer: "Groups of stars bound by gravity",
            },
        ],
    },
    SeedModule {
        id: 3,
        title: "Telescopes & Observation",
        description: "Learn about the tools we use to study space",
        lessons: [
            SeedLesson {
                id: "3.1",
                title: "History of Telescopes",
                link: "https://spaceplace.nasa.gov/telescopes/en/",
                question: "Who is credited with improving the first astronomical telescope?",
                answers: ["Galileo", "Einstein", "Hubble", "Copernicus"],
                correct_answer: "Galileo",
            },
            SeedLesson {
                id: "3.2",
                title: "Types of Telescopes",
                link: "https://science.nasa.gov/toolkit/telescopes/",
                question: "What kind of telescope uses mirrors to collect light?",
                answers: ["Radio", "Refracting", "Reflecting", "Particle"],
                correct_answer: "Reflecting",
            },
            SeedLesson {
                id: "3.3",
                title: "How Telescopes Work",
                link: "https://www.exploratorium.edu/light/color/telescopes.html",
                question: "What do telescopes primarily collect to see distant objects?",
                answers: ["Air", "Heat", "Light", "Sound"],
                correct_answer: "Light",
            },
            SeedLesson {
                id: "3.4",
                title: "Famous Telescopes",
                link: "https://webb.nasa.gov/content/about/index.html",
                question: "What is the main mission of the James Webb Space Telescope?",
                answers: [
                    "Observe black holes",
                    "Find alien life",
                    "Look deeper into the early universe",
                    "Study Earth's atmosphere",
                ],
                correct_answer: "Look deeper into the early universe",
            },
            SeedLesson {
                id: "3.5",
                title: "Observing the Night Sky",
                link: "https://skyandtelescope.org/astronomy-resources/stargazing-basics/",
                question: "What is best for seeing faint deep-sky objects?",
                answers: ["City park", "Full moon night", "Dark rural area", "Indoor planetarium"],
                correct_answer: "Dark rural area",
            },
        ],
    },
    SeedModule {
        id: 4,
        title: "Space Missions",
        description: "Discover humanity's journey to the stars",
        lessons: [
            SeedLesson {
                id: "4.1",
                title: "Early Missions",
                link: "https://www.nasa.gov/specials/apollo50th/",
                question: "What was the first mission to land humans on the Moon?",
                answers: ["Apollo 10", "Apollo 11", "Apollo 13", "Gemini 5"],
                correct_answer: "Apollo 11",
            },
            SeedLesson {
                id: "4.2",
                title: "Mars Rovers",
                link: "https://mars.nasa.gov/mars2020/",
                question: "What is the name of NASA's 2020 Mars rover?",
                answers: ["Spirit", "Opportunity", "Perseverance", "Curiosity"],
                correct_answer: "Perseverance",
            },
            SeedLesson {
                id: "4.3",
                title: "Space Telescopes",
                link: "https://www.nasa.gov/mission_pages/hubble/main/index.html",
                question: "What does the Hubble Space Telescope primarily observe?",
                answers: ["Weather", "Earthquakes", "Deep space objects", "Ocean currents"],
                correct_answer: "Deep space objects",
            },
            SeedLesson {
                id: "4.4",
                title: "The ISS",
                link: "https://www.nasa.gov/mission_pages/station/main/index.html",
                question: "What is the International Space Station used for?",
                answers: [
                    "Mining asteroids",
                    "Interstellar travel",
                    "Scientific research in space",
                    "Planet defense",
                ],
                correct_answer: "Scientific research in space",
            },
            SeedLesson {
                id: "4.5",
                title: "Artemis Program",
                link: "https://www.nasa.gov/artemisprogram/",
                question: "What is the goal of the Artemis missions?",
                answers: [
                    "Build a space hotel",
                    "Colonize Mars",
                    "Return humans to the Moon",
                    "Explore the asteroid belt",
                ],
                correct_answer: "Return humans to the Moon",
            },
        ],
    },
    SeedModule {
        id: 5,
        title: "Exoplanets & Life in Space",
        description: "Explore worlds beyond our solar system",
        lessons: [
            SeedLesson {
                id: "5.1",
                title: "What are Exoplanets?",
                link: "https://exoplanets.nasa.gov/what-is-an-exoplanet/overview/",
                question: "What is an exoplanet?",
                answers: [
                    "A type of moon",
                    "A planet outside our solar system",
                    "A comet fragment",
                    "A star",
                ],
                correct_answer: "A planet outside our solar system",
            },
            SeedLesson {
                id: "5.2",
                title: "Methods of Detection",
                link: "https://exoplanets.nasa.gov/alien-worlds/ways-to-find-a-planet/",
                question: "What method detects exoplanets by observing a dip in starlight?",
                answers: ["Reflection method", "Transit method", "Gravity lensing", "Radar sweep"],
                correct_answer: "Transit method",
            },
            SeedLesson {
                id: "5.3",
                title: "Habitable Zones",
                link: "https://astrobiology.nasa.gov/ask-an-astrobiologist/question/?id=34044",
                question: "What is the habitable zone?",
                answers: [
                    "Area for space stations",
                    "Zone for alien life",
                    "Region where liquid water might exist",
                    "A ring around a planet",
                ],
                correct_answer: "Region where liquid water might exist",
            },
            SeedLesson {
                id: "5.4",
                title: "Possibility of Life",
                link: "https://astrobiology.nasa.gov/",
                question: "Which condition is most important for life as we know it?",
                answers: ["Gold color", "Fast orbit", "Liquid water", "Magnetic field"],
                correct_answer: "Liquid water",
            },
            SeedLesson {
                id: "5.5",
                title: "Famous Exoplanets",
                link: "https://exoplanets.nasa.gov/exoplanet-catalog/",
                question: "What is Kepler-22b known for?",
                answers: [
                    "First moon found",
                    "Gas giant near Earth",
                    "First potentially habitable exoplanet discovered",
                    "Largest star",
                ],
                correct_answer: "First potentially habitable exoplanet discovered",
            },
        ],
    },
];

impl SeedModule {
    pub fn to_module(&self) -> Module {
        Module {
            id: self.id,
            title: self.title.to_string(),
            description: self.description.to_string(),
        }
    }
}

impl SeedLesson {
    pub fn to_row(&self, module_id: i32) -> LessonRow {
        LessonRow {
            id: self.id.to_string(),
            module_id,
            title: self.title.to_string(),
            link: self.link.to_string(),
            question: self.question.to_string(),
            answers: Json(self.answers.iter().map(|a| a.to_string()).collect()),
            correct_answer: self.correct_answer.to_string(),
        }
    }
}

/// Number of lessons in the built-in catalogue
pub fn lesson_count() -> usize {
    CATALOGUE.iter().map(|m| m.lessons.len()).sum()
}

/// Write the built-in catalogue, updating rows that already exist
pub async fn seed_learning_content(repo: &LearningRepository) -> Result<(), StarCastError> {
    for module in CATALOGUE.iter() {
        repo.upsert_module(&module.to_module()).await?;
        for lesson in module.lessons.iter() {
            repo.upsert_lesson(&lesson.to_row(module.id)).await?;
        }
    }

    tracing::info!(
        modules = CATALOGUE.len(),
        lessons = lesson_count(),
        "Learning content seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_shape() {
        assert_eq!(CATALOGUE.len(), 5);
        assert_eq!(lesson_count(), 25);
    }

    #[test]
    fn test_correct_answer_is_offered() {
        for module in CATALOGUE.iter() {
            for lesson in module.lessons.iter() {
                assert!(
                    lesson.answers.contains(&lesson.correct_answer),
                    "lesson {} does not offer its answer",
                    lesson.id
                );
            }
        }
    }

    #[test]
    fn test_lesson_ids_unique_and_prefixed_by_module() {
        let mut seen = HashSet::new();
        for module in CATALOGUE.iter() {
            for lesson in module.lessons.iter() {
                assert!(seen.insert(lesson.id));
                assert!(lesson.id.starts_with(&format!("{}.", module.id)));
            }
        }
    }
}
