//! Synthetic problem generation.
//!
//! Draws locations, open tasks, and staff with daily shifts from the
//! ranges in a [`ServiceConfig`]. Every draw goes through the caller's
//! RNG, so a seeded RNG reproduces the same problem (including IDs).
//!
//! # Distributions
//!
//! | Quantity | Distribution |
//! |----------|--------------|
//! | Location / staff count | Uniform over `random_range` |
//! | Tasks per day | Uniform over `new_task.random_range`, total capped |
//! | Coordinates | Uniform over the valid latitude / longitude ranges |
//! | Task start minute | Uniform over `slot_start_range` |
//! | Daily shift | Uniform choice from `shift_choice` |

use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::debug;
use uuid::Builder;

use crate::config::{ConfigError, ServiceConfig};
use crate::models::{Location, Slot, Staff, Task, LATITUDE_RANGE, LONGITUDE_RANGE};

/// Upper bound on the number of tasks generated across the horizon.
pub const MAX_TOTAL_TASKS: usize = 10_000;

/// Generation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("cannot generate {0}: the location pool is empty")]
    NoLocations(&'static str),
}

/// Generates synthetic scheduling problems from a configuration.
#[derive(Debug, Clone, Copy)]
pub struct DataGenerator<'a> {
    config: &'a ServiceConfig,
}

impl<'a> DataGenerator<'a> {
    /// Creates a generator, validating the configuration first.
    ///
    /// Every range drawn from must be ordered, so an unvalidated config is
    /// rejected here rather than at the first draw.
    pub fn new(config: &'a ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generates the location pool.
    pub fn generate_locations<R: Rng>(&self, rng: &mut R) -> Vec<Location> {
        let [min, max] = self.config.location.random_range;
        let count = rng.random_range(min..=max);

        (0..count)
            .map(|_| {
                Location::new(
                    random_id(rng),
                    rng.random_range(LATITUDE_RANGE.0..=LATITUDE_RANGE.1),
                    rng.random_range(LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1),
                )
            })
            .collect()
    }

    /// Generates `count` open tasks on one day at random locations.
    pub fn generate_new_tasks_daily<R: Rng>(
        &self,
        date: NaiveDate,
        locations: &[Location],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Task>, GenerateError> {
        if count > 0 && locations.is_empty() {
            return Err(GenerateError::NoLocations("tasks"));
        }
        let [start_min, start_max] = self.config.new_task.slot_start_range;
        let duration = self.config.new_task.slot_duration;

        let tasks = (0..count)
            .map(|_| {
                let slot_start = rng.random_range(start_min..=start_max);
                let slot = Slot::new(date, slot_start, slot_start + duration);
                let location = pick(locations, rng);
                Task::new(random_id(rng), location.location_id.clone(), slot)
            })
            .collect();
        Ok(tasks)
    }

    /// Generates open tasks for every day of the horizon.
    ///
    /// Stops adding tasks once [`MAX_TOTAL_TASKS`] is reached.
    pub fn generate_new_tasks<R: Rng>(
        &self,
        locations: &[Location],
        rng: &mut R,
    ) -> Result<Vec<Task>, GenerateError> {
        let [min, max] = self.config.new_task.random_range;
        let mut tasks = Vec::new();

        for date in self.config.dates() {
            let drawn = rng.random_range(min..=max) as usize;
            let per_day = drawn.min(MAX_TOTAL_TASKS - tasks.len());
            tasks.extend(self.generate_new_tasks_daily(date, locations, per_day, rng)?);
        }

        debug!(count = tasks.len(), "generated tasks");
        Ok(tasks)
    }

    /// Generates one shift per day of the horizon.
    pub fn generate_shift_slots<R: Rng>(&self, rng: &mut R) -> Vec<Slot> {
        let choices = &self.config.staffs.shift_choice;
        self.config
            .dates()
            .filter_map(|date| {
                if choices.is_empty() {
                    return None;
                }
                let [start, end] = *pick(choices, rng);
                Some(Slot::new(date, start, end))
            })
            .collect()
    }

    /// Generates the staff pool with random homes and daily shifts.
    pub fn generate_staff<R: Rng>(
        &self,
        locations: &[Location],
        rng: &mut R,
    ) -> Result<Vec<Staff>, GenerateError> {
        let [min, max] = self.config.staffs.random_range;
        let count = rng.random_range(min..=max);
        if count > 0 && locations.is_empty() {
            return Err(GenerateError::NoLocations("staff"));
        }

        let staff: Vec<Staff> = (0..count)
            .map(|_| {
                let id = random_id(rng);
                let home = pick(locations, rng).location_id.clone();
                Staff::new(id, home).with_shifts(self.generate_shift_slots(rng))
            })
            .collect();

        debug!(count = staff.len(), "generated staff");
        Ok(staff)
    }
}

/// A v4 UUID drawn from `rng`.
fn random_id<R: Rng>(rng: &mut R) -> String {
    Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

/// Uniform pick from a non-empty slice.
fn pick<'s, T, R: Rng>(items: &'s [T], rng: &mut R) -> &'s T {
    &items[rng.random_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CONFIG: &str = r#"
start_end_date = ["2023-04-01", "2023-04-30"]

[location]
random_range = [5, 10]

[new_task]
random_range = [50, 100]
slot_start_range = [8, 18]
slot_duration = 2

[staffs]
random_range = [10, 20]
shift_choice = [[8, 12], [13, 17]]
transition_velocity = 10

[current_task]
assign_max_num_tasks = -1
"#;

    fn config() -> ServiceConfig {
        ServiceConfig::from_toml_str(CONFIG).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_generate_locations() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let locations = generator.generate_locations(&mut rng);
        assert!((5..=10).contains(&locations.len()));
        for loc in &locations {
            assert!(loc.has_valid_coordinates());
            assert_eq!(loc.location_id.len(), 36); // hyphenated uuid
        }
    }

    #[test]
    fn test_generate_new_tasks_daily() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let locations = generator.generate_locations(&mut rng);

        let tasks = generator
            .generate_new_tasks_daily(date("2023-04-01"), &locations, 10, &mut rng)
            .unwrap();
        assert_eq!(tasks.len(), 10);
        for task in &tasks {
            assert_eq!(task.slot.start_date, date("2023-04-01"));
            assert_eq!(task.slot.end_date, date("2023-04-01"));
            assert!((8..=18).contains(&task.slot.slot_start));
            assert_eq!(task.slot.slot_end, task.slot.slot_start + 2);
            assert!(task.is_open());
            assert!(task.assigned_staff_id.is_none());
            assert!(locations.iter().any(|l| l.location_id == task.location_id));
        }
    }

    #[test]
    fn test_generate_new_tasks() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let locations = generator.generate_locations(&mut rng);

        let tasks = generator.generate_new_tasks(&locations, &mut rng).unwrap();
        // 30 days, 50..=100 per day
        assert!(tasks.len() >= 50 * 30);
        assert!(tasks.len() <= 100 * 30);
        for task in &tasks {
            assert!(task.slot.start_date >= cfg.start_date());
            assert!(task.slot.start_date <= cfg.end_date());
            assert!(task.is_open());
        }
    }

    #[test]
    fn test_generate_new_tasks_capped() {
        let doc = CONFIG.replace("random_range = [50, 100]", "random_range = [1000, 1000]");
        let cfg = ServiceConfig::from_toml_str(&doc).unwrap();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let locations = generator.generate_locations(&mut rng);

        let tasks = generator.generate_new_tasks(&locations, &mut rng).unwrap();
        assert_eq!(tasks.len(), MAX_TOTAL_TASKS);
    }

    #[test]
    fn test_generate_shift_slots() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let slots = generator.generate_shift_slots(&mut rng);
        assert_eq!(slots.len(), 30);
        for (slot, day) in slots.iter().zip(cfg.dates()) {
            assert_eq!(slot.start_date, day);
            assert!(cfg.staffs.shift_choice.contains(&[slot.slot_start, slot.slot_end]));
        }
    }

    #[test]
    fn test_generate_staff() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let locations = generator.generate_locations(&mut rng);

        let staff = generator.generate_staff(&locations, &mut rng).unwrap();
        assert!((10..=20).contains(&staff.len()));
        for member in &staff {
            assert!(locations.iter().any(|l| l.location_id == member.location_id));
            assert_eq!(member.available_date_shift_slots.len(), 30);
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let locations = generator.generate_locations(&mut rng);
            let staff = generator.generate_staff(&locations, &mut rng).unwrap();
            (locations, staff)
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_unvalidated_config_rejected() {
        let doc = CONFIG.replace("random_range = [5, 10]", "random_range = [10, 5]");
        let cfg: ServiceConfig = toml::from_str(&doc).unwrap();

        assert!(matches!(
            DataGenerator::new(&cfg),
            Err(ConfigError::InvalidRange {
                field: "location.random_range",
                min: 10,
                max: 5
            })
        ));
    }

    #[test]
    fn test_empty_location_pool() {
        let cfg = config();
        let generator = DataGenerator::new(&cfg).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(
            generator.generate_new_tasks_daily(date("2023-04-01"), &[], 3, &mut rng),
            Err(GenerateError::NoLocations("tasks"))
        );
        assert!(generator
            .generate_new_tasks_daily(date("2023-04-01"), &[], 0, &mut rng)
            .unwrap()
            .is_empty());
        assert_eq!(
            generator.generate_staff(&[], &mut rng),
            Err(GenerateError::NoLocations("staff"))
        );
    }
}
