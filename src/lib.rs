//! Personal course timetabling.
//!
//! Places a student's subjects into weekly time slots. Subjects whose date
//! ranges overlap are pruned first; a genetic algorithm then assigns the
//! survivors to slots, minimising slot collisions and forbidden-slot
//! placements.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `SlotCatalog`, `ConstraintMap`,
//!   `SoftPreferences`, `ScheduleAssignment`, `ConflictEntry`
//! - **`validation`**: Request subject checks (names, dates, priority range)
//! - **`conflict`**: Date-overlap conflict resolution
//! - **`ga`**: Slot-vector GA (encoding, penalty, population engine)
//! - **`scheduler`**: End-to-end pipeline, decoding and KPIs
//! - **`error`**: Error type and `Result` alias
//!
//! # Example
//!
//! ```
//! use u_timetable::{GaConfig, SubjectInput, TimetableRequest, TimetableScheduler};
//!
//! let request = TimetableRequest::new(vec![
//!     SubjectInput::new("Algorithms", "2024-03-04", "2024-06-21"),
//!     SubjectInput::new("Databases", "2024-07-01", "2024-08-30"),
//! ]);
//!
//! let result = TimetableScheduler::new(GaConfig::default().with_seed(1))
//!     .schedule(&request)
//!     .unwrap();
//! assert_eq!(result.cost, 0);
//! assert_ne!(result.schedule[0].slot, result.schedule[1].slot);
//! ```
//!
//! # Logging
//!
//! Progress and decisions are emitted as `tracing` events. The crate never
//! installs a subscriber.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//!   Machine Learning"

pub mod conflict;
pub mod error;
pub mod ga;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use conflict::{ConflictResolver, Resolution};
pub use error::{Result, TimetableError};
pub use ga::{GaConfig, GaResult, GaRunner};
pub use models::{ConflictEntry, ConstraintMap, ScheduleAssignment, SlotCatalog, SoftPreferences, Subject};
pub use scheduler::{ScheduleKpi, TimetableRequest, TimetableResult, TimetableScheduler};
pub use validation::{SubjectInput, ValidationError, ValidationErrorKind};
