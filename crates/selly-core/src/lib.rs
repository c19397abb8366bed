pub mod analytics;
pub mod clock;
pub mod config;
pub mod error;
pub mod garden;
pub mod generator;
pub mod growth;
pub mod io;
pub mod letter;
pub mod paths;
pub mod plant;
pub mod profile;
pub mod reply;
pub mod scheduler;
pub mod store;
pub mod types;

pub use error::{GardenError, Result};
pub use garden::{Garden, LetterDraft, Snapshot};
