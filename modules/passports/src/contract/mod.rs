pub mod client;
pub mod error;
pub mod model;

pub use client::PassportsApi;
pub use error::PassportsError;
pub use model::{
    JobCategory, NewJobCategory, NewPassport, Passport, PassportPage, PassportPatch,
    PassportQuery, PassportStats, PassportStatus, StatusCounts,
};
