pub mod csv_export;
pub mod csv_import;
pub mod store;

pub use crate::domain::model::{Applicant, ApplicationRequest, SeedVariety};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
