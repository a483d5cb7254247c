pub mod job_categories;
pub mod passports;
