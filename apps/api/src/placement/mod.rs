// Placement records: coordinator company postings and student profiles.

pub mod handlers;
pub mod repository;
pub mod validation;
