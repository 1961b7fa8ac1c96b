pub mod company;
pub mod student;
