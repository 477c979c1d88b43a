pub mod directory;
pub mod vacation;

pub use directory::DirectoryService;
pub use vacation::VacationService;
