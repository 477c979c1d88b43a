pub mod availability;
pub mod generator;

pub use availability::AvailabilityService;
pub use generator::ScheduleGeneratorService;
