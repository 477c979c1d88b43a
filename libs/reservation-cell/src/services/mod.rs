pub mod booking;
pub mod cancellation;
pub mod query;

pub use booking::BookingService;
pub use cancellation::CancellationService;
pub use query::ReservationQueryService;
