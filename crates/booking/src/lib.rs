//! # Booking model
//!
//! Shared reservation types for the Tablebook workspace. Records have the same
//! shape whether they come from the remote booking service or from the local
//! fallback store, so rendering and policy code never branch on origin.
//!
//! ```rust
//! use booking::{LocationContext, Reservation, ReservationRequest, ReservationStatus};
//!
//! let request = ReservationRequest {
//!     location_id: "loc-1".to_string(),
//!     table_number: "5".to_string(),
//!     date: "2024-12-30".to_string(),
//!     guests_number: "4".to_string(),
//!     time_from: "7:00 p.m.".to_string(),
//!     time_to: "8:30 p.m.".to_string(),
//! };
//!
//! let reservation = Reservation::from_request(
//!     "local_1_abc".to_string(),
//!     &request,
//!     &LocationContext::default(),
//! );
//! assert_eq!(reservation.time_slot, "7:00 p.m. - 8:30 p.m.");
//! assert_eq!(reservation.status, ReservationStatus::Reserved);
//! assert!(reservation.is_local());
//! ```

pub mod request;
pub mod reservation;
pub mod status;

pub use request::{LocationContext, ReservationActionResult, ReservationRequest, ReservationUpdate};
pub use reservation::{format_display_date, join_time_slot, Reservation, LOCAL_ID_PREFIX, SLOT_SEPARATOR};
pub use status::ReservationStatus;
