pub mod seat;
pub mod store;
pub mod view;

pub use seat::seat_slot;
pub use store::{GameStore, IntentError, Notice, Phase};
pub use view::{project, SeatView, TableView};
