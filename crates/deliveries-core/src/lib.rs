pub mod delivery;
pub mod error;
pub mod validate;

pub use delivery::{Delivery, DeliveryInput, NewDelivery, SaveDelivery};
pub use error::ValidationError;
