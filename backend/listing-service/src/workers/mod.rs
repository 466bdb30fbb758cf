pub mod delivery;

pub use delivery::{run, DeliverySink, LogDelivery};
