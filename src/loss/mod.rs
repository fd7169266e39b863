pub mod bce;
pub mod huber;
pub mod loss_type;
pub mod mae;
pub mod mse;

pub use loss_type::LossType;
