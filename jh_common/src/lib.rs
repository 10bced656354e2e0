mod price;
mod rating;
mod secret;

pub use price::Price;
pub use rating::Rating;
pub use secret::Secret;
