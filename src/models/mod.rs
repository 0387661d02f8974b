pub mod destination;
pub mod photo;
pub mod principal;
pub mod trip;
