pub mod facility;
pub mod reservation;
pub mod user;
