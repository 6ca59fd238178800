pub mod day;
pub mod facility;
pub mod id;
pub mod reservation;
pub mod role;
pub mod user;
