pub mod availability;
pub mod booking;

#[cfg(test)]
mod tests;
