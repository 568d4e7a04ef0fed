pub mod actors;
pub mod fallback;
pub mod health;
pub mod movies;

mod request;

#[cfg(test)]
mod tests;
