pub mod db;
pub mod errors;
pub mod todo;

#[cfg(test)]
mod tests;
