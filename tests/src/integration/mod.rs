//! # Cross-Component Integration Tests

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod durability;
#[cfg(test)]
mod scenarios;
