pub mod application;
pub mod domain;
pub mod entity;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;
