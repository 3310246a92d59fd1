pub mod checksums;
pub mod mutate;
