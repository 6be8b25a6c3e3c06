// tests/property/main.rs

mod reduction;
