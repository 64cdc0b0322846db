#![allow(dead_code)]

pub mod registry;

pub use registry::{MockRegistry, TestRegistries, create_test_repository};
