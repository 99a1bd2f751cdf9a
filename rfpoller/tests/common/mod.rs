// Shared helpers for the poller integration tests.
#![allow(dead_code)]

pub mod fixtures;

pub use rfpoller::test_support::{
    instant_config, mock_with_devices, poller_with_devices, step_until,
};
