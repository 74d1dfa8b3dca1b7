//! Collaborator implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cubeware-core:
//!
//! - Driver channels (simulated TLC with command latency)
//! - Layer readers (fixed fetch latency)
//! - Layer power outputs (GPIO via embedded-hal)

#![no_std]
#![deny(unsafe_code)]

pub mod power;
pub mod reader;
pub mod tlc;
