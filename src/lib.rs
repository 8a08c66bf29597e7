//! True North - Strategy Alignment & Continuous-Improvement Engine
//!
//! This crate implements the structured core of a Hoshin Kanri strategy
//! application: the objective/metric alignment matrix, the initiative
//! dependency graph, and the PDCA improvement-cycle state machine.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
