//! Adaptive Cruise Control Simulation Library
//!
//! A fixed-timestep ACC demonstrator that runs headless. Presentation
//! collaborators (weather, assistant) live in `services`.

pub mod services;
pub mod simulation;
