//! Spectrobars library - audio-reactive 3D bar visualizer

pub mod audio;
pub mod bars;
pub mod beat;
pub mod camera;
pub mod cli;
pub mod clock;
pub mod controls;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod params;
pub mod rendering;
pub mod spectrum;
pub mod visualizer;
