#![allow(dead_code)]

pub mod editor;
pub mod mock_buffer;
pub mod mock_engine;
pub mod recording_sink;
