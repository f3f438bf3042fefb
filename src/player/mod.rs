pub mod jukebox;
pub mod queue;
