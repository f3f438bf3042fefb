// YouTube Jam
// Paste YouTube links, queue them, play them one after another.
//
// - youtube: turning pasted text into video ids, and ids into embed links
// - player:  the playback queue and the submit flow around it
// - ui:      the terminal front-end
// - config / logging: the ambient plumbing used by the binary

pub mod config;
pub mod logging;
pub mod player;
pub mod ui;
pub mod youtube;
