// The submit flow around the queue:
// text field -> resolver -> queue, plus the message shown when that fails.

use tracing::warn;

use crate::player::queue::Queue;
use crate::youtube::resolver::{resolve, ResolveError, VideoId};

// Owns the queue together with the text the user is typing.
//
// On a successful submit the video is appended, the input is cleared and
// any previous error goes away. On failure the input is left as typed so it
// can be corrected, and the error is kept until the next submit.
#[derive(Debug, Default)]
pub struct Jukebox {
    queue: Queue,
    input: String,
    error: Option<ResolveError>,
}

impl Jukebox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn queue_mut(&mut self) -> &mut Queue {
        &mut self.queue
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.input.push_str(text);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    // The rejection from the last submit, if it failed.
    pub fn error(&self) -> Option<ResolveError> {
        self.error
    }

    // Resolves the current input and queues the result.
    pub fn submit(&mut self) -> Result<VideoId, ResolveError> {
        match resolve(&self.input) {
            Ok(id) => {
                self.queue.append(id.clone());
                self.input.clear();
                self.error = None;
                Ok(id)
            }
            Err(e) => {
                warn!(input = %self.input, error = %e, "submission rejected");
                self.error = Some(e);
                Err(e)
            }
        }
    }

    // Replaces the input with `raw` and submits it.
    pub fn submit_text(&mut self, raw: &str) -> Result<VideoId, ResolveError> {
        self.input.clear();
        self.input.push_str(raw);
        self.submit()
    }
}
