// ==========================================
// QUEUE MANAGEMENT MODULE
// ==========================================
// This module owns the playback queue:
// - The ordered list of queued video ids (duplicates allowed)
// - A cursor pointing at the video that is currently playing
//
// Unlike a "pop as you play" queue, nothing is ever consumed by playback.
// Moving between videos only moves the cursor; the list shrinks only when
// the user explicitly removes an entry.
//
// Invariant kept by every method:
// - non-empty queue: 0 <= cursor < len
// - empty queue:     cursor == 0

use serde::Serialize;
use tracing::{debug, info};

use crate::youtube::resolver::VideoId;

// ==========================================
// QUEUE SNAPSHOT
// ==========================================
// A copy of the queue state handed to whoever renders it.
//
// Fields:
// - videos:      every queued id, in play order
// - cursor:      index of the current entry (0 when empty)
// - now_playing: the id at the cursor, None when the queue is empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueSnapshot {
    pub videos: Vec<VideoId>,
    pub cursor: usize,
    pub now_playing: Option<VideoId>,
}

// ==========================================
// QUEUE STRUCT
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct Queue {
    videos: Vec<VideoId>,
    cursor: usize,
}

impl Queue {
    // Creates an empty queue with the cursor at 0.
    pub fn new() -> Self {
        Queue {
            videos: Vec::new(),
            cursor: 0,
        }
    }

    // ==========================================
    // ADDING VIDEOS: append()
    // ==========================================
    // Adds a video to the end of the queue.
    //
    // The cursor does not move: a newly added video does not start
    // playing on its own, even when it is the first one.
    //
    // Example:
    // - Queue: [A, B], cursor 1
    // - append(C)
    // - Queue: [A, B, C], cursor 1
    pub fn append(&mut self, id: VideoId) {
        info!(video_id = %id, position = self.videos.len(), "video queued");
        self.videos.push(id);
    }

    // ==========================================
    // QUEUE INSPECTION: select_current()
    // ==========================================
    // The video at the cursor, or None when nothing is queued.
    pub fn select_current(&self) -> Option<&VideoId> {
        self.videos.get(self.cursor)
    }

    // ==========================================
    // NAVIGATION: advance()
    // ==========================================
    // Moves the cursor one step forward.
    //
    // At the last entry this does nothing (it does not wrap and it is not
    // an error). Returns true when the cursor actually moved.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.videos.len() {
            self.cursor += 1;
            debug!(cursor = self.cursor, "advanced");
            true
        } else {
            false
        }
    }

    // ==========================================
    // NAVIGATION: retreat()
    // ==========================================
    // Moves the cursor one step back; at the first entry this does nothing.
    pub fn retreat(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            debug!(cursor = self.cursor, "retreated");
            true
        } else {
            false
        }
    }

    // ==========================================
    // NAVIGATION: jump_to()
    // ==========================================
    // Makes the entry at `index` the current one.
    //
    // The index is trusted: callers only offer rows that exist. An index
    // past the end makes select_current() return None until the cursor
    // is moved again.
    pub fn jump_to(&mut self, index: usize) {
        debug!(from = self.cursor, to = index, "jump");
        self.cursor = index;
    }

    // ==========================================
    // QUEUE MANAGEMENT: remove_at()
    // ==========================================
    // Removes the entry at `index` and returns it. Later entries shift
    // down by one.
    //
    // Cursor rebasing, applied after the removal:
    // 1. index <= cursor and cursor > 0 -> cursor - 1
    // 2. otherwise, queue now empty     -> cursor = 0
    // 3. otherwise                      -> unchanged
    //
    // Examples:
    // - [A, B, C] cursor 2, remove_at(0) -> [B, C] cursor 1 (still C)
    // - [A, B, C] cursor 1, remove_at(1) -> [A, C] cursor 0 (A)
    // - [A, B, C] cursor 0, remove_at(0) -> [B, C] cursor 0 (B slid in)
    // - [A]       cursor 0, remove_at(0) -> []     cursor 0
    //
    // Returns None (and changes nothing) for an index past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<VideoId> {
        if index >= self.videos.len() {
            return None;
        }

        let removed = self.videos.remove(index);

        if index <= self.cursor && self.cursor > 0 {
            self.cursor -= 1;
        } else if self.videos.is_empty() {
            self.cursor = 0;
        }

        info!(
            video_id = %removed,
            index,
            cursor = self.cursor,
            remaining = self.videos.len(),
            "video removed"
        );
        Some(removed)
    }

    // ==========================================
    // QUEUE INSPECTION: snapshot()
    // ==========================================
    // Clones the current state for the rendering layer.
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            videos: self.videos.clone(),
            cursor: self.cursor,
            now_playing: self.select_current().cloned(),
        }
    }

    // Read-only view of every queued id, in order.
    pub fn ids(&self) -> &[VideoId] {
        &self.videos
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    // Whether advance() would move the cursor.
    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.videos.len()
    }

    // Whether retreat() would move the cursor.
    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }
}
