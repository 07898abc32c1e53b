//! Frame synchronization over the received sample stream.
//!
//! The receiver has no notion of byte boundaries until it has seen the end
//! of the sync byte. [`find_sync`] slides an 8-bit window over the samples,
//! complementing each one back to its transmitted line level, and stops at
//! the first window equal to [`SYNC_VECTOR`].

use crate::consts::SYNC_VECTOR;

/// Finds where framed data starts in a received sample stream.
///
/// Returns the index just past the first complete [`SYNC_VECTOR`], i.e. the
/// first sample of the `LEN` byte, or `None` if the pattern never occurs.
/// Only the first match counts.
pub fn find_sync(samples: &[bool]) -> Option<usize> {
    let mut window: u8 = 0;
    for (i, &sample) in samples.iter().enumerate() {
        // samples are the complement of the line level
        window = (window << 1) | u8::from(!sample);
        if window == SYNC_VECTOR {
            return Some(i + 1);
        }
    }
    None
}
