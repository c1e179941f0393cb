//! Thread-local read buffers for reader-driven updates.

use std::cell::RefCell;

/// Size of a pooled read buffer.
pub const READ_BUFFER_LEN: usize = 64 * 1024; // 64 KiB

/// Maximum number of read buffers to keep per thread.
pub const MAX_POOLED_READ_BUFFERS: usize = 4;

/// A reusable, fully initialized read buffer of [`READ_BUFFER_LEN`] bytes.
///
/// Dropping the buffer returns it to the current thread's pool.
pub struct ReadBuffer {
    data: Vec<u8>,
}

impl ReadBuffer {
    /// Takes a buffer from the thread-local pool or creates a new one.
    pub fn take() -> Self {
        let data = READ_BUFFER_POOL
            .try_with(|pool| pool.borrow_mut().pop())
            .ok()
            .flatten()
            .unwrap_or_else(|| vec![0u8; READ_BUFFER_LEN]);
        Self { data }
    }

    /// Returns the whole buffer as a writable slice.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for ReadBuffer {
    fn drop(&mut self) {
        if self.data.len() != READ_BUFFER_LEN {
            return;
        }
        let data = std::mem::take(&mut self.data);
        // The pool is gone during thread teardown; the buffer is simply freed.
        let _ = READ_BUFFER_POOL.try_with(|pool| {
            let mut pool = pool.borrow_mut();
            if pool.len() < MAX_POOLED_READ_BUFFERS {
                pool.push(data);
            }
        });
    }
}

thread_local! {
    static READ_BUFFER_POOL: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}
