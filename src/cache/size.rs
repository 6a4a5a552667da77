//! Buffer Size Module
//!
//! Size capability required of values whose byte footprint is summed by
//! `Cache::cache_byte_size`.

use std::rc::Rc;
use std::sync::Arc;

// == Buffer Size ==
/// A value that can report the total size of the buffers it holds, in bytes.
pub trait BufferSize {
    /// Total buffer size in bytes.
    fn total_buffer_size(&self) -> u64;
}

impl BufferSize for [u8] {
    fn total_buffer_size(&self) -> u64 {
        self.len() as u64
    }
}

impl BufferSize for Vec<u8> {
    fn total_buffer_size(&self) -> u64 {
        self.len() as u64
    }
}

impl BufferSize for str {
    fn total_buffer_size(&self) -> u64 {
        self.len() as u64
    }
}

impl BufferSize for String {
    fn total_buffer_size(&self) -> u64 {
        self.len() as u64
    }
}

impl<T: BufferSize + ?Sized> BufferSize for &T {
    fn total_buffer_size(&self) -> u64 {
        (**self).total_buffer_size()
    }
}

impl<T: BufferSize + ?Sized> BufferSize for Box<T> {
    fn total_buffer_size(&self) -> u64 {
        (**self).total_buffer_size()
    }
}

impl<T: BufferSize + ?Sized> BufferSize for Rc<T> {
    fn total_buffer_size(&self) -> u64 {
        (**self).total_buffer_size()
    }
}

impl<T: BufferSize + ?Sized> BufferSize for Arc<T> {
    fn total_buffer_size(&self) -> u64 {
        (**self).total_buffer_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_buffers() {
        assert_eq!(vec![0u8; 512].total_buffer_size(), 512);
        assert_eq!(b"abc"[..].total_buffer_size(), 3);
        assert_eq!(String::from("hello").total_buffer_size(), 5);
        assert_eq!("".total_buffer_size(), 0);
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let shared: Arc<Vec<u8>> = Arc::new(vec![1, 2, 3, 4]);
        assert_eq!(shared.total_buffer_size(), 4);
        assert_eq!(Rc::new(String::from("xy")).total_buffer_size(), 2);

        let boxed: Box<[u8]> = vec![0u8; 16].into_boxed_slice();
        assert_eq!(boxed.total_buffer_size(), 16);
    }
}
