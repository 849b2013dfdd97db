//! Checked-in-debug cell access.
//!
//! The occupancy map indexes its cell vector in the inner loops of collision
//! probing. Callers check bounds before computing an index; debug builds keep
//! the slice bounds check as a tripwire, release builds skip it.
//!
//! ```rust
//! use thingworld_engine::fast;
//!
//! let mut cells = vec![0u8; 4];
//! fast!(cells, [2] = 7);
//! assert_eq!(*fast!(cells, [2]), 7);
//! ```

/// Index a slice/vec at an index the caller has already validated.
///
/// - `fast!(slice, [index])` reads (yields a reference)
/// - `fast!(slice, [index] = value)` writes
#[macro_export]
macro_rules! fast {
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            // SAFETY: callers bounds-check the index against the map size.
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            // SAFETY: callers bounds-check the index against the map size.
            unsafe {
                *$slice.get_unchecked_mut($index) = $val;
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn reads_and_writes() {
        let mut cells = vec![None, None, Some(3u32)];
        assert_eq!(*fast!(cells, [2]), Some(3));
        fast!(cells, [0] = Some(9));
        assert_eq!(cells[0], Some(9));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn out_of_range_panics_in_debug() {
        let cells = vec![0u8; 3];
        let _ = *fast!(cells, [10]);
    }
}
