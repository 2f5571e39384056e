//! Small crate-wide convenience macros.

/// Log to the browser console in debug builds only.
///
/// Outside `wasm32` the arguments are still formatted (so they type-check and
/// count as used) but nothing is printed; this keeps the animation core
/// callable from native unit tests where `web_sys::console` is unavailable.
///
/// ```rust,ignore
/// debug_log!("ambient canvas mounted ({} particles)", count);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format!($($arg)*);
        }
    }};
}

/// Warn in the browser console regardless of build profile.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format!($($arg)*);
        }
    }};
}

/// Acquire a **mutable** borrow from a `RefCell` (or `Rc<RefCell>`).
/// If another mutable borrow is still active the call panics – the standard
/// panic message emitted by `RefCell::borrow_mut()` is preserved.
///
/// ```rust,ignore
/// use std::cell::RefCell;
/// let cell = RefCell::new(1);
/// {
///     let mut n = mut_borrow!(cell);
///     *n += 1;
/// }
/// assert_eq!(*cell.borrow(), 2);
/// ```
#[macro_export]
macro_rules! mut_borrow {
    ($cell:expr) => {
        $cell.borrow_mut()
    };
}
