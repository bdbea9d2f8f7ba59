//! Console logging. Writes to the browser console on wasm32; on other targets
//! the arguments are type-checked and discarded.

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        ::web_sys::console::log_1(&::std::format!($($t)*).into())
    };
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        ::web_sys::console::warn_1(&::std::format!($($t)*).into())
    };
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {{
        let _ = ::std::format_args!($($t)*);
    }};
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {{
        let _ = ::std::format_args!($($t)*);
    }};
}
