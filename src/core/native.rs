/// Bridge to `libsentiments`, a native-image shared library
///
/// The library exports the isolate management functions of the native-image
/// C API plus `correlate_tweets_with_market`, which takes the isolate as its
/// first argument.

use std::ptr;

use libc::{c_char, c_double, c_int, c_void};
use log::{debug, warn};

use crate::core::bridge::{Correlator, Runtime};
use crate::core::loader::Corpus;
use crate::error::{Result, SentimentError};

#[repr(C)]
pub struct GraalIsolate {
    _private: [u8; 0],
}

#[repr(C)]
pub struct GraalIsolateThread {
    _private: [u8; 0],
}

#[link(name = "sentiments")]
extern "C" {
    fn graal_create_isolate(
        params: *mut c_void,
        isolate: *mut *mut GraalIsolate,
        thread: *mut *mut GraalIsolateThread,
    ) -> c_int;

    fn graal_tear_down_isolate(thread: *mut GraalIsolateThread) -> c_int;

    fn correlate_tweets_with_market(
        isolate: *mut GraalIsolate,
        prices: *const c_char,
        tweets: *const c_char,
    ) -> c_double;
}

/// Runtime that creates a fresh isolate of the native library
#[derive(Debug, Clone, Default)]
pub struct NativeRuntime;

impl Runtime for NativeRuntime {
    type Session = NativeSession;

    fn start(&self) -> Result<Self::Session> {
        let mut isolate: *mut GraalIsolate = ptr::null_mut();
        let mut thread: *mut GraalIsolateThread = ptr::null_mut();

        let status = unsafe { graal_create_isolate(ptr::null_mut(), &mut isolate, &mut thread) };
        if status != 0 || isolate.is_null() {
            return Err(SentimentError::RuntimeInit(format!(
                "graal_create_isolate returned {}",
                status
            )));
        }

        debug!("Created native isolate");
        Ok(NativeSession { isolate, thread })
    }
}

/// A live isolate; torn down when dropped
#[derive(Debug)]
pub struct NativeSession {
    isolate: *mut GraalIsolate,
    thread: *mut GraalIsolateThread,
}

impl Correlator for NativeSession {
    fn correlate(&mut self, prices: &Corpus, tweets: &Corpus) -> f64 {
        // Both buffers are NUL-terminated and outlive the call
        unsafe { correlate_tweets_with_market(self.isolate, prices.as_c_ptr(), tweets.as_c_ptr()) }
    }
}

impl Drop for NativeSession {
    fn drop(&mut self) {
        let status = unsafe { graal_tear_down_isolate(self.thread) };
        if status != 0 {
            warn!("graal_tear_down_isolate returned {}", status);
        }
    }
}
