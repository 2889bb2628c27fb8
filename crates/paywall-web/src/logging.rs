//! Console logging
//!
//! `tracing` events formatted by `tracing-subscriber` and written to the
//! browser console, one `console.log` per event.

use std::io;

use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::JsValue;

/// Buffers one formatted event and flushes it to the console on drop
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            web_sys::console::log_1(&JsValue::from_str(line));
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

/// Install the console subscriber; filter from `PAYWALL_LOG` at build time
pub fn init() {
    install(|message| web_sys::console::warn_1(&JsValue::from_str(message)));
}

/// Try to install the subscriber, handing any failure to `warn`
fn install(warn: impl FnOnce(&str)) {
    let installed = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            option_env!("PAYWALL_LOG").unwrap_or("info"),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(Console),
        )
        .try_init();

    if let Err(e) = installed {
        warn(&format!("tracing subscriber not installed: {e}"));
    }
}
