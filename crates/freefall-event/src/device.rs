//! Bridge from the kernel free-fall device to the event channel.
//!
//! The accelerometer interrupt is serviced by the kernel, which exposes its
//! own counter through a single-open character device (`/dev/freefall`).
//! Each read blocks until at least one event has occurred and returns the
//! count as one byte. [`DeviceEventSource`] forwards those counts to an
//! [`EventProducer`] from a dedicated thread.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use tracing::{debug, error, trace};

use crate::channel::EventProducer;
use crate::error::ChannelError;

/// Default path of the kernel free-fall device.
pub const DEFAULT_EVENT_SOURCE: &str = "/dev/freefall";

/// An opened free-fall device, not yet forwarding.
#[derive(Debug)]
pub struct DeviceEventSource {
    path: PathBuf,
    file: File,
}

impl DeviceEventSource {
    /// Open the device read-only.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::Busy`] if another process holds the device.
    /// - [`ChannelError::SourceUnavailable`] for any other open failure.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ChannelError> {
        let path = path.as_ref().to_path_buf();
        match File::open(&path) {
            Ok(file) => {
                debug!(path = %path.display(), "Opened event source");
                Ok(Self { path, file })
            }
            Err(err) if err.kind() == ErrorKind::ResourceBusy => Err(ChannelError::Busy),
            Err(err) => Err(ChannelError::source_unavailable(path, err)),
        }
    }

    /// The device path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start forwarding device counts to `producer`.
    ///
    /// The thread runs until the device reports end-of-file or an error, at
    /// which point it calls [`EventProducer::fail`] and exits.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the thread could not be created.
    pub fn spawn(self, producer: EventProducer) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name(String::from("freefall-source"))
            .spawn(move || self.forward(&producer))
    }

    fn forward(mut self, producer: &EventProducer) {
        let mut buf = [0u8; 1];
        loop {
            match self.file.read(&mut buf) {
                Ok(0) => {
                    error!(path = %self.path.display(), "Event source closed");
                    producer.fail(format!("{} reached end of file", self.path.display()));
                    return;
                }
                Ok(_) => {
                    let [count] = buf;
                    trace!(count, "Device reported events");
                    for _ in 0..count {
                        producer.on_hardware_event();
                    }
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => {
                    error!(path = %self.path.display(), error = %err, "Event source read failed");
                    producer.fail(format!("{} read failed: {err}", self.path.display()));
                    return;
                }
            }
        }
    }
}
