//! Protected disk identity and control path resolution.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ActuatorError, ActuatorResult};

/// Default protected device.
pub const DEFAULT_DEVICE: &str = "/dev/sda";

/// Default sysfs mount point.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys";

const DEV_PREFIX: &str = "/dev/";

/// A block device and its head-unload control attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedDisk {
    device: String,
    control_path: PathBuf,
}

impl ProtectedDisk {
    /// Resolve `/dev/<name>` to `/sys/block/<name>/device/unload_heads`.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::InvalidDevice`] if the path is not a direct
    /// child of `/dev/`.
    pub fn from_device_path(device: &str) -> ActuatorResult<Self> {
        Self::with_sysfs_root(device, DEFAULT_SYSFS_ROOT)
    }

    /// Resolve against an alternate sysfs root.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::InvalidDevice`] if the path is not a direct
    /// child of `/dev/`.
    pub fn with_sysfs_root(device: &str, sysfs_root: impl AsRef<Path>) -> ActuatorResult<Self> {
        let name = device
            .strip_prefix(DEV_PREFIX)
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .ok_or_else(|| ActuatorError::invalid_device(device))?;

        let control_path = sysfs_root
            .as_ref()
            .join("block")
            .join(name)
            .join("device")
            .join("unload_heads");

        Ok(Self {
            device: device.to_owned(),
            control_path,
        })
    }

    /// The device path as given.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// The head-unload control attribute.
    #[must_use]
    pub fn control_path(&self) -> &Path {
        &self.control_path
    }

    /// Check that the control path exists and can be opened.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::ControlPathMissing`] if it cannot be opened.
    pub fn probe(&self) -> ActuatorResult<()> {
        File::open(&self.control_path)
            .map_err(|err| ActuatorError::control_path_missing(&self.control_path, err))?;
        debug!(
            device = %self.device,
            control_path = %self.control_path.display(),
            "Control path present"
        );
        Ok(())
    }
}
