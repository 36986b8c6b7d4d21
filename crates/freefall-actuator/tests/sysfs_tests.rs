//! Actuator tests against a fake sysfs tree.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use freefall_actuator::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn fake_sysfs(root: &Path, name: &str) -> std::io::Result<()> {
    let device_dir = root.join("block").join(name).join("device");
    fs::create_dir_all(&device_dir)?;
    fs::write(device_dir.join("unload_heads"), "0")
}

mod unload_heads {
    use super::*;

    #[test]
    fn test_engage_writes_milliseconds() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        disk.probe()?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());

        assert_eq!(actuator.engage(Duration::from_secs(21))?, Transition::Parked);
        assert_eq!(fs::read_to_string(disk.control_path())?, "21000");
        assert!(actuator.is_engaged());
        assert_eq!(actuator.resource(), "/dev/sda");
        Ok(())
    }

    #[test]
    fn test_disengage_writes_zero() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sdb")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sdb", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());

        actuator.engage(Duration::from_secs(21))?;
        assert_eq!(actuator.disengage()?, Transition::Unparked);
        assert_eq!(fs::read_to_string(disk.control_path())?, "0");
        assert!(!actuator.is_engaged());
        Ok(())
    }

    #[test]
    fn test_renewal_replaces_value() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());

        actuator.engage(Duration::from_secs(21))?;
        assert_eq!(actuator.engage(Duration::from_millis(1500))?, Transition::Renewed);
        assert_eq!(fs::read_to_string(disk.control_path())?, "1500");
        Ok(())
    }

    #[test]
    fn test_shorter_value_leaves_no_stale_digits() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());

        actuator.engage(Duration::from_secs(21))?;
        actuator.engage(Duration::from_millis(7))?;
        assert_eq!(fs::read_to_string(disk.control_path())?, "7");
        actuator.engage(Duration::from_secs(21))?;
        actuator.disengage()?;
        assert_eq!(fs::read_to_string(disk.control_path())?, "0");
        Ok(())
    }

    #[test]
    fn test_sub_millisecond_engage_writes_one() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());

        assert_eq!(actuator.engage(Duration::from_micros(500))?, Transition::Parked);
        assert_eq!(fs::read_to_string(disk.control_path())?, "1");
        Ok(())
    }

    #[test]
    fn test_engagement_lapses_without_further_calls() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk);

        actuator.engage(Duration::from_millis(50))?;
        let later = Instant::now() + Duration::from_millis(60);
        assert_eq!(actuator.state_at(later), EngagementState::Disengaged);
        Ok(())
    }

    #[test]
    fn test_write_failure_keeps_previous_state() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sda")?;

        let disk = ProtectedDisk::with_sysfs_root("/dev/sda", root.path())?;
        let mut actuator = UnloadHeadsActuator::new(disk.clone());
        actuator.engage(Duration::from_secs(21))?;

        fs::remove_dir_all(root.path().join("block"))?;
        let err = actuator
            .engage(Duration::from_secs(21))
            .err()
            .ok_or("engage should fail once the control path is gone")?;

        assert!(matches!(err, ActuatorError::WriteFailed { value_ms: 21000, .. }));
        assert!(!err.is_configuration());
        assert!(actuator.is_engaged());
        Ok(())
    }
}

mod probe {
    use super::*;

    #[test]
    fn test_probe_missing_control_path() -> TestResult {
        let root = tempfile::tempdir()?;
        let disk = ProtectedDisk::with_sysfs_root("/dev/sdz", root.path())?;

        let err = disk.probe().err().ok_or("probe should fail")?;
        assert!(matches!(err, ActuatorError::ControlPathMissing { .. }));
        assert!(err.is_configuration());
        Ok(())
    }

    #[test]
    fn test_probe_present_control_path() -> TestResult {
        let root = tempfile::tempdir()?;
        fake_sysfs(root.path(), "sdc")?;
        ProtectedDisk::with_sysfs_root("/dev/sdc", root.path())?.probe()?;
        Ok(())
    }
}
