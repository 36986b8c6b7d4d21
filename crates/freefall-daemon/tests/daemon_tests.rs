//! End-to-end tests for the freefalld binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn freefalld() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("freefalld")?;
    cmd.env_remove("RUST_LOG")
        .env_remove("FREEFALLD_DEVICE")
        .env_remove("FREEFALLD_EVENT_SOURCE")
        .env_remove("FREEFALLD_SYSFS_ROOT")
        .arg("--no-realtime");
    Ok(cmd)
}

/// Create `<root>/block/<name>/device/unload_heads` and return its path.
fn fake_sysfs(root: &Path, name: &str) -> std::io::Result<PathBuf> {
    let device_dir = root.join("block").join(name).join("device");
    fs::create_dir_all(&device_dir)?;
    let control = device_dir.join("unload_heads");
    fs::write(&control, "0")?;
    Ok(control)
}

mod configuration {
    use super::*;

    #[test]
    fn test_invalid_device_path_exits_2() -> TestResult {
        freefalld()?
            .arg("sda")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid device path"));
        Ok(())
    }

    #[test]
    fn test_missing_control_path_exits_2() -> TestResult {
        let sysfs = TempDir::new()?;
        freefalld()?
            .args(["/dev/sdz", "--sysfs-root"])
            .arg(sysfs.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("unload_heads"));
        Ok(())
    }

    #[test]
    fn test_grace_not_shorter_than_protect_exits_2() -> TestResult {
        let sysfs = TempDir::new()?;
        fake_sysfs(sysfs.path(), "sda")?;
        freefalld()?
            .args(["/dev/sda", "--protect-secs", "2", "--grace-secs", "2", "--sysfs-root"])
            .arg(sysfs.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("grace_ms must be shorter"));
        Ok(())
    }

    #[test]
    fn test_protect_over_limit_exits_2() -> TestResult {
        freefalld()?
            .args(["--protect-secs", "31"])
            .assert()
            .code(2);
        Ok(())
    }
}

mod event_source {
    use super::*;

    #[test]
    fn test_missing_event_source_exits_3() -> TestResult {
        let sysfs = TempDir::new()?;
        let control = fake_sysfs(sysfs.path(), "sda")?;
        freefalld()?
            .args(["/dev/sda", "--sysfs-root"])
            .arg(sysfs.path())
            .arg("--event-source")
            .arg(sysfs.path().join("no-such-freefall"))
            .assert()
            .code(3)
            .stderr(predicate::str::contains("no-such-freefall"));

        assert_eq!(fs::read_to_string(control)?, "0");
        Ok(())
    }

    #[test]
    fn test_events_park_then_source_loss_unparks_and_exits_1() -> TestResult {
        let sysfs = TempDir::new()?;
        let control = fake_sysfs(sysfs.path(), "sda")?;
        let source = sysfs.path().join("freefall");
        fs::write(&source, [2u8])?;

        freefalld()?
            .args(["/dev/sda", "--sysfs-root"])
            .arg(sysfs.path())
            .arg("--event-source")
            .arg(&source)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("parked"))
            .stderr(predicate::str::contains("unparked"))
            .stderr(predicate::str::contains("end of file"));

        // Forced disengage on the fatal path leaves the heads free.
        assert_eq!(fs::read_to_string(control)?, "0");
        Ok(())
    }

    #[test]
    fn test_environment_configures_device() -> TestResult {
        let sysfs = TempDir::new()?;
        freefalld()?
            .env("FREEFALLD_DEVICE", "/dev/sdq")
            .arg("--sysfs-root")
            .arg(sysfs.path())
            .assert()
            .code(2)
            .stderr(predicate::str::contains("sdq"));
        Ok(())
    }
}
