//! Integration tests for entrywrap

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const SYSTEM_PATH: &str = "/usr/bin:/bin";

    /// Wrapper isolated from the host: no user config, sweep confined to `root`
    fn entrywrap(root: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("entrywrap");
        cmd.env("ENTRYWRAP_CONFIG", root.join("no-config.toml"))
            .env("ENTRYWRAP_ROOT", root)
            .env("ENTRYWRAP_SUFFIXES", ".cache")
            .env("ENTRYWRAP_BIN_DIR", "/fixed")
            .env("ENTRYWRAP_MODULE_DIR", "/app")
            .env_remove("ENTRYWRAP_MODULE_VAR")
            .env_remove("ENTRYWRAP_LOG")
            .env("PATH", SYSTEM_PATH)
            .env_remove("PYTHONPATH");
        cmd
    }

    #[test]
    fn echo_passes_through() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .args(["echo", "hello"])
            .assert()
            .success()
            .stdout("hello\n")
            .stderr("");
    }

    #[test]
    fn exit_code_propagates() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .args(["sh", "-c", "exit 3"])
            .assert()
            .code(3);
    }

    #[test]
    fn hyphen_arguments_are_not_consumed() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .args(["printf", "%s|", "--help", "--", "-x"])
            .assert()
            .success()
            .stdout("--help|--|-x|");
    }

    #[test]
    fn missing_binary_fails() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .arg("/nonexistent/binary")
            .assert()
            .code(127)
            .stdout("")
            .stderr(predicate::str::contains("/nonexistent/binary"));
    }

    #[test]
    fn empty_command_fails_without_sweeping() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("stale.cache"), b"").unwrap();

        entrywrap(temp.path())
            .assert()
            .code(127)
            .stdout("")
            .stderr(predicate::str::contains("No command given"));

        assert!(temp.path().join("stale.cache").exists());
    }

    #[test]
    fn end_to_end_sweep_then_exec() {
        let temp = TempDir::new().unwrap();
        let pkg = temp.path().join("pkg");
        fs::create_dir_all(&pkg).unwrap();
        fs::write(pkg.join("mod.cache"), b"stale").unwrap();
        fs::write(pkg.join("mod.src"), b"keep").unwrap();

        entrywrap(temp.path())
            .arg("true")
            .assert()
            .success();

        assert!(!pkg.join("mod.cache").exists());
        assert!(pkg.join("mod.src").exists());
    }

    #[test]
    fn target_sees_prefixed_search_paths() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .env("PYTHONPATH", "/opt/lib")
            .args(["sh", "-c", "printf '%s\\n%s' \"$PATH\" \"$PYTHONPATH\""])
            .assert()
            .success()
            .stdout(format!("/fixed:{}\n/app:/opt/lib", SYSTEM_PATH));
    }

    #[test]
    fn missing_root_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .env("ENTRYWRAP_ROOT", temp.path().join("absent"))
            .args(["echo", "ok"])
            .assert()
            .success()
            .stdout("ok\n");
    }

    #[test]
    fn config_file_is_honoured() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        fs::write(
            &config,
            "[search_path]\nmodule_var = \"NODE_PATH\"\nmodule_dir = \"/srv/node\"\n",
        )
        .unwrap();

        entrywrap(temp.path())
            .env("ENTRYWRAP_CONFIG", &config)
            .env_remove("ENTRYWRAP_MODULE_DIR")
            .args(["sh", "-c", "printf '%s' \"$NODE_PATH\""])
            .assert()
            .success()
            .stdout("/srv/node");
    }

    #[test]
    fn malformed_config_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        fs::write(&config, "[sweep\n").unwrap();

        entrywrap(temp.path())
            .env("ENTRYWRAP_CONFIG", &config)
            .args(["echo", "never"])
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_root_is_swept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join(OsStr::from_bytes(b"caf\xe9"));
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("x.cache"), b"stale").unwrap();

        entrywrap(&root).arg("true").assert().success();

        assert!(!root.join("x.cache").exists());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_suffixes_are_fatal() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .env("ENTRYWRAP_SUFFIXES", OsStr::from_bytes(b".py\xe9"))
            .args(["echo", "never"])
            .assert()
            .code(127)
            .stdout("")
            .stderr(predicate::str::contains("ENTRYWRAP_SUFFIXES"));
    }

    #[test]
    fn debug_logs_are_plain_on_piped_stderr() {
        let temp = TempDir::new().unwrap();
        entrywrap(temp.path())
            .env("ENTRYWRAP_LOG", "entrywrap=debug")
            .args(["echo", "hi"])
            .assert()
            .success()
            .stdout("hi\n")
            .stderr(predicate::str::contains("DEBUG").and(predicate::str::contains("\x1b[").not()));
    }
}
