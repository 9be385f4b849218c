use assert_cmd::Command;
use digestr_core::{HashAlgorithm, HashCalculator};
use digestr_test_utils::{KNOWN_VECTORS, TestFileBuilder};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

const ABC_MD5: &str = "900150983cd24fb0d6963f7d28e17f72";
const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

/// `digestr` with an isolated configuration directory
fn digestr(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("digestr").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_dir)
        .env_remove("DIGESTR_HASH__DEFAULT_ALGORITHM")
        .env_remove("DIGESTR_OUTPUT__SHOW_FILE_NAME")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn abc_file() -> NamedTempFile {
    let temp_file = NamedTempFile::new().unwrap();
    fs::write(temp_file.path(), b"abc").unwrap();
    temp_file
}

#[test]
fn test_version() {
    let config_dir = TempDir::new().unwrap();
    digestr(config_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    let config_dir = TempDir::new().unwrap();
    digestr(config_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("hash"))
        .stdout(predicate::str::contains("credits"));
}

#[test]
fn test_hash_defaults_to_md5() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("MD5: {ABC_MD5}")))
        .stdout(predicate::str::contains("File: "));
}

#[test]
fn test_hash_sha256() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .arg("--algorithm")
        .arg("sha256")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("SHA-256: {ABC_SHA256}")))
        .stdout(predicate::str::contains("MD5:").not());
}

#[test]
fn test_hash_crc_alias() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .args(["hash", "-a", "crc"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CRC-32: 352441c2"));
}

#[test]
fn test_hash_all() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .args(["--algorithm", "all"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("MD5: {ABC_MD5}")))
        .stdout(predicate::str::contains(format!("SHA-256: {ABC_SHA256}")))
        .stdout(predicate::str::contains("CRC-32: 352441c2"))
        .stdout(predicate::str::contains("Adler-32: 024d0127"))
        .stdout(predicate::str::contains("ELF: 00006783"));
}

#[test]
fn test_known_vectors_from_files() {
    let config_dir = TempDir::new().unwrap();
    let mut files = TestFileBuilder::new().unwrap();

    for (index, vector) in KNOWN_VECTORS.iter().enumerate() {
        let path = files
            .generate_file(&format!("vector-{index}.bin"), vector.input)
            .unwrap();
        let algorithm = vector.algorithm.to_string();

        digestr(config_dir.path())
            .arg("hash")
            .arg(&path)
            .args(["-a", algorithm.as_str()])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "{}: {}\n",
                vector.algorithm.display_name(),
                vector.hex
            )));
    }
}

#[test]
fn test_large_file_matches_library() {
    let config_dir = TempDir::new().unwrap();
    let mut files = TestFileBuilder::new().unwrap();
    let path = files
        .generate_deterministic_file("large.bin", 300_000, 9)
        .unwrap();

    let output = digestr(config_dir.path())
        .arg("hash")
        .arg(&path)
        .args(["-a", "all", "-f", "csv"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let calculator = HashCalculator::new();
    for algorithm in HashAlgorithm::ALL {
        let expected = calculator.calculate_file(&path, algorithm).unwrap();
        assert!(
            stdout.contains(&format!(",{algorithm},{},300000\n", expected.hash)),
            "{algorithm} missing from:\n{stdout}"
        );
    }
}

#[test]
fn test_hash_empty_file() {
    let config_dir = TempDir::new().unwrap();
    let file = NamedTempFile::new().unwrap();

    digestr(config_dir.path())
        .args(["hash", "-a", "adler32"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Adler-32: 00000001"));
}

#[test]
fn test_zero_digest_of_empty_file_is_not_reported_as_failure() {
    let config_dir = TempDir::new().unwrap();
    let file = NamedTempFile::new().unwrap();

    digestr(config_dir.path())
        .args(["hash", "-a", "crc32"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CRC-32: 00000000"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_hash_json_output() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    let output = digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .args(["-a", "all", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["size"], 3);
    assert_eq!(value["hashes"]["MD5"], ABC_MD5);
    assert_eq!(value["hashes"]["SHA-256"], ABC_SHA256);
    assert_eq!(value["hashes"]["ELF"], "00006783");
}

#[test]
fn test_hash_csv_output() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .args(["-a", "crc32", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("file,algorithm,hash,size\n"))
        .stdout(predicate::str::contains(",crc32,352441c2,3"));
}

#[test]
fn test_missing_file_exits_with_filesystem_code() {
    let config_dir = TempDir::new().unwrap();
    let files = TestFileBuilder::new().unwrap();
    let missing = files.missing_path("does-not-exist.bin");

    digestr(config_dir.path())
        .arg("hash")
        .arg(&missing)
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("does-not-exist.bin"));
}

#[test]
fn test_directory_is_rejected() {
    let config_dir = TempDir::new().unwrap();
    let files = TestFileBuilder::new().unwrap();

    digestr(config_dir.path())
        .arg("hash")
        .arg(files.base_dir())
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Not a regular file"));
}

#[test]
fn test_unknown_algorithm_is_usage_error() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .arg("hash")
        .arg(file.path())
        .args(["-a", "whirlpool"])
        .assert()
        .code(2);
}

#[test]
fn test_credits() {
    let config_dir = TempDir::new().unwrap();

    digestr(config_dir.path())
        .arg("credits")
        .assert()
        .success()
        .stdout(predicate::str::contains("Gary Hammock"))
        .stdout(predicate::str::contains("MIT"));

    // Credits never touch the configuration directory
    assert_eq!(fs::read_dir(config_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_config_file_changes_default_algorithm() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("custom.toml");
    let file = abc_file();

    digestr(config_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "set", "hash.default_algorithm", "crc32"])
        .assert()
        .success();

    digestr(config_dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["config", "get", "hash.default_algorithm"])
        .assert()
        .success()
        .stdout("crc32\n");

    digestr(config_dir.path())
        .arg("--config")
        .arg(&config_path)
        .arg("hash")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CRC-32: 352441c2"));
}

#[test]
fn test_env_overrides_config() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .env("DIGESTR_HASH__DEFAULT_ALGORITHM", "sha256")
        .env("DIGESTR_OUTPUT__SHOW_FILE_NAME", "false")
        .arg("hash")
        .arg(file.path())
        .assert()
        .success()
        .stdout(format!("SHA-256: {ABC_SHA256}\n"));
}

#[test]
fn test_invalid_configured_algorithm_is_usage_error() {
    let config_dir = TempDir::new().unwrap();
    let file = abc_file();

    digestr(config_dir.path())
        .env("DIGESTR_HASH__DEFAULT_ALGORITHM", "whirlpool")
        .arg("hash")
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("hash.default_algorithm"));
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let config_dir = TempDir::new().unwrap();

    digestr(config_dir.path())
        .args(["config", "set", "hash.buffer_sise", "4096"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Did you mean 'hash.buffer_size'?"));
}

#[test]
fn test_config_path_uses_xdg_config_home() {
    let config_dir = TempDir::new().unwrap();

    digestr(config_dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digestr"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_completions() {
    let config_dir = TempDir::new().unwrap();

    digestr(config_dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("digestr"));
}
