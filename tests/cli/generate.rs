use anyhow::Result;
use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, PLATFORM_FILES};

const COMMON: &[&str] = &[
    "crypto/asn1/a_bitstr.c",
    "crypto/fipsmodule/bcm.c",
    "third_party/jitterentropy/jitterentropy-base.c",
];

fn default_project() -> Result<CliTest> {
    CliTest::with_platforms([
        &[
            COMMON[0],
            COMMON[1],
            "generated-src/ios-aarch64/crypto/chacha/chacha-armv8.S",
            COMMON[2],
            "crypto/internal.h",
        ],
        &[COMMON[0], COMMON[1], COMMON[2], "generated-src/mac-x86_64/crypto/fipsmodule/x86_64-mont.S"],
        &[COMMON[0], COMMON[1], COMMON[2], "generated-src/linux-aarch64/crypto/fipsmodule/sha256-armv8.S"],
        &[
            COMMON[0],
            COMMON[1],
            COMMON[2],
            "generated-src/linux-x86_64/crypto/fipsmodule/aesni-x86_64.S",
            "generated-src/linux-x86_64/crypto/fipsmodule/ghash-x86_64.S",
        ],
    ])
}

#[test]
fn test_generate_default_platforms() -> Result<()> {
    let test = default_project()?;

    let output = test.generate_command().output()?;

    assert!(output.status.success());
    assert_snapshot!(String::from_utf8(output.stdout)?, @r#"
# Auto-generated from aws-lc-sys cc_builder

UNIVERSAL_SRCS = [
    "aws-lc/crypto/asn1/a_bitstr.c",
    "aws-lc/crypto/fipsmodule/bcm.c",
    "aws-lc/third_party/jitterentropy/jitterentropy-base.c",
]

APPLE_AARCH64_ASM = [
    "aws-lc/generated-src/ios-aarch64/crypto/chacha/chacha-armv8.S",
]

APPLE_X86_64_ASM = [
    "aws-lc/generated-src/mac-x86_64/crypto/fipsmodule/x86_64-mont.S",
]

LINUX_AARCH64_ASM = [
    "aws-lc/generated-src/linux-aarch64/crypto/fipsmodule/sha256-armv8.S",
]

LINUX_X86_64_ASM = [
    "aws-lc/generated-src/linux-x86_64/crypto/fipsmodule/aesni-x86_64.S",
    "aws-lc/generated-src/linux-x86_64/crypto/fipsmodule/ghash-x86_64.S",
]

LINUX_X86_ASM = []

LINUX_ARM_ASM = []

WIN_X86_64_ASM = []

WIN_AARCH64_ASM = []

WIN_X86_ASM = []
"#);

    Ok(())
}

#[test]
fn test_no_command_is_generate() -> Result<()> {
    let test = default_project()?;

    let explicit = test.generate_command().output()?;
    let implicit = test.command().output()?;

    assert!(implicit.status.success());
    assert_eq!(
        String::from_utf8(implicit.stdout)?,
        String::from_utf8(explicit.stdout)?
    );

    Ok(())
}

#[test]
fn test_generate_is_idempotent() -> Result<()> {
    let test = default_project()?;

    let first = test.generate_command().output()?;
    let second = test.generate_command().output()?;

    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[test]
fn test_generate_to_file() -> Result<()> {
    let test = default_project()?;

    let to_stdout = test.generate_command().output()?;
    let to_file = test
        .generate_command()
        .args(["--output", "third_party/aws-lc/sources.bzl"])
        .output();
    // Parent directory must exist.
    assert!(!to_file?.status.success());

    test.write_file("third_party/aws-lc/.keep", "")?;
    let to_file = test
        .generate_command()
        .args(["--output", "third_party/aws-lc/sources.bzl"])
        .output()?;

    assert!(to_file.status.success());
    assert_eq!(
        String::from_utf8(to_file.stdout)?,
        "\u{2713} Wrote third_party/aws-lc/sources.bzl\n"
    );
    assert_eq!(
        test.read_file("third_party/aws-lc/sources.bzl")?,
        String::from_utf8(to_stdout.stdout)?
    );

    Ok(())
}

#[test]
fn test_missing_block_yields_empty_list() -> Result<()> {
    let test = default_project()?;
    test.write_file(
        "aws-lc-rs/aws-lc-sys/builder/cc_builder/aarch64_unknown_linux_gnu.rs",
        "// regenerated without sources\n",
    )?;

    let output = test.generate_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("LINUX_AARCH64_ASM = [\n]\n"));
    assert!(String::from_utf8(output.stderr)?.contains("no sources block found"));

    Ok(())
}

#[test]
fn test_captured_stderr_has_no_escape_codes() -> Result<()> {
    let test = default_project()?;
    test.write_file(
        "aws-lc-rs/aws-lc-sys/builder/cc_builder/aarch64_unknown_linux_gnu.rs",
        "// regenerated without sources\n",
    )?;

    let mut cmd = test.generate_command();
    cmd.env_remove("NO_COLOR");
    let output = cmd.output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stderr.contains("no sources block found"));
    assert!(!stderr.contains('\u{1b}'));

    Ok(())
}

#[test]
fn test_missing_block_fails_with_strict() -> Result<()> {
    let test = default_project()?;
    test.write_file(
        "aws-lc-rs/aws-lc-sys/builder/cc_builder/aarch64_unknown_linux_gnu.rs",
        "// regenerated without sources\n",
    )?;

    let output = test.generate_command().arg("--strict").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr.contains("Invalid sources block in"));
    assert!(stderr.contains("aarch64_unknown_linux_gnu.rs"));

    Ok(())
}

#[test]
fn test_first_platform_wins_on_divergence() -> Result<()> {
    let test = default_project()?;
    test.write_platform(
        PLATFORM_FILES[3],
        &[COMMON[0], "crypto/cpu_intel.c", "generated-src/linux-x86_64/x.S"],
    )?;

    let output = test.generate_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("\"aws-lc/crypto/fipsmodule/bcm.c\""));
    assert!(!stdout.contains("cpu_intel.c"));
    assert!(String::from_utf8(output.stderr)?.contains("compiled sources differ"));

    Ok(())
}

#[test]
fn test_divergence_error_policy() -> Result<()> {
    let test = default_project()?;
    test.write_platform(PLATFORM_FILES[1], &[COMMON[0]])?;

    let output = test
        .generate_command()
        .args(["--divergence", "error"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8(output.stderr)?
            .contains("Compiled sources of APPLE_X86_64_ASM differ from APPLE_AARCH64_ASM")
    );

    Ok(())
}

#[test]
fn test_missing_platform_file_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    test.write_platform(PLATFORM_FILES[0], COMMON)?;

    let output = test.generate_command().output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(stderr.starts_with("Error: Failed to read"));
    assert!(stderr.contains("x86_64_apple_darwin.rs"));

    Ok(())
}

#[test]
fn test_config_file_platforms() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".srclistrc.json",
        r#"{
            "baseDir": "vendor/aws-lc-sys",
            "universalName": "CRYPTO_SRCS",
            "platforms": [
                { "name": "LINUX_RISCV64_ASM", "file": "cc_builder/riscv64gc_unknown_linux_gnu.rs" }
            ],
            "placeholders": ["WIN_ASM"]
        }"#,
    )?;
    test.write_file(
        "vendor/aws-lc-sys/cc_builder/riscv64gc_unknown_linux_gnu.rs",
        &crate::cc_builder(&["crypto/a.c", "gen/riscv.S"]),
    )?;

    let output = test.generate_command().output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "# Auto-generated from aws-lc-sys cc_builder\n\
         \n\
         CRYPTO_SRCS = [\n\
         \x20   \"aws-lc/crypto/a.c\",\n\
         ]\n\
         \n\
         LINUX_RISCV64_ASM = [\n\
         \x20   \"aws-lc/gen/riscv.S\",\n\
         ]\n\
         \n\
         WIN_ASM = []\n\
         \n"
    );

    Ok(())
}

#[test]
fn test_base_dir_flag() -> Result<()> {
    let test = CliTest::new()?;
    for file in PLATFORM_FILES {
        test.write_file(
            &format!("deps/aws-lc-sys/builder/cc_builder/{}", file),
            &crate::cc_builder(&["crypto/a.c"]),
        )?;
    }

    let output = test
        .generate_command()
        .args(["--base-dir", "deps/aws-lc-sys"])
        .output()?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)?.contains("\"aws-lc/crypto/a.c\","));

    Ok(())
}

#[test]
fn test_verbose_prints_summary_to_stderr() -> Result<()> {
    let test = default_project()?;

    let output = test.generate_command().arg("--verbose").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stderr.contains("LINUX_X86_64_ASM   3 compiled, 2 assembly"));
    assert!(stderr.contains("--> "));
    assert!(String::from_utf8(output.stdout)?.starts_with("# Auto-generated"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    for command in ["generate", "check", "init"] {
        assert!(stdout.contains(command));
    }

    Ok(())
}
