use assert_cmd::prelude::*; // Add methods on commands
use std::io::Write;
use std::process::Command; // Run programs

type STDRESULT = Result<(), Box<dyn std::error::Error>>;

fn gperf_file(lines: &[&str]) -> Result<tempfile::NamedTempFile, std::io::Error> {
    let mut f = tempfile::NamedTempFile::new()?;
    writeln!(f, "%%")?;
    for line in lines {
        writeln!(f, "{line}")?;
    }
    writeln!(f, "%%")?;
    Ok(f)
}

#[test]
fn compiles_spec_example_one_to_raw_bytes() -> STDRESULT {
    let infile = gperf_file(&["aa, 1", "a, 2"])?;
    let temp_dir = tempfile::tempdir()?;
    let out_path = temp_dir.path().join("out.dafsa");

    Command::cargo_bin("dafsa-compiler")?
        .arg("-i")
        .arg(infile.path())
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let bytes = std::fs::read(&out_path)?;
    assert_eq!(bytes, hex::decode("81e10281826181").unwrap());
    Ok(())
}

#[test]
fn rust_format_emits_a_pub_const_declaration() -> STDRESULT {
    let infile = gperf_file(&["aa, 1", "a, 2"])?;
    let temp_dir = tempfile::tempdir()?;
    let out_path = temp_dir.path().join("out.rs");

    Command::cargo_bin("dafsa-compiler")?
        .arg("--format")
        .arg("rust")
        .arg("-i")
        .arg(infile.path())
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success();

    let src = std::fs::read_to_string(&out_path)?;
    assert!(src.starts_with("pub const DAFSA: [u8; 7] = ["));
    assert!(src.contains("0x81"));
    Ok(())
}

#[test]
fn reverse_flag_changes_the_compiled_bytes() -> STDRESULT {
    let infile = gperf_file(&["ba, 1"])?;
    let temp_dir = tempfile::tempdir()?;
    let forward_path = temp_dir.path().join("forward.dafsa");
    let reversed_path = temp_dir.path().join("reversed.dafsa");

    Command::cargo_bin("dafsa-compiler")?
        .arg("-i")
        .arg(infile.path())
        .arg("-o")
        .arg(&forward_path)
        .assert()
        .success();
    Command::cargo_bin("dafsa-compiler")?
        .arg("--reverse")
        .arg("-i")
        .arg(infile.path())
        .arg("-o")
        .arg(&reversed_path)
        .assert()
        .success();

    let forward = std::fs::read(&forward_path)?;
    let reversed = std::fs::read(&reversed_path)?;
    assert_ne!(forward, reversed, "reversing \"ba\" into \"ab\" must change the compiled word chain");
    Ok(())
}

#[test]
fn malformed_dictionary_fails_with_nonzero_exit() -> STDRESULT {
    let infile = gperf_file(&["no-digit-here"])?;
    let temp_dir = tempfile::tempdir()?;
    let out_path = temp_dir.path().join("out.dafsa");

    Command::cargo_bin("dafsa-compiler")?
        .arg("-i")
        .arg(infile.path())
        .arg("-o")
        .arg(&out_path)
        .assert()
        .failure();
    Ok(())
}

#[test]
fn reads_from_stdin_when_no_infile_is_given() -> STDRESULT {
    Command::cargo_bin("dafsa-compiler")?
        .write_stdin("%%\naa, 1\na, 2\n%%\n")
        .assert()
        .success()
        .stdout(hex::decode("81e10281826181").unwrap());
    Ok(())
}
