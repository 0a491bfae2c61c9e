use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn mandelbrot_writes_the_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mandelbrot.png");

    Command::cargo_bin("mandelbrot")
        .unwrap()
        .arg("-o")
        .arg(&path)
        .args(&["--pixel_size", "0.05", "--max-iter", "30", "-t", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plot saved as").from_utf8());

    let img = image::open(&path).unwrap().to_luma();
    assert_eq!(img.dimensions(), (60, 60));
}

#[test]
fn julia_accepts_complex_literals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("julia.png");

    Command::cargo_bin("julia")
        .unwrap()
        .arg("-o")
        .arg(&path)
        .args(&[
            "-c",
            "-0.8+0.156j",
            "--zmin",
            "-2-1j",
            "--zmax",
            "2,1",
            "--pixel_size",
            "0.1",
            "--max-iter",
            "20",
            "--early-exit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("julia.png").from_utf8());

    let img = image::open(&path).unwrap().to_luma();
    assert_eq!(img.dimensions(), (40, 20));
}

#[test]
fn inverted_region_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.png");

    Command::cargo_bin("mandelbrot")
        .unwrap()
        .arg("-o")
        .arg(&path)
        .args(&["--zmin", "1,1", "--zmax", "-1,-1", "--pixel_size", "0.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration").from_utf8());

    assert!(!path.exists());
}

#[test]
fn bad_pixel_size_is_refused() {
    Command::cargo_bin("mandelbrot")
        .unwrap()
        .args(&["--pixel_size", "0"])
        .assert()
        .failure();
}
