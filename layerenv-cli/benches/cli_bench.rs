use std::fmt::Write as _;
use std::process::{Command, Stdio};

use assert_cmd::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tempfile::TempDir;

fn write_dotenv(dir: &TempDir, entries: usize) {
    let mut contents = String::new();
    for i in 0..entries {
        let _ = writeln!(contents, "BENCH_KEY_{i}=value {i}");
    }
    std::fs::write(dir.path().join(".env"), contents).expect("failed to write .env");
}

fn bench_cli_startup(c: &mut Criterion) {
    c.bench_function("cli_startup_version", |b| {
        b.iter(|| {
            let mut cmd = Command::cargo_bin("layerenv").expect("failed to locate layerenv binary");
            let output = cmd.arg("--version").output().expect("failed to run layerenv");
            black_box(output);
        });
    });
}

fn bench_cli_show(c: &mut Criterion) {
    c.bench_function("cli_show_json", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().expect("failed to create temp dir");
                write_dotenv(&dir, 200);
                dir
            },
            |dir| {
                let mut cmd =
                    Command::cargo_bin("layerenv").expect("failed to locate layerenv binary");
                let output = cmd
                    .current_dir(dir.path())
                    .args(["show", "--format", "json"])
                    .output()
                    .expect("failed to execute layerenv show");

                black_box(output);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_cli_check(c: &mut Criterion) {
    c.bench_function("cli_check", |b| {
        b.iter_batched(
            || {
                let dir = TempDir::new().expect("failed to create temp dir");
                write_dotenv(&dir, 50);
                dir
            },
            |dir| {
                let mut cmd =
                    Command::cargo_bin("layerenv").expect("failed to locate layerenv binary");
                cmd.stdout(Stdio::null()).stderr(Stdio::null());
                let status = cmd
                    .current_dir(dir.path())
                    .args(["--quiet", "check", "BENCH_KEY_0", "BENCH_KEY_49"])
                    .status()
                    .expect("failed to execute layerenv check");

                black_box(status.success());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(cli_benches, bench_cli_startup, bench_cli_show, bench_cli_check);
criterion_main!(cli_benches);
