use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rail_probe::{metrics::MeasurementKind, write_plain_row, DeviceSet, RAILS_PER_DEVICE};
use std::path::{Path, PathBuf};

/// Build a fake IIO directory with every sensor present
fn fake_device(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).expect("Should create device dir");
    for index in 0..RAILS_PER_DEVICE {
        std::fs::write(dir.join(format!("rail_name_{}", index)), format!("RAIL_{}", index))
            .expect("Should write rail name");
        for kind in MeasurementKind::ALL {
            std::fs::write(dir.join(kind.attribute(index)), "19072\n").expect("Should write sensor");
        }
    }
    dir
}

/// Benchmark one sampling round over a growing number of devices
fn bench_refresh(c: &mut Criterion) {
    let tmp = tempfile::tempdir().expect("Should create temp dir");

    for count in [1usize, 2, 4].iter() {
        let paths: Vec<PathBuf> = (0..*count)
            .map(|i| fake_device(tmp.path(), &format!("dev{}", i)))
            .collect();
        let mut devices = DeviceSet::from_paths(paths);

        c.bench_with_input(BenchmarkId::new("refresh", count), count, |b, _| {
            b.iter(|| devices.refresh())
        });
    }
}

/// Benchmark CSV rendering of an already refreshed device set
fn bench_csv_rendering(c: &mut Criterion) {
    let tmp = tempfile::tempdir().expect("Should create temp dir");
    let mut devices = DeviceSet::from_paths([
        fake_device(tmp.path(), "0-0040"),
        fake_device(tmp.path(), "0-0041"),
    ]);
    devices.refresh();

    c.bench_function("csv_header", |b| b.iter(|| devices.csv_header()));
    c.bench_function("csv_segment", |b| b.iter(|| devices.to_csv_segment()));
}

/// Benchmark a full append (refresh + format + write)
fn bench_write_row(c: &mut Criterion) {
    let tmp = tempfile::tempdir().expect("Should create temp dir");
    let mut devices = DeviceSet::from_paths([
        fake_device(tmp.path(), "0-0040"),
        fake_device(tmp.path(), "0-0041"),
    ]);
    let path = tmp.path().join("bench.csv");

    c.bench_function("write_row", |b| b.iter(|| write_plain_row(&path, &mut devices)));
}

criterion_group!(benches, bench_refresh, bench_csv_rendering, bench_write_row);
criterion_main!(benches);
