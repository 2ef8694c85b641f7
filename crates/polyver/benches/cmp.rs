use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use polyver::{Mode, Version};

fn version_cmp_neither_prerelease(c: &mut Criterion) {
    let sa = "1.82";
    let sb = "1.82.0";
    let va = Version::new(sa);
    let vb = Version::new(sb);
    c.bench_function(&format!("Compare {sa} and {sb}"), |b| {
        b.iter(|| {
            let _ord = black_box(va.try_cmp(&vb));
        })
    });
}

fn version_cmp_one_prerelease(c: &mut Criterion) {
    let sa = "1.82";
    let sb = "1.82-alpha1";
    let va = Version::new(sa);
    let vb = Version::new(sb);
    c.bench_function(&format!("Compare {sa} and {sb}"), |b| {
        b.iter(|| {
            let _ord = black_box(va.try_cmp(&vb));
        })
    });
}

fn version_cmp_both_prerelease(c: &mut Criterion) {
    let sa = "1.82-rc.4";
    let sb = "1.82-alpha1";
    let va = Version::new(sa);
    let vb = Version::new(sb);
    c.bench_function(&format!("Compare {sa} and {sb}"), |b| {
        b.iter(|| {
            let _ord = black_box(va.try_cmp(&vb));
        })
    });
}

fn version_parse_semver(c: &mut Criterion) {
    let s = "1.0.0-beta.11+20250102";
    c.bench_function(&format!("Parse {s} in semver mode"), |b| {
        b.iter(|| {
            let _ver = black_box(Version::with_mode(s, Mode::Semver));
        })
    });
}

criterion_group!(
    benches,
    version_cmp_both_prerelease,
    version_cmp_neither_prerelease,
    version_cmp_one_prerelease,
    version_parse_semver
);
criterion_main!(benches);
