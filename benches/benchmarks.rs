//! Benchmarks tests for measuring the performance of the code

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xcci::{
    cli::output::commands,
    config_file,
    domain::settings::BuildSettings,
    utils::{constants::DEFAULT_CONFIG_FILE, reader::build_model},
};

fn settings_dump() -> String {
    (0..400)
        .map(|idx| format!("    SETTING_{idx} = /Users/ci/DerivedData/OIDC-abc/Build/{idx}\n"))
        .chain(std::iter::once(
            "    OBJROOT = /Users/ci/DerivedData/OIDC-abc/Build/Intermediates.noindex\n".to_owned(),
        ))
        .collect()
}

pub fn settings_parsing_benchmark(c: &mut Criterion) {
    let dump = settings_dump();

    c.bench_function("Parse a build settings dump", |b| {
        b.iter(|| BuildSettings::parse(black_box(&dump)))
    });
}

pub fn command_generation_benchmark(c: &mut Criterion) {
    let config = config_file::xcci_cfg_from_file(DEFAULT_CONFIG_FILE)
        .expect("The built-in configuration must parse");
    let model = build_model(config).expect("The built-in configuration must be valid");

    c.bench_function("Generate the commands of every target", |b| {
        b.iter(|| {
            for target in model.targets.iter() {
                for operation in target.operations.iter() {
                    black_box(commands::xcodebuild_command(
                        target,
                        &model.build,
                        Some(*operation),
                        true,
                    ));
                }
                black_box(commands::settings_query_command(target, &model.build));
            }
        })
    });
}

criterion_group!(
    benches,
    settings_parsing_benchmark,
    command_generation_benchmark
);
criterion_main!(benches);
