use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
    Throughput,
};
use hypercat::{
    config::Config,
    slab::{RangeSet, RangeSpec},
};

fn multi_slab(c: &mut Criterion) {
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    let mut group = c.benchmark_group("multi_slab");
    group.plot_config(plot_config);

    let config = Config::default();
    for num_specs in [4_u64, 64, 1024] {
        let size = num_specs * 16;
        // reversed and overlapping, so every merge sorts and checks overlap
        let specs: Vec<RangeSpec> = (0..num_specs)
            .rev()
            .map(|i| RangeSpec::new("x", Some(i * 16), Some(i * 16 + 20), Some(2)))
            .collect();
        group.throughput(Throughput::Elements(num_specs));
        group.bench_function(BenchmarkId::new("merge", num_specs), |b| {
            b.iter(|| {
                let mut range_set = RangeSet::new(size);
                for spec in &specs {
                    range_set.push(spec.clone());
                }
                range_set.merge(false, &config).unwrap();
                range_set.plan()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, multi_slab);
criterion_main!(benches);
