use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hypercat::{
    catalog::Catalog,
    config::Config,
    provider::{AttributeMap, CatalogProviderTraits, DataType, MemoryProvider},
};

/// A hierarchy with `groups` groups under the root, each holding a shadowed `lon` coordinate and `variables` data variables.
fn provider(groups: usize, variables: usize) -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    let root = provider.root();
    let time = provider.add_dimension(root, "time", 100, true).unwrap();
    provider
        .add_variable(root, "time", DataType::Double, &[time], AttributeMap::new())
        .unwrap();
    for group in 0..groups {
        let handle = provider.add_group(root, &format!("g{group}")).unwrap();
        let lon = provider.add_dimension(handle, "lon", 360, false).unwrap();
        provider
            .add_variable(handle, "lon", DataType::Float, &[lon], AttributeMap::new())
            .unwrap();
        for variable in 0..variables {
            provider
                .add_variable(
                    handle,
                    &format!("v{variable}"),
                    DataType::Float,
                    &[time, lon],
                    AttributeMap::new(),
                )
                .unwrap();
        }
    }
    provider
}

fn catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");
    for groups in [8, 32, 128] {
        let provider = provider(groups, 16);
        group.throughput(Throughput::Elements(groups as u64 * 17));
        group.bench_function(BenchmarkId::new("build", groups), |b| {
            b.iter(|| Catalog::new_with_provider(&provider, "/").unwrap());
        });

        let mut catalog = Catalog::new_with_provider(&provider, "/").unwrap();
        let config = Config::default();
        group.bench_function(BenchmarkId::new("select", groups), |b| {
            b.iter(|| {
                catalog.select(&["g1"], &["v1", "lon"], &config).unwrap();
                catalog.add_associated_coordinates();
                catalog.mark_extracted_groups();
            });
        });
    }
    group.finish();
}

criterion_group!(benches, catalog);
criterion_main!(benches);
