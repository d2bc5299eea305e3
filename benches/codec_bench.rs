use cluster_protocol::{BitReader, BitWriter, DataWidth};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

#[allow(clippy::unwrap_used)]
fn bench_bit_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("bit_codec");
    let field_counts = [16usize, 128, 1024];

    for &count in &field_counts {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("write_{count}_fields"), |b| {
            b.iter_batched(
                BitWriter::new,
                |mut writer| {
                    for i in 0..count {
                        writer.write(i as u32, DataWidth::ClusterSubId);
                        writer.write(i as u32, DataWidth::BlockMeta);
                    }
                    writer.into_bytes()
                },
                BatchSize::SmallInput,
            )
        });

        let mut writer = BitWriter::new();
        for i in 0..count {
            writer.write(i as u32, DataWidth::ClusterSubId);
            writer.write(i as u32, DataWidth::BlockMeta);
        }
        let bytes = writer.into_bytes();
        group.bench_function(format!("read_{count}_fields"), |b| {
            b.iter(|| {
                let mut reader = BitReader::new(&bytes);
                let mut sum = 0u64;
                for _ in 0..count {
                    sum += u64::from(reader.read(DataWidth::ClusterSubId).unwrap());
                    sum += u64::from(reader.read(DataWidth::BlockMeta).unwrap());
                }
                sum
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bit_codec);
criterion_main!(benches);
