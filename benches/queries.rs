use criterion::{criterion_group, criterion_main, Criterion};
use octoforest::connectivity::{Connectivity, CornerInfo, EdgeInfo};

fn criterion_benchmark(c: &mut Criterion) {
    let rotcubes = Connectivity::rotcubes();
    let brick = Connectivity::brick(6, 6, 6, true, false, true);

    c.bench_function("face transforms over rotcubes", |b| {
        b.iter(|| {
            let mut boundaries = 0;
            for tree in 0..rotcubes.num_trees() as i32 {
                for face in 0..6 {
                    if rotcubes.find_face_transform(tree, face).is_none() {
                        boundaries += 1;
                    }
                }
            }
            boundaries
        })
    });

    c.bench_function("edge and corner transforms over a periodic brick", |b| {
        let mut edges = EdgeInfo::new();
        let mut corners = CornerInfo::new();
        b.iter(|| {
            let mut total = 0;
            for tree in 0..brick.num_trees() as i32 {
                for edge in 0..12 {
                    brick.find_edge_transform(tree, edge, &mut edges);
                    total += edges.transforms.len();
                }
                for corner in 0..8 {
                    brick.find_corner_transform(tree, corner, &mut corners);
                    total += corners.transforms.len();
                }
            }
            total
        })
    });

    c.bench_function("validate the shell connectivity", |b| {
        let shell = Connectivity::shell();
        b.iter(|| shell.is_valid())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
