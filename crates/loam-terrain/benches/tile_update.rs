use criterion::{Criterion, black_box, criterion_group, criterion_main};
use loam_terrain::{BrushProfile, HeightField, HeightFieldParams, TileCoord};

fn bench_generate_terrain(c: &mut Criterion) {
    let mut field = HeightField::new(HeightFieldParams::default());
    c.bench_function("generate_terrain_100x100", |b| {
        b.iter(|| black_box(field.generate_terrain().len()))
    });
}

fn bench_update_tile(c: &mut Criterion) {
    let mut field = HeightField::new(HeightFieldParams::default());
    field.generate_terrain();
    for i in 0..32 {
        let t = i as f32 / 32.0;
        field.divot(t, 1.0 - t, 0.01, 0.05);
    }
    c.bench_function("update_tile_with_32_divots", |b| {
        b.iter(|| black_box(field.update_tile(TileCoord::new(5, 5))))
    });
}

fn bench_sculpt(c: &mut Criterion) {
    let mut field = HeightField::new(HeightFieldParams::default());
    field.generate_terrain();
    let brush = BrushProfile::default();
    c.bench_function("sculpt_default_brush", |b| {
        b.iter(|| black_box(field.sculpt(0.5, 0.5, &brush).upload_bytes()))
    });
}

criterion_group!(benches, bench_generate_terrain, bench_update_tile, bench_sculpt);
criterion_main!(benches);
