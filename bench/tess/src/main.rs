extern crate quill;
#[macro_use]
extern crate bencher;

use quill::extra::parser::parse_path_data;
use quill::extra::scenes::{build_heart, build_maze, build_smiley, HEART_PATH_DATA};
use quill::path::Path;
use quill::tessellation::geometry_builder::{BuffersBuilder, Positions, VertexBuffers};
use quill::tessellation::{FillTessellator, LineJoin, StrokeOptions, StrokeTessellator};
use quill::math::Point;

use bencher::Bencher;

const N: usize = 100;
const TOLERANCE: f32 = 0.01;

fn fill_heart(bench: &mut Bencher) {
    let mut path = Path::with_tolerance(TOLERANCE);
    build_heart(&mut path);
    let sub_paths = path.take_sub_paths();

    let mut tess = FillTessellator::new();

    bench.iter(|| {
        for _ in 0..N {
            let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::with_capacity(512, 1500);
            tess.tessellate(
                &mut sub_paths.clone(),
                &mut BuffersBuilder::new(&mut buffers, Positions),
            )
            .unwrap();
        }
    })
}

fn fill_heart_flattening(bench: &mut Bencher) {
    bench.iter(|| {
        for _ in 0..N {
            let mut path = Path::with_tolerance(TOLERANCE);
            build_heart(&mut path);
            bencher::black_box(path);
        }
    })
}

fn parse_heart(bench: &mut Bencher) {
    bench.iter(|| {
        for _ in 0..N {
            let mut path = Path::with_tolerance(TOLERANCE);
            let errors = parse_path_data(HEART_PATH_DATA, &mut path);
            assert!(errors.is_empty());
            bencher::black_box(path);
        }
    })
}

fn stroke_smiley(bench: &mut Bencher) {
    let mut path = Path::with_tolerance(TOLERANCE);
    build_smiley(&mut path);
    let sub_paths = path.take_sub_paths();

    let mut tess = StrokeTessellator::new();
    let options = StrokeOptions::tolerance(TOLERANCE);

    bench.iter(|| {
        for _ in 0..N {
            let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::with_capacity(1024, 3000);
            tess.tessellate(
                &mut sub_paths.clone(),
                &options,
                &mut BuffersBuilder::new(&mut buffers, Positions),
            )
            .unwrap();
        }
    })
}

fn stroke_maze_round_joins(bench: &mut Bencher) {
    let mut path = Path::with_tolerance(TOLERANCE);
    build_maze(&mut path);
    let sub_paths = path.take_sub_paths();

    let mut tess = StrokeTessellator::new();
    let options = StrokeOptions::tolerance(TOLERANCE)
        .with_line_width(3.0)
        .with_line_join(LineJoin::Round);

    bench.iter(|| {
        for _ in 0..N {
            let mut buffers: VertexBuffers<Point, u16> = VertexBuffers::new();
            tess.tessellate(
                &mut sub_paths.clone(),
                &options,
                &mut BuffersBuilder::new(&mut buffers, Positions),
            )
            .unwrap();
        }
    })
}

benchmark_group!(fill_tess, fill_heart);
benchmark_group!(fill_flattening, fill_heart_flattening, parse_heart);
benchmark_group!(stroke_tess, stroke_smiley, stroke_maze_round_joins);
benchmark_main!(fill_tess, fill_flattening, stroke_tess);
