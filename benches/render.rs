#[macro_use]
extern crate criterion;

use criterion::Criterion;
use fractalplot::{Mode, Region, Renderer};
use num::Complex;

fn mandelbrot(pixel_size: f64) -> Renderer {
    let region = Region::new(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5)).unwrap();
    Renderer::new(region, pixel_size, 100, Mode::Mandelbrot).unwrap()
}

fn render_single(c: &mut Criterion) {
    let renderer = mandelbrot(0.01);
    c.bench_function("mandelbrot 300x300 single", move |b| {
        b.iter(|| renderer.render_single())
    });
}

fn render_threaded(c: &mut Criterion) {
    let renderer = mandelbrot(0.01);
    let threads = num_cpus::get();
    c.bench_function("mandelbrot 300x300 threaded", move |b| {
        b.iter(|| renderer.render(threads).unwrap())
    });
}

criterion_group!(benches, render_single, render_threaded);
criterion_main!(benches);
