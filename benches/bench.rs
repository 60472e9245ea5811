// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;
use marlu::c32;
use ndarray::prelude::*;

use nenufar_xst::{
    math::{cross_correlation_matrix, num_packed_vis, unpack_dual_pol_matrix},
    Polarisation,
};

fn matrix_reconstruction(c: &mut Criterion) {
    // A full NenuFAR core.
    let num_mini_arrays = 96;
    let vis = Array1::from_shape_fn(num_packed_vis(num_mini_arrays), |i| {
        c32::new(i as f32, -(i as f32))
    });

    c.bench_function("unpack 96 mini-arrays", |b| {
        b.iter(|| unpack_dual_pol_matrix(black_box(vis.view()), num_mini_arrays).unwrap())
    });

    let mut group = c.benchmark_group("cross_correlation_matrix");
    for pol in [Polarisation::XX, Polarisation::XY] {
        group.bench_with_input(BenchmarkId::from_parameter(pol), &pol, |b, &pol| {
            b.iter(|| cross_correlation_matrix(black_box(vis.view()), num_mini_arrays, pol).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, matrix_reconstruction);
criterion_main!(benches);
