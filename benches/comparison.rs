use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use lanemath::simd::Scalar;

// ---------------------------------------------------------------------------
// Helpers: the same inputs expressed in each library
// ---------------------------------------------------------------------------

const V0: [f32; 4] = [1.5, -2.0, 0.75, 1.0];
const V1: [f32; 4] = [-0.25, 3.0, 2.5, 0.0];
const AXIS: [f32; 3] = [0.48, 0.6, 0.64];

fn rows(seed: f32) -> [[f32; 4]; 4] {
    core::array::from_fn(|i| core::array::from_fn(|j| seed + (i * 4 + j) as f32 * 0.25))
}

fn lanemath_quat(angle: f32) -> lanemath::Quaternion {
    let axis = lanemath::Vector::new(AXIS[0], AXIS[1], AXIS[2], 0.0);
    lanemath::Quaternion::from_axis_angle(axis, angle)
}

fn scalar_quat(angle: f32) -> lanemath::Quat<Scalar> {
    let axis = lanemath::Vec4::new(AXIS[0], AXIS[1], AXIS[2], 0.0);
    lanemath::Quat::from_axis_angle(axis, angle)
}

fn glam_quat(angle: f32) -> glam::Quat {
    glam::Quat::from_axis_angle(glam::Vec3::from_array(AXIS), angle)
}

fn nalgebra_quat(angle: f32) -> nalgebra::UnitQuaternion<f32> {
    let axis = nalgebra::Unit::new_normalize(nalgebra::Vector3::new(AXIS[0], AXIS[1], AXIS[2]));
    nalgebra::UnitQuaternion::from_axis_angle(&axis, angle)
}

// ---------------------------------------------------------------------------
// Vector
// ---------------------------------------------------------------------------

fn vector_dot(c: &mut Criterion) {
    let mut g = c.benchmark_group("vector_dot");

    g.bench_function("lanemath", |b| {
        let (v0, v1) = (lanemath::Vector::from_array(V0), lanemath::Vector::from_array(V1));
        b.iter(|| black_box(v0).dot(black_box(v1)))
    });

    g.bench_function("lanemath_scalar", |b| {
        let v0: lanemath::Vec4<Scalar> = lanemath::Vec4::from_array(V0);
        let v1: lanemath::Vec4<Scalar> = lanemath::Vec4::from_array(V1);
        b.iter(|| black_box(v0).dot(black_box(v1)))
    });

    g.bench_function("glam", |b| {
        let (v0, v1) = (glam::Vec4::from_array(V0), glam::Vec4::from_array(V1));
        b.iter(|| black_box(v0).dot(black_box(v1)))
    });

    g.bench_function("nalgebra", |b| {
        let v0 = nalgebra::Vector4::from(V0);
        let v1 = nalgebra::Vector4::from(V1);
        b.iter(|| black_box(&v0).dot(black_box(&v1)))
    });

    g.finish();
}

fn vector_normalize(c: &mut Criterion) {
    let mut g = c.benchmark_group("vector_normalize");

    g.bench_function("lanemath", |b| {
        let v = lanemath::Vector::from_array(V0);
        b.iter(|| black_box(v).normalize())
    });

    g.bench_function("lanemath_fast", |b| {
        let v = lanemath::Vector::from_array(V0);
        b.iter(|| black_box(v).normalize_fast())
    });

    g.bench_function("lanemath_scalar", |b| {
        let v: lanemath::Vec4<Scalar> = lanemath::Vec4::from_array(V0);
        b.iter(|| black_box(v).normalize())
    });

    g.bench_function("glam", |b| {
        let v = glam::Vec4::from_array(V0);
        b.iter(|| black_box(v).normalize())
    });

    g.bench_function("nalgebra", |b| {
        let v = nalgebra::Vector4::from(V0);
        b.iter(|| black_box(&v).normalize())
    });

    g.finish();
}

fn vector_cross3(c: &mut Criterion) {
    let mut g = c.benchmark_group("vector_cross3");

    g.bench_function("lanemath", |b| {
        let (v0, v1) = (lanemath::Vector::from_array(V0), lanemath::Vector::from_array(V1));
        b.iter(|| black_box(v0).cross3(black_box(v1)))
    });

    g.bench_function("glam", |b| {
        let v0 = glam::Vec3A::new(V0[0], V0[1], V0[2]);
        let v1 = glam::Vec3A::new(V1[0], V1[1], V1[2]);
        b.iter(|| black_box(v0).cross(black_box(v1)))
    });

    g.bench_function("nalgebra", |b| {
        let v0 = nalgebra::Vector3::new(V0[0], V0[1], V0[2]);
        let v1 = nalgebra::Vector3::new(V1[0], V1[1], V1[2]);
        b.iter(|| black_box(&v0).cross(black_box(&v1)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Quaternion
// ---------------------------------------------------------------------------

fn quat_mul(c: &mut Criterion) {
    let mut g = c.benchmark_group("quat_mul");

    g.bench_function("lanemath", |b| {
        let (q0, q1) = (lanemath_quat(0.4), lanemath_quat(1.3));
        b.iter(|| black_box(q0) * black_box(q1))
    });

    g.bench_function("lanemath_scalar", |b| {
        let (q0, q1) = (scalar_quat(0.4), scalar_quat(1.3));
        b.iter(|| black_box(q0) * black_box(q1))
    });

    g.bench_function("glam", |b| {
        let (q0, q1) = (glam_quat(0.4), glam_quat(1.3));
        b.iter(|| black_box(q1) * black_box(q0))
    });

    g.bench_function("nalgebra", |b| {
        let (q0, q1) = (nalgebra_quat(0.4), nalgebra_quat(1.3));
        b.iter(|| black_box(q1) * black_box(q0))
    });

    g.finish();
}

fn quat_slerp(c: &mut Criterion) {
    let mut g = c.benchmark_group("quat_slerp");

    g.bench_function("lanemath", |b| {
        let (q0, q1) = (lanemath_quat(0.4), lanemath_quat(1.3));
        b.iter(|| black_box(q0).slerp(black_box(q1), black_box(0.3)))
    });

    g.bench_function("glam", |b| {
        let (q0, q1) = (glam_quat(0.4), glam_quat(1.3));
        b.iter(|| black_box(q0).slerp(black_box(q1), black_box(0.3)))
    });

    g.bench_function("nalgebra", |b| {
        let (q0, q1) = (nalgebra_quat(0.4), nalgebra_quat(1.3));
        b.iter(|| black_box(&q0).slerp(black_box(&q1), black_box(0.3)))
    });

    g.finish();
}

fn quat_rotate(c: &mut Criterion) {
    let mut g = c.benchmark_group("quat_rotate");

    g.bench_function("lanemath", |b| {
        let q = lanemath_quat(0.9);
        let v = lanemath::Vector::from_array(V0);
        b.iter(|| black_box(q).rotate(black_box(v)))
    });

    g.bench_function("lanemath_scalar", |b| {
        let q = scalar_quat(0.9);
        let v: lanemath::Vec4<Scalar> = lanemath::Vec4::from_array(V0);
        b.iter(|| black_box(q).rotate(black_box(v)))
    });

    g.bench_function("glam", |b| {
        let q = glam_quat(0.9);
        let v = glam::Vec3A::new(V0[0], V0[1], V0[2]);
        b.iter(|| black_box(q).mul_vec3a(black_box(v)))
    });

    g.bench_function("nalgebra", |b| {
        let q = nalgebra_quat(0.9);
        let v = nalgebra::Vector3::new(V0[0], V0[1], V0[2]);
        b.iter(|| black_box(&q).transform_vector(black_box(&v)))
    });

    g.finish();
}

// ---------------------------------------------------------------------------
// Matrix
// ---------------------------------------------------------------------------

fn mat4_mul(c: &mut Criterion) {
    let mut g = c.benchmark_group("mat4_mul");

    g.bench_function("lanemath", |b| {
        let m0 = lanemath::Matrix::new(rows(1.0));
        let m1 = lanemath::Matrix::new(rows(-2.0));
        b.iter(|| black_box(m0) * black_box(m1))
    });

    g.bench_function("lanemath_scalar", |b| {
        let m0: lanemath::Mat4<Scalar> = lanemath::Mat4::new(rows(1.0));
        let m1: lanemath::Mat4<Scalar> = lanemath::Mat4::new(rows(-2.0));
        b.iter(|| black_box(m0) * black_box(m1))
    });

    // glam and nalgebra are column-vector libraries; feeding them our rows as
    // columns computes the same product in the opposite order
    g.bench_function("glam", |b| {
        let m0 = glam::Mat4::from_cols_array_2d(&rows(1.0));
        let m1 = glam::Mat4::from_cols_array_2d(&rows(-2.0));
        b.iter(|| black_box(m1) * black_box(m0))
    });

    g.bench_function("nalgebra", |b| {
        let m0 = nalgebra::Matrix4::from_row_slice(rows(1.0).as_flattened());
        let m1 = nalgebra::Matrix4::from_row_slice(rows(-2.0).as_flattened());
        b.iter(|| black_box(&m0) * black_box(&m1))
    });

    g.finish();
}

fn mat4_transform(c: &mut Criterion) {
    let mut g = c.benchmark_group("mat4_transform");

    g.bench_function("lanemath", |b| {
        let m = lanemath::Matrix::new(rows(1.0));
        let v = lanemath::Vector::from_array(V0);
        b.iter(|| black_box(m).transform(black_box(v)))
    });

    g.bench_function("lanemath_scalar", |b| {
        let m: lanemath::Mat4<Scalar> = lanemath::Mat4::new(rows(1.0));
        let v: lanemath::Vec4<Scalar> = lanemath::Vec4::from_array(V0);
        b.iter(|| black_box(m).transform(black_box(v)))
    });

    g.bench_function("glam", |b| {
        let m = glam::Mat4::from_cols_array_2d(&rows(1.0));
        let v = glam::Vec4::from_array(V0);
        b.iter(|| black_box(m) * black_box(v))
    });

    g.bench_function("nalgebra", |b| {
        let m = nalgebra::Matrix4::from_row_slice(rows(1.0).as_flattened());
        let v = nalgebra::Vector4::from(V0);
        b.iter(|| black_box(&m).transpose() * black_box(&v))
    });

    g.finish();
}

fn mat4_transpose(c: &mut Criterion) {
    let mut g = c.benchmark_group("mat4_transpose");

    g.bench_function("lanemath", |b| {
        let m = lanemath::Matrix::new(rows(1.0));
        b.iter(|| black_box(m).transpose())
    });

    g.bench_function("glam", |b| {
        let m = glam::Mat4::from_cols_array_2d(&rows(1.0));
        b.iter(|| black_box(m).transpose())
    });

    g.bench_function("nalgebra", |b| {
        let m = nalgebra::Matrix4::from_row_slice(rows(1.0).as_flattened());
        b.iter(|| black_box(&m).transpose())
    });

    g.finish();
}

// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    vector_dot,
    vector_normalize,
    vector_cross3,
    quat_mul,
    quat_slerp,
    quat_rotate,
    mat4_mul,
    mat4_transform,
    mat4_transpose,
);
criterion_main!(benches);
