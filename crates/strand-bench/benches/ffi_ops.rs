//! Criterion benchmarks for the C ABI. Compare with `list_ops` for the
//! cost of handle lookup and table locking.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use strand_ffi::{
    strand_iterator_create, strand_iterator_destroy, strand_iterator_next, strand_list_create,
    strand_list_destroy, strand_list_find, strand_list_insert_end, StrandStatus,
};

const N: u64 = 1024;
const OK: i32 = StrandStatus::Ok as i32;

fn ffi_list(n: u64) -> u64 {
    let mut handle = 0;
    assert_eq!(strand_list_create(&mut handle), OK);
    for v in 1..=n {
        assert_eq!(strand_list_insert_end(handle, v), OK);
    }
    handle
}

fn bench_ffi_build(c: &mut Criterion) {
    c.bench_function("ffi_build_destroy_1k", |b| {
        b.iter(|| {
            let handle = ffi_list(N);
            strand_list_destroy(black_box(handle))
        });
    });
}

fn bench_ffi_find(c: &mut Criterion) {
    let handle = ffi_list(N);
    c.bench_function("ffi_find_tail_1k", |b| {
        let mut index = 0usize;
        b.iter(|| strand_list_find(handle, black_box(N), &mut index));
    });
    strand_list_destroy(handle);
}

fn bench_ffi_walk(c: &mut Criterion) {
    let handle = ffi_list(N);
    c.bench_function("ffi_iterate_1k", |b| {
        b.iter(|| {
            let mut it = 0;
            assert_eq!(strand_iterator_create(handle, 0, &mut it), OK);
            let mut steps = 0u32;
            while strand_iterator_next(it) == OK {
                steps += 1;
            }
            strand_iterator_destroy(it);
            steps
        });
    });
    strand_list_destroy(handle);
}

criterion_group!(benches, bench_ffi_build, bench_ffi_find, bench_ffi_walk);
criterion_main!(benches);
