use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rexlang_vm::config::{
    OP_DUP, OP_JUMP_REL_IF, OP_PUSH_U, OP_ST_U8_DISCARD, OP_SUB, OP_SWAP,
};
use rexlang_vm::{ProgramBuilder, Vm};
use std::hint::black_box;

const BENCH_GROUP_NAME: &str = "vm_exec";
const BUDGET: u32 = 1_000_000;

/// Decrement loop: 3 instructions per iteration.
fn countdown(iterations: u32) -> Vec<u8> {
    ProgramBuilder::new()
        .push(iterations)
        .op_imm8(OP_SUB, 1)
        .op(OP_DUP)
        .op_imm_signed(OP_JUMP_REL_IF, -5)
        .halt()
        .build()
}

/// Loop that also stores the counter into data memory each iteration.
fn store_loop(iterations: u32) -> Vec<u8> {
    let mut builder = ProgramBuilder::new();
    builder.push(iterations);
    let top = builder.position();
    builder
        .op_imm8(OP_SUB, 1)
        .op(OP_DUP)
        .op_imm8(OP_PUSH_U, 0)
        .op(OP_SWAP) // address below value
        .op(OP_ST_U8_DISCARD)
        .op(OP_DUP);
    let delta = top as i32 - (builder.position() + 2) as i32;
    builder.op_imm_signed(OP_JUMP_REL_IF, delta).halt();
    builder.build()
}

fn bench_exec(c: &mut Criterion) {
    let mut group = c.benchmark_group(BENCH_GROUP_NAME);
    for iterations in [100u32, 10_000] {
        let programs = [("countdown", countdown(iterations)), ("store_loop", store_loop(iterations))];
        for (label, program) in programs {
            group.throughput(Throughput::Elements(u64::from(iterations)));
            group.bench_with_input(BenchmarkId::new(label, iterations), &program, |b, program| {
                let mut data = [0u8; 16];
                b.iter(|| {
                    let mut vm = Vm::new(program, &mut data);
                    black_box(vm.run_to_halt(BUDGET))
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_exec);
criterion_main!(benches);
