//! Visible-interleaving demo: three workers print in lockstep with a busy
//! wait between lines while the parent blocks in wait.
#![no_std]
#![no_main]

#[macro_use]
extern crate ulib;

use ulib::{exit, fork, wait, ForkResult};

const WORKERS: usize = 3;
const ROUNDS: usize = 5;
/// Spins long enough for the scheduler to interleave the workers.
const DELAY: usize = 50_000;

fn worker(id: usize) -> ! {
    for round in 0..ROUNDS {
        println!("Task {}: {}", id, round);
        for _ in 0..DELAY {
            core::hint::spin_loop();
        }
    }
    exit(0)
}

#[no_mangle]
pub fn main() -> i32 {
    println!("multitest: forking {} workers", WORKERS);
    for id in 1..=WORKERS {
        match fork() {
            Err(err) => {
                println!("multitest: fork failed: {}", err);
                return 1;
            }
            Ok(ForkResult::Child) => worker(id),
            Ok(ForkResult::Parent(_)) => {}
        }
    }
    for _ in 0..WORKERS {
        match wait() {
            Ok((pid, _)) => println!("multitest: worker {} finished", pid),
            Err(err) => {
                println!("multitest: wait failed: {}", err);
                return 1;
            }
        }
    }
    println!("multitest: done");
    0
}
