//! Process-model scenarios run on top of the kernel. Each scenario prints
//! `<name>: OK` or takes the whole harness down with status 1 at the first
//! violated expectation.
#![no_std]
#![no_main]

#[macro_use]
extern crate ulib;

use ulib::{exit, fork, wait, ForkResult};

fn fail(name: &str, detail: &str) -> ! {
    println!("{}: {}", name, detail);
    exit(1)
}

/// A child that exits with its loop index must come back from wait as
/// exactly that pid/status pair.
fn exitwait(name: &str) {
    for i in 0..50 {
        match fork() {
            Err(_) => fail(name, "fork failed"),
            Ok(ForkResult::Child) => exit(i),
            Ok(ForkResult::Parent(pid)) => match wait() {
                Ok((reaped, status)) => {
                    if reaped != pid {
                        fail(name, "wait returned the wrong pid");
                    }
                    if status != i {
                        println!("{}: expected status {}, got {}", name, i, status);
                        exit(1);
                    }
                }
                Err(_) => fail(name, "wait failed"),
            },
        }
    }
    println!("{}: OK", name);
}

/// Two zombies per iteration, two waits to drain them, 50 times over,
/// without leaking a pid or hanging.
fn twochildren(name: &str) {
    for _ in 0..50 {
        for _ in 0..2 {
            match fork() {
                Err(_) => fail(name, "fork failed"),
                Ok(ForkResult::Child) => exit(0),
                Ok(ForkResult::Parent(_)) => {}
            }
        }
        for _ in 0..2 {
            if wait().is_err() {
                fail(name, "wait lost a child");
            }
        }
    }
    println!("{}: OK", name);
}

/// Two children each fork-and-reap 20 grandchildren sequentially; the
/// parent drains exactly its two children and both must report clean runs.
fn forkfork(name: &str) {
    const CHILDREN: usize = 2;
    const GRANDCHILDREN: usize = 20;

    for _ in 0..CHILDREN {
        match fork() {
            Err(_) => fail(name, "fork failed"),
            Ok(ForkResult::Child) => {
                for _ in 0..GRANDCHILDREN {
                    match fork() {
                        Err(_) => exit(1),
                        Ok(ForkResult::Child) => exit(0),
                        Ok(ForkResult::Parent(_)) => {
                            if wait().is_err() {
                                exit(1);
                            }
                        }
                    }
                }
                exit(0);
            }
            Ok(ForkResult::Parent(_)) => {}
        }
    }
    for _ in 0..CHILDREN {
        match wait() {
            Ok((_, 0)) => {}
            Ok((_, _)) => fail(name, "fork in child failed"),
            Err(_) => fail(name, "wait failed"),
        }
    }
    println!("{}: OK", name);
}

/// The child leaves two live grandchildren behind and exits immediately;
/// the kernel must hand them to initproc rather than lose them. Initproc's
/// orphan log is the external check: 100 adoptions over the 50 rounds.
fn reparent2(name: &str) {
    for _ in 0..50 {
        match fork() {
            Err(_) => fail(name, "fork failed"),
            Ok(ForkResult::Child) => {
                for _ in 0..2 {
                    if let Ok(ForkResult::Child) = fork() {
                        exit(0);
                    }
                }
                exit(0);
            }
            Ok(ForkResult::Parent(_)) => {
                if wait().is_err() {
                    fail(name, "wait failed");
                }
            }
        }
    }
    println!("{}: OK", name);
}

#[no_mangle]
pub fn main() -> i32 {
    println!("usertests: starting");
    exitwait("exitwait");
    twochildren("twochildren");
    forkfork("forkfork");
    reparent2("reparent2");
    println!("usertests: ALL TESTS PASSED");
    0
}
