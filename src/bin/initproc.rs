#![no_std]
#![no_main]

#[macro_use]
extern crate ulib;

use log::{error, info, warn};
use ulib::supervisor::{Backoff, Reaped, Supervisor};
use ulib::{exec, exit, fork, wait, yield_, ForkResult, Pid};

const SHELL: &str = "user_shell\0";

#[no_mangle]
fn main() -> i32 {
    info!("[initproc] started, pid={}", ulib::getpid());
    let mut supervisor = Supervisor::new();
    loop {
        let shell = spawn_shell();
        supervisor.adopt_shell(shell);
        info!("[initproc] shell running, pid={}", shell);
        reap_until_shell_exits(&mut supervisor);
    }
}

/// Forks and execs a fresh shell, retrying until the fork sticks. Only the
/// parent side ever returns from here.
fn spawn_shell() -> Pid {
    loop {
        match fork() {
            Ok(ForkResult::Parent(pid)) => return pid,
            Ok(ForkResult::Child) => {
                let argv = [SHELL.as_ptr(), core::ptr::null()];
                let err = exec(SHELL, &argv);
                error!("[initproc] cannot start shell: {}", err);
                exit(1);
            }
            Err(err) => {
                warn!("[initproc] fork failed ({}), retrying", err);
                yield_();
            }
        }
    }
}

/// Drains zombies until the supervised shell itself is among them. Orphans
/// adopted through kernel reparenting are reaped and logged here, however
/// many generations down they were spawned.
fn reap_until_shell_exits(supervisor: &mut Supervisor) {
    loop {
        match wait() {
            Ok((pid, status)) => match supervisor.classify(pid, status) {
                Reaped::Shell(status) => {
                    info!("[initproc] shell exited with {}, restarting", status);
                    return;
                }
                Reaped::Orphan(pid, status) => {
                    info!(
                        "[initproc] reaped orphan pid={} status={} (total {})",
                        pid,
                        status,
                        supervisor.orphans_reaped()
                    );
                }
            },
            Err(_) => match supervisor.wait_miss() {
                Backoff::Retry => {
                    yield_();
                }
                Backoff::Respawn => {
                    warn!("[initproc] lost track of the shell, respawning");
                    return;
                }
            },
        }
    }
}
