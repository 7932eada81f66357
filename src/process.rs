//! Typed view of the process primitives.
//!
//! The wire contract stays "one signed machine word"; this module is the
//! single place where that convention is translated into types, so the
//! programs above it never compare raw integers against sentinel values.

use core::fmt;

use crate::syscall::{sys_exec, sys_fork, sys_wait, sys_yield};

/// Identity of a live or exited-but-unreaped process. Non-negative by
/// construction; the primitive layer's negative values never become a `Pid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pid(usize);

impl Pid {
    pub(crate) const fn from_raw(raw: usize) -> Pid {
        Pid(raw)
    }

    pub fn as_raw(self) -> usize {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw integer a process handed to `exit`. No structured encoding.
pub type ExitStatus = i32;

/// Which side of a fork the caller came out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    Child,
    Parent(Pid),
}

/// Everything the primitive layer can report, one variant per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysError {
    /// fork refused: the kernel is out of task slots or memory.
    ResourceExhausted,
    /// exec came back: no loadable image under that name.
    ImageLoadFailed,
    /// wait with nothing left to reap.
    NoChildren,
}

impl fmt::Display for SysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysError::ResourceExhausted => write!(f, "resource exhausted"),
            SysError::ImageLoadFailed => write!(f, "cannot load image"),
            SysError::NoChildren => write!(f, "no children"),
        }
    }
}

pub fn fork() -> Result<ForkResult, SysError> {
    translate_fork(sys_fork())
}

fn translate_fork(raw: isize) -> Result<ForkResult, SysError> {
    match raw {
        0 => Ok(ForkResult::Child),
        pid if pid > 0 => Ok(ForkResult::Parent(Pid::from_raw(pid as usize))),
        _ => Err(SysError::ResourceExhausted),
    }
}

/// Replaces the calling process image with `path`. Never returns on success,
/// so the failure is the return value rather than a `Result`.
pub fn exec(path: &str, args: &[*const u8]) -> SysError {
    debug_assert!(path.ends_with('\0'), "exec path must be NUL-terminated");
    sys_exec(path, args);
    SysError::ImageLoadFailed
}

/// Reaps any exited child, blocking until one is available.
///
/// When several children are zombies at once the kernel may hand back any of
/// them; callers must not assume an order. On kernels that poll instead of
/// block, the yield-and-retry loop makes the observable behavior the same.
pub fn wait() -> Result<(Pid, ExitStatus), SysError> {
    let mut exit_code: i32 = 0;
    loop {
        match translate_wait(sys_wait(&mut exit_code), exit_code) {
            Some(result) => return result,
            None => {
                sys_yield();
            }
        }
    }
}

/// `None` is the polling kernel's "children alive, none exited yet": the
/// caller gives up its time slice and asks again. A reaped pid of 0 is a
/// valid identity, not an error.
fn translate_wait(raw: isize, exit_code: ExitStatus) -> Option<Result<(Pid, ExitStatus), SysError>> {
    match raw {
        -2 => None,
        pid if pid >= 0 => Some(Ok((Pid::from_raw(pid as usize), exit_code))),
        _ => Some(Err(SysError::NoChildren)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_zero_is_the_child_side() {
        assert_eq!(translate_fork(0), Ok(ForkResult::Child));
    }

    #[test]
    fn fork_positive_is_the_parent_side() {
        assert_eq!(
            translate_fork(3),
            Ok(ForkResult::Parent(Pid::from_raw(3)))
        );
    }

    #[test]
    fn fork_negative_means_exhaustion() {
        assert_eq!(translate_fork(-1), Err(SysError::ResourceExhausted));
        assert_eq!(translate_fork(-12), Err(SysError::ResourceExhausted));
    }

    #[test]
    fn wait_pairs_pid_with_its_status() {
        assert_eq!(
            translate_wait(7, 42),
            Some(Ok((Pid::from_raw(7), 42)))
        );
    }

    #[test]
    fn wait_pid_zero_is_a_valid_identity() {
        assert_eq!(translate_wait(0, 5), Some(Ok((Pid::from_raw(0), 5))));
    }

    #[test]
    fn wait_minus_two_asks_for_a_retry() {
        // The blocking wrapper yields and calls again on this result.
        assert_eq!(translate_wait(-2, 0), None);
    }

    #[test]
    fn wait_other_negatives_mean_no_children() {
        assert_eq!(translate_wait(-1, 0), Some(Err(SysError::NoChildren)));
        assert_eq!(translate_wait(-10, 0), Some(Err(SysError::NoChildren)));
    }
}
