//! The reaper state machine behind initproc.
//!
//! Exactly one child is "the shell"; every other pid a wait hands back is an
//! adopted orphan. The kernel reparents the children of a dead process to
//! initproc, so the orphan stream never ends while programs keep forking,
//! and none of those pids may ever be mistaken for the shell.

use crate::process::{ExitStatus, Pid};

/// Consecutive "no children" results tolerated before the shell is assumed
/// lost and respawned. A live shell makes that answer a kernel contract
/// violation, so it stays bounded instead of looping silently forever.
const WAIT_MISS_LIMIT: u32 = 16;

/// What a reaped pid turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaped {
    /// The supervised shell itself, with its exit status.
    Shell(ExitStatus),
    /// An adopted orphan.
    Orphan(Pid, ExitStatus),
}

/// Reaction to a wait call claiming there are no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Give up the time slice and ask again.
    Retry,
    /// Too many misses in a row; start a fresh shell.
    Respawn,
}

/// Owned by initproc's main loop, never a process-wide static.
pub struct Supervisor {
    shell: Option<Pid>,
    orphans_reaped: usize,
    wait_misses: u32,
}

impl Supervisor {
    pub const fn new() -> Supervisor {
        Supervisor {
            shell: None,
            orphans_reaped: 0,
            wait_misses: 0,
        }
    }

    /// Pid of the shell currently believed to be alive.
    pub fn shell(&self) -> Option<Pid> {
        self.shell
    }

    /// Orphans reaped over the supervisor's whole lifetime.
    pub fn orphans_reaped(&self) -> usize {
        self.orphans_reaped
    }

    /// Records a freshly spawned shell as the supervised child.
    pub fn adopt_shell(&mut self, pid: Pid) {
        self.shell = Some(pid);
        self.wait_misses = 0;
    }

    /// Sorts one reaped pid into "the shell died" or "an orphan died". The
    /// shell's pid is cleared on the spot; the caller is expected to spawn a
    /// replacement before waiting again.
    pub fn classify(&mut self, pid: Pid, status: ExitStatus) -> Reaped {
        self.wait_misses = 0;
        if self.shell == Some(pid) {
            self.shell = None;
            Reaped::Shell(status)
        } else {
            self.orphans_reaped += 1;
            Reaped::Orphan(pid, status)
        }
    }

    /// A wait reported no children while a shell should be alive. Loud in
    /// debug builds once the bound is hit; in release the supervisor gives
    /// up on the pid it was tracking and respawns.
    pub fn wait_miss(&mut self) -> Backoff {
        self.wait_misses += 1;
        if self.wait_misses >= WAIT_MISS_LIMIT {
            debug_assert!(
                false,
                "wait kept reporting no children while the shell should be alive"
            );
            self.wait_misses = 0;
            self.shell = None;
            Backoff::Respawn
        } else {
            Backoff::Retry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Pid;

    fn pid(raw: usize) -> Pid {
        Pid::from_raw(raw)
    }

    #[test]
    fn starts_with_no_shell() {
        let supervisor = Supervisor::new();
        assert_eq!(supervisor.shell(), None);
        assert_eq!(supervisor.orphans_reaped(), 0);
    }

    #[test]
    fn shell_exit_clears_the_supervised_pid() {
        let mut supervisor = Supervisor::new();
        supervisor.adopt_shell(pid(2));
        assert_eq!(supervisor.classify(pid(2), 0), Reaped::Shell(0));
        assert_eq!(supervisor.shell(), None);
        assert_eq!(supervisor.orphans_reaped(), 0);
    }

    #[test]
    fn other_pids_are_orphans() {
        let mut supervisor = Supervisor::new();
        supervisor.adopt_shell(pid(2));
        assert_eq!(supervisor.classify(pid(7), 3), Reaped::Orphan(pid(7), 3));
        assert_eq!(supervisor.classify(pid(8), 0), Reaped::Orphan(pid(8), 0));
        // The shell is still the shell afterwards.
        assert_eq!(supervisor.shell(), Some(pid(2)));
        assert_eq!(supervisor.orphans_reaped(), 2);
    }

    #[test]
    fn respawned_shell_replaces_the_old_identity() {
        let mut supervisor = Supervisor::new();
        supervisor.adopt_shell(pid(2));
        supervisor.classify(pid(2), 1);
        supervisor.adopt_shell(pid(9));
        // The dead shell's pid now counts as an orphan if it somehow
        // reappears; only the new pid is the shell.
        assert_eq!(supervisor.classify(pid(2), 0), Reaped::Orphan(pid(2), 0));
        assert_eq!(supervisor.classify(pid(9), 0), Reaped::Shell(0));
    }

    #[test]
    fn misses_below_the_bound_just_retry() {
        let mut supervisor = Supervisor::new();
        supervisor.adopt_shell(pid(2));
        for _ in 0..WAIT_MISS_LIMIT - 1 {
            assert_eq!(supervisor.wait_miss(), Backoff::Retry);
        }
        // A successful reap resets the counter.
        supervisor.classify(pid(5), 0);
        assert_eq!(supervisor.wait_miss(), Backoff::Retry);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic)]
    fn sustained_misses_hit_the_bound() {
        let mut supervisor = Supervisor::new();
        supervisor.adopt_shell(pid(2));
        let mut last = Backoff::Retry;
        for _ in 0..WAIT_MISS_LIMIT {
            last = supervisor.wait_miss();
        }
        // Only reached without debug assertions.
        assert_eq!(last, Backoff::Respawn);
        assert_eq!(supervisor.shell(), None);
    }
}
