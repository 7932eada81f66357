//! Raw trap ABI.
//!
//! The numbering must match the kernel's dispatch table exactly; it is a
//! binary contract, not an internal convention. Every call takes up to three
//! machine-word arguments in a0-a2, the number in a7, and returns one signed
//! machine word in a0 (negative meaning failure).

const SYSCALL_READ: usize = 63;
const SYSCALL_WRITE: usize = 64;
const SYSCALL_EXIT: usize = 93;
const SYSCALL_YIELD: usize = 124;
const SYSCALL_GETPID: usize = 172;
const SYSCALL_FORK: usize = 220;
const SYSCALL_EXEC: usize = 221;
const SYSCALL_WAIT: usize = 260;

pub const STDIN: usize = 0;
pub const STDOUT: usize = 1;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
fn syscall(id: usize, args: [usize; 3]) -> isize {
    let mut ret: isize;
    unsafe {
        core::arch::asm!(
            "ecall",
            inlateout("x10") args[0] => ret,
            in("x11") args[1],
            in("x12") args[2],
            in("x17") id,
        );
    }
    ret
}

// Host builds exist only so the pure logic can run under `cargo test`;
// nothing on the host may reach the trap layer.
#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
fn syscall(id: usize, _args: [usize; 3]) -> isize {
    unimplemented!("syscall {} needs a riscv kernel underneath", id)
}

pub fn sys_read(fd: usize, buffer: &mut [u8]) -> isize {
    syscall(SYSCALL_READ, [fd, buffer.as_mut_ptr() as usize, buffer.len()])
}

pub fn sys_write(fd: usize, buffer: &[u8]) -> isize {
    syscall(SYSCALL_WRITE, [fd, buffer.as_ptr() as usize, buffer.len()])
}

pub fn sys_exit(exit_code: i32) -> ! {
    syscall(SYSCALL_EXIT, [exit_code as usize, 0, 0]);
    panic!("Unreachable in sys_exit!");
}

pub fn sys_yield() -> isize {
    syscall(SYSCALL_YIELD, [0, 0, 0])
}

pub fn sys_getpid() -> isize {
    syscall(SYSCALL_GETPID, [0, 0, 0])
}

/// Duplicates the calling process. Returns 0 in the child, the child's pid
/// in the parent, negative when the kernel is out of resources.
pub fn sys_fork() -> isize {
    syscall(SYSCALL_FORK, [0, 0, 0])
}

/// `path` must be NUL-terminated; `args` holds NUL-terminated C strings and
/// ends with a null pointer. Returns only on failure.
pub fn sys_exec(path: &str, args: &[*const u8]) -> isize {
    syscall(
        SYSCALL_EXEC,
        [path.as_ptr() as usize, args.as_ptr() as usize, 0],
    )
}

/// Blocks until some child has exited, stores its status through the
/// pointer and returns its pid. Negative when the caller has no children.
pub fn sys_wait(exit_code: &mut i32) -> isize {
    syscall(SYSCALL_WAIT, [exit_code as *mut i32 as usize, 0, 0])
}
