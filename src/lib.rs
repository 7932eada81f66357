//! Userspace runtime for the teaching kernel: trap wrappers, a typed
//! process layer, console I/O, and the pieces initproc and the shell are
//! built from. Programs live under `src/bin/` and define `main`.
#![no_std]

extern crate alloc;

#[macro_use]
pub mod console;

pub mod command;
#[cfg(not(test))]
mod lang_items;
pub mod logging;
pub mod process;
pub mod supervisor;
mod syscall;

#[cfg(not(test))]
use buddy_system_allocator::LockedHeap;
use syscall::{sys_exit, sys_getpid, sys_read, sys_write, sys_yield};

pub use command::CommandLine;
pub use process::{exec, fork, wait, ExitStatus, ForkResult, Pid, SysError};
pub use syscall::{STDIN, STDOUT};

#[cfg(not(test))]
const USER_HEAP_SIZE: usize = 16384;

#[cfg(not(test))]
static mut HEAP_SPACE: [u8; USER_HEAP_SIZE] = [0; USER_HEAP_SIZE];

#[cfg(not(test))]
#[global_allocator]
static HEAP_ALLOCATOR: LockedHeap<32> = LockedHeap::empty();

#[cfg(not(test))]
#[no_mangle]
#[link_section = ".text.entry"]
pub extern "C" fn _start() -> ! {
    unsafe {
        HEAP_ALLOCATOR
            .lock()
            .init(core::ptr::addr_of!(HEAP_SPACE) as usize, USER_HEAP_SIZE);
    }
    logging::init();
    exit(unsafe { main() })
}

#[cfg(not(test))]
extern "Rust" {
    fn main() -> i32;
}

pub fn read(fd: usize, buffer: &mut [u8]) -> isize {
    sys_read(fd, buffer)
}

pub fn write(fd: usize, buffer: &[u8]) -> isize {
    sys_write(fd, buffer)
}

pub fn exit(exit_code: i32) -> ! {
    sys_exit(exit_code)
}

pub fn yield_() -> isize {
    sys_yield()
}

pub fn getpid() -> isize {
    sys_getpid()
}
