#![no_std]
#![no_main]

#[macro_use]
extern crate ulib;

use ulib::console::read_line;
use ulib::{exec, exit, fork, wait, CommandLine, ForkResult};

#[no_mangle]
pub fn main() -> i32 {
    println!("RISC-V user shell");
    loop {
        print!(">> ");
        let line = read_line();
        let command = CommandLine::parse(&line);
        if command.is_empty() {
            continue;
        }
        if command.token(0) == "exit" {
            exit(0);
        }
        match fork() {
            Ok(ForkResult::Child) => {
                let argv = command.argv();
                exec(command.program(), &argv);
                println!("command not found: {}", command.token(0));
                exit(1);
            }
            Ok(ForkResult::Parent(_)) => {
                // One child in flight, so reaping "any" child reaps that
                // one. The status only matters to whoever runs the command.
                let _ = wait();
            }
            Err(err) => {
                println!("sh: fork failed: {}", err);
            }
        }
    }
}
