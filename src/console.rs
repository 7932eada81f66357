use alloc::string::String;
use core::fmt::{self, Write};

use spin::Mutex;

use crate::syscall::{sys_read, sys_write, STDIN, STDOUT};

const LF: u8 = 0x0a;
const CR: u8 = 0x0d;
const BS: u8 = 0x08;
const DL: u8 = 0x7f;

struct Stdout;

// Serializes whole `write_fmt` calls so lines from forked children do not
// shear mid-formatting.
static STDOUT_LOCK: Mutex<Stdout> = Mutex::new(Stdout);

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        sys_write(STDOUT, s.as_bytes());
        Ok(())
    }
}

pub fn print(args: fmt::Arguments) {
    STDOUT_LOCK.lock().write_fmt(args).unwrap();
}

#[macro_export]
macro_rules! print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!($fmt $(, $($arg)+)?));
    }
}

#[macro_export]
macro_rules! println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?));
    }
}

pub fn getchar() -> u8 {
    let mut c = [0u8; 1];
    sys_read(STDIN, &mut c);
    c[0]
}

/// Reads one line from stdin with echo. CR or LF ends the line; backspace
/// and DEL erase the last character (visually with `\x08 \x08`). Returns the
/// line without its terminator, or whatever was gathered so far if a read
/// fails.
pub fn read_line() -> String {
    let mut line = String::new();
    loop {
        let mut byte = [0u8; 1];
        if sys_read(STDIN, &mut byte) < 1 {
            break;
        }
        match byte[0] {
            CR | LF => {
                println!("");
                break;
            }
            BS | DL => {
                if line.pop().is_some() {
                    print!("{0} {0}", BS as char);
                }
            }
            ch => {
                print!("{}", ch as char);
                line.push(ch as char);
            }
        }
    }
    line
}
