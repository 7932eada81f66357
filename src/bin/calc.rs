//! Adds two integers read from the console; exercises the read path end to
//! end without forking.
#![no_std]
#![no_main]

#[macro_use]
extern crate ulib;

use ulib::console::read_line;

fn read_number(prompt: &str) -> i32 {
    loop {
        print!("{}", prompt);
        let line = read_line();
        match line.trim().parse() {
            Ok(value) => return value,
            Err(_) => println!("not a number: {}", line.trim()),
        }
    }
}

#[no_mangle]
pub fn main() -> i32 {
    println!("calc: adds two integers");
    let a = read_number("Enter A: ");
    let b = read_number("Enter B: ");
    match a.checked_add(b) {
        Some(sum) => {
            println!("Result: {}", sum);
            0
        }
        None => {
            println!("result out of range");
            1
        }
    }
}
