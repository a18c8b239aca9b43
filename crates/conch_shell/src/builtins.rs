//! Built-in commands and their registry.
//!
//! `Builtins` is the host's concrete native-function registry: a fixed
//! table of bare command names mapped to an executable and its man text.
//! The interpreter sees it only through the `NativeRegistry` trait.

use conch_interp::{NativeRegistry, Value};
use std::env;
use std::fs;
use std::path::Path;

/// One native command: its name, man text, and implementation.
struct Builtin {
    name: &'static str,
    help: &'static str,
    run: fn(&[Value]) -> i32,
}

const TABLE: &[Builtin] = &[
    Builtin {
        name: "echo",
        help: "echo [args...] - print the arguments separated by spaces",
        run: echo,
    },
    Builtin {
        name: "cd",
        help: "cd [dir] - change the working directory (home when omitted)",
        run: cd,
    },
    Builtin {
        name: "pwd",
        help: "pwd - print the working directory",
        run: pwd,
    },
    Builtin {
        name: "ls",
        help: "ls [dir] - list a directory (the working directory when omitted)",
        run: ls,
    },
    Builtin {
        name: "man",
        help: "man <command> - show help for a built-in command",
        run: man,
    },
];

/// The built-in command registry.
pub struct Builtins;

impl NativeRegistry for Builtins {
    fn has(&self, name: &str) -> bool {
        TABLE.iter().any(|builtin| builtin.name == name)
    }

    fn exec(&mut self, name: &str, args: &[Value]) -> i32 {
        match TABLE.iter().find(|builtin| builtin.name == name) {
            Some(builtin) => (builtin.run)(args),
            None => 127,
        }
    }

    fn man(&mut self, name: &str) -> bool {
        match TABLE.iter().find(|builtin| builtin.name == name) {
            Some(builtin) => {
                println!("{}", builtin.help);
                true
            }
            None => false,
        }
    }
}

fn echo(args: &[Value]) -> i32 {
    let line = args
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", line);
    0
}

fn cd(args: &[Value]) -> i32 {
    let target = match args.first() {
        Some(value) => value.to_string(),
        None => match env::var("HOME").or_else(|_| env::var("USERPROFILE")) {
            Ok(home) => home,
            Err(_) => {
                eprintln!("cd: no home directory");
                return 1;
            }
        },
    };

    match env::set_current_dir(Path::new(&target)) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("cd: {}: {}", target, error);
            1
        }
    }
}

fn pwd(_args: &[Value]) -> i32 {
    match env::current_dir() {
        Ok(dir) => {
            println!("{}", dir.display());
            0
        }
        Err(error) => {
            eprintln!("pwd: {}", error);
            1
        }
    }
}

fn ls(args: &[Value]) -> i32 {
    let target = args
        .first()
        .map(|value| value.to_string())
        .unwrap_or_else(|| ".".to_string());

    let entries = match fs::read_dir(&target) {
        Ok(entries) => entries,
        Err(error) => {
            eprintln!("ls: {}: {}", target, error);
            return 1;
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let mut name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                name.push('/');
            }
            name
        })
        .collect();
    names.sort();

    for name in names {
        println!("{}", name);
    }
    0
}

fn man(args: &[Value]) -> i32 {
    let name = match args.first() {
        Some(value) => value.to_string(),
        None => {
            eprintln!("man: which command?");
            return 1;
        }
    };

    match TABLE.iter().find(|builtin| builtin.name == name) {
        Some(builtin) => {
            println!("{}", builtin.help);
            0
        }
        None => {
            eprintln!("man: no entry for '{}'", name);
            1
        }
    }
}
