use crate::api::Client;
use crate::commands;
use crate::model::TaskStatus;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub fn run_repl(client: &Client) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("tugas - type 'help' for commands, 'exit' to quit");

    loop {
        match rl.readline("tugas> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                rl.add_history_entry(line)?;

                match handle_command(client, line) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Input error: {err}");
                break;
            }
        }
    }

    Ok(())
}

/// Returns true when the shell should exit.
fn handle_command(client: &Client, line: &str) -> Result<bool> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts[0] {
        "exit" | "quit" => return Ok(true),
        "help" => {
            println!("Commands:");
            println!("  board                 - show the kanban board");
            println!("  tasks [status]        - list tasks, optionally filtered by status");
            println!("  courses               - list courses");
            println!("  move <id> <status>    - move a task to another column");
            println!("  whoami                - show the logged-in user");
            println!("  login <user> <pass>   - log in with an email or username");
            println!("  logout                - log out");
            println!("  exit                  - quit");
        }
        "board" => commands::show_board(client)?,
        "tasks" => {
            let status = if parts.len() > 1 {
                Some(parts[1..].join(" ").parse::<TaskStatus>()?)
            } else {
                None
            };
            commands::task_list(client, None, status)?;
        }
        "courses" => commands::course_list(client)?,
        "move" => {
            if parts.len() < 3 {
                println!("Usage: move <id> <status>");
            } else {
                let status = parts[2..].join(" ").parse::<TaskStatus>()?;
                commands::task_move(client, parts[1], status)?;
            }
        }
        "whoami" => commands::whoami(client)?,
        "login" => {
            if parts.len() != 3 {
                println!("Usage: login <email-or-username> <password>");
            } else {
                commands::login(client, parts[1], parts[2])?;
            }
        }
        "logout" => commands::logout(client)?,
        other => println!("Unknown command: {other} (try 'help')"),
    }
    Ok(false)
}
