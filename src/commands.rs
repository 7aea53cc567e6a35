//! One-shot command handlers: validate input, call the gateway, print the
//! result. Shared by the clap subcommands and the interactive shell.

use crate::api::Client;
use crate::board;
use crate::model::{
    LoginRequest, MataKuliah, MataKuliahPayload, RegisterRequest, TaskStatus, Tugas, TugasPayload,
};
use crate::validate;
use anyhow::Result;
use chrono::NaiveDate;

pub fn login(client: &Client, identifier: &str, password: &str) -> Result<()> {
    validate::login(identifier, password)?;
    let auth = client.login(&LoginRequest::from_identifier(identifier, password))?;
    println!("Welcome back, {}!", auth.user.name);
    Ok(())
}

pub fn register(
    client: &Client,
    name: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    validate::register(name, username, email, password)?;
    let auth = client.register(&RegisterRequest {
        name: name.to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })?;
    println!("Welcome, {}!", auth.user.name);
    Ok(())
}

pub fn logout(client: &Client) -> Result<()> {
    client.logout()?;
    println!("Logged out.");
    Ok(())
}

pub fn whoami(client: &Client) -> Result<()> {
    match client.session().user() {
        Some(user) if !client.session().is_expired() => {
            println!("{} <{}>", user.name, user.email);
        }
        Some(_) => println!("Session expired. Please login again."),
        None => println!("Not logged in."),
    }
    Ok(())
}

// Courses

pub fn course_list(client: &Client) -> Result<()> {
    let courses = client.list_mata_kuliah()?;
    if courses.is_empty() {
        println!("No courses yet.");
        return Ok(());
    }
    println!("{:<26} {:<32} {:>4} {:>6}", "ID", "NAME", "SKS", "TASKS");
    for course in &courses {
        let tasks = course
            .count
            .as_ref()
            .map(|count| count.tugas.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<26} {:<32} {:>4} {:>6}",
            course.id, course.nama, course.sks, tasks
        );
    }
    Ok(())
}

pub fn course_show(client: &Client, id: &str) -> Result<()> {
    let course = client.get_mata_kuliah(id)?;
    print_course(&course);
    Ok(())
}

pub fn course_add(client: &Client, name: &str, sks: u8, description: Option<&str>) -> Result<()> {
    validate::course(Some(name), description, Some(sks))?;
    let course = client.create_mata_kuliah(&MataKuliahPayload {
        nama: Some(name.to_string()),
        deskripsi: description.map(str::to_string),
        sks: Some(sks),
    })?;
    println!("Added course {} ({})", course.nama, course.id);
    Ok(())
}

pub fn course_edit(
    client: &Client,
    id: &str,
    name: Option<&str>,
    sks: Option<u8>,
    description: Option<&str>,
) -> Result<()> {
    validate::course(name, description, sks)?;
    let course = client.update_mata_kuliah(
        id,
        &MataKuliahPayload {
            nama: name.map(str::to_string),
            deskripsi: description.map(str::to_string),
            sks,
        },
    )?;
    println!("Updated course {} ({})", course.nama, course.id);
    Ok(())
}

pub fn course_rm(client: &Client, id: &str) -> Result<()> {
    client.delete_mata_kuliah(id)?;
    println!("Deleted course {id}.");
    Ok(())
}

// Tasks

pub fn task_list(client: &Client, course: Option<&str>, status: Option<TaskStatus>) -> Result<()> {
    let mut tasks = client.list_tugas()?;
    if let Some(course) = course {
        tasks.retain(|task| {
            task.mata_kuliah_id == course
                || task
                    .mata_kuliah
                    .as_ref()
                    .is_some_and(|summary| summary.nama == course)
        });
    }
    if let Some(status) = status {
        tasks.retain(|task| task.status == status);
    }

    if tasks.is_empty() {
        println!("No tasks yet.");
        return Ok(());
    }
    println!(
        "{:<26} {:<32} {:<12} {:<11} {}",
        "ID", "NAME", "STATUS", "DUE", "COURSE"
    );
    for task in &tasks {
        let course = task
            .mata_kuliah
            .as_ref()
            .map(|summary| summary.nama.as_str())
            .unwrap_or("-");
        println!(
            "{:<26} {:<32} {:<12} {:<11} {}",
            task.id,
            task.nama,
            task.status.label(),
            task.deadline,
            course
        );
    }
    Ok(())
}

pub fn task_show(client: &Client, id: &str) -> Result<()> {
    let task = client.get_tugas(id)?;
    print_task(&task);
    Ok(())
}

pub fn task_add(
    client: &Client,
    name: &str,
    course: &str,
    deadline: NaiveDate,
    description: Option<&str>,
) -> Result<()> {
    validate::task(Some(name), Some(course), description)?;
    let task = client.create_tugas(&TugasPayload {
        nama: Some(name.to_string()),
        deskripsi: description.map(str::to_string),
        status: None,
        deadline: Some(deadline),
        mata_kuliah_id: Some(course.to_string()),
    })?;
    println!("Added task {} ({})", task.nama, task.id);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn task_edit(
    client: &Client,
    id: &str,
    name: Option<&str>,
    course: Option<&str>,
    deadline: Option<NaiveDate>,
    status: Option<TaskStatus>,
    description: Option<&str>,
) -> Result<()> {
    validate::task(name, course, description)?;
    let task = client.update_tugas(
        id,
        &TugasPayload {
            nama: name.map(str::to_string),
            deskripsi: description.map(str::to_string),
            status,
            deadline,
            mata_kuliah_id: course.map(str::to_string),
        },
    )?;
    println!("Updated task {} ({})", task.nama, task.id);
    Ok(())
}

pub fn task_rm(client: &Client, id: &str) -> Result<()> {
    client.delete_tugas(id)?;
    println!("Deleted task {id}.");
    Ok(())
}

pub fn task_move(client: &Client, id: &str, status: TaskStatus) -> Result<()> {
    let task = client.update_tugas(
        id,
        &TugasPayload {
            status: Some(status),
            ..Default::default()
        },
    )?;
    println!("Moved {} to {}.", task.nama, status.label());
    Ok(())
}

pub fn show_board(client: &Client) -> Result<()> {
    let tasks = client.list_tugas()?;
    print!("{}", board::render(&tasks));
    Ok(())
}

fn print_course(course: &MataKuliah) {
    println!("{} ({})", course.nama, course.id);
    println!("  SKS:         {}", course.sks);
    if !course.deskripsi.is_empty() {
        println!("  Description: {}", course.deskripsi);
    }
    if let Some(count) = &course.count {
        println!("  Tasks:       {}", count.tugas);
    }
    println!("  Updated:     {}", course.updated_at.format("%Y-%m-%d %H:%M"));
}

fn print_task(task: &Tugas) {
    println!("{} ({})", task.nama, task.id);
    println!("  Status:      {}", task.status.label());
    println!("  Due:         {}", task.deadline);
    if let Some(course) = &task.mata_kuliah {
        println!("  Course:      {} ({} SKS)", course.nama, course.sks);
    } else {
        println!("  Course:      {}", task.mata_kuliah_id);
    }
    if !task.deskripsi.is_empty() {
        println!("  Description: {}", task.deskripsi);
    }
    println!("  Updated:     {}", task.updated_at.format("%Y-%m-%d %H:%M"));
}
