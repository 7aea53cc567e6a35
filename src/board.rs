//! Kanban view: tasks grouped into the three status columns.

use crate::model::{TaskStatus, Tugas};

pub struct Column<'a> {
    pub status: TaskStatus,
    pub tasks: Vec<&'a Tugas>,
}

/// Groups tasks into the fixed column order, preserving input order within
/// each column. Every task lands in exactly one column.
pub fn columns(tasks: &[Tugas]) -> [Column<'_>; 3] {
    TaskStatus::ALL.map(|status| Column {
        status,
        tasks: tasks.iter().filter(|task| task.status == status).collect(),
    })
}

pub fn render(tasks: &[Tugas]) -> String {
    let mut out = String::new();
    for column in columns(tasks) {
        out.push_str(&format!(
            "{} ({})\n",
            column.status.label(),
            column.tasks.len()
        ));
        if column.tasks.is_empty() {
            out.push_str("  No tasks yet\n");
        }
        for task in &column.tasks {
            let course = task
                .mata_kuliah
                .as_ref()
                .map(|course| course.nama.as_str())
                .unwrap_or("-");
            out.push_str(&format!(
                "  [{}] {:<32} {:<24} due {}\n",
                task.id,
                task.nama,
                course,
                task.deadline.format("%b %-d")
            ));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MataKuliahRef;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn task(id: &str, status: TaskStatus, deadline: &str) -> Tugas {
        Tugas {
            id: id.to_string(),
            nama: format!("Task {id}"),
            deskripsi: String::new(),
            status,
            deadline: deadline.parse::<NaiveDate>().unwrap(),
            mata_kuliah_id: "c1".to_string(),
            user_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            mata_kuliah: Some(MataKuliahRef {
                id: "c1".to_string(),
                nama: "Applied Statistics".to_string(),
                sks: 3,
            }),
        }
    }

    #[test]
    fn test_columns_cover_every_task_once() {
        let tasks = vec![
            task("1", TaskStatus::Pending, "2024-03-20"),
            task("2", TaskStatus::InProgress, "2024-03-11"),
            task("3", TaskStatus::InProgress, "2024-03-09"),
            task("4", TaskStatus::Completed, "2024-03-05"),
        ];
        let columns = columns(&tasks);

        assert_eq!(columns[0].status, TaskStatus::Pending);
        assert_eq!(columns[1].status, TaskStatus::InProgress);
        assert_eq!(columns[2].status, TaskStatus::Completed);

        let total: usize = columns.iter().map(|column| column.tasks.len()).sum();
        assert_eq!(total, tasks.len());
        assert_eq!(columns[1].tasks.len(), 2);
        // Input order is preserved within a column.
        assert_eq!(columns[1].tasks[0].id, "2");
        assert_eq!(columns[1].tasks[1].id, "3");
    }

    #[test]
    fn test_render_shows_counts_and_placeholder() {
        let tasks = vec![task("1", TaskStatus::Pending, "2024-03-20")];
        let rendered = render(&tasks);

        assert!(rendered.contains("Not Started (1)"));
        assert!(rendered.contains("In Progress (0)"));
        assert!(rendered.contains("No tasks yet"));
    }

    #[test]
    fn test_render_formats_short_deadline() {
        let tasks = vec![task("4", TaskStatus::Completed, "2024-03-05")];
        let rendered = render(&tasks);
        assert!(rendered.contains("due Mar 5"));
        assert!(rendered.contains("Applied Statistics"));
    }
}
