//! Table and JSON rendering of records.

use anyhow::Result;

use userbase_types::User;

const HEADERS: [&str; 4] = ["ID", "NAME", "EMAIL", "AGE"];

/// Render records as an aligned table, one row per record.
pub fn table(users: &[User]) -> String {
    let rows: Vec<[String; 4]> = users
        .iter()
        .map(|u| [u.id.clone(), u.name.clone(), u.email.clone(), u.age.to_string()])
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(String::from), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn print_users(users: &[User], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(users)?);
    } else if users.is_empty() {
        println!("No users found.");
    } else {
        print!("{}", table(users));
    }
    Ok(())
}

pub fn print_user(user: &User, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        print!("{}", table(std::slice::from_ref(user)));
    }
    Ok(())
}
