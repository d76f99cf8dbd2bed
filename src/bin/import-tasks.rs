//! Bulk-import tasks from a CSV file.
//!
//! A pure client of the task API: reads rows with `title` and
//! `description` columns and issues one POST per row. Rows the server
//! rejects are reported and skipped; the run continues.

use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "import-tasks")]
#[command(about = "Bulk-import tasks from a CSV file", long_about = None)]
struct Args {
    /// CSV file with a title,description header row.
    #[arg(short, long, default_value = "tasks-upload.csv")]
    file: PathBuf,

    /// Base URL of the task service.
    #[arg(short, long, default_value = "http://127.0.0.1:3333")]
    url: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct TaskRow {
    title: String,
    description: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let client = reqwest::Client::new();

    let mut reader = csv::Reader::from_path(&args.file)?;
    let mut created = Vec::new();
    let mut failed = 0usize;

    for (index, record) in reader.deserialize::<TaskRow>().enumerate() {
        let row_number = index + 1;
        let row = match record {
            Ok(row) => row,
            Err(error) => {
                eprintln!("row {row_number}: unreadable record: {error}");
                failed += 1;
                continue;
            }
        };

        let response = client.post(format!("{}/tasks", args.url)).json(&row).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;

        if status.is_success() {
            created.push(body);
        } else {
            eprintln!("row {row_number}: server returned {status}: {body}");
            failed += 1;
        }
    }

    println!("created {} tasks ({failed} failed)", created.len());
    println!("{}", serde_json::to_string_pretty(&created)?);
    Ok(())
}
