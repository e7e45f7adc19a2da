use oxd::process::{column_maxima, load_table, RunningMaxima, CAP_COLUMN, OXD_COLUMN};
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one CLI argument: path to a CSV table.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <CSV_FILE>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect_csv(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Print the shape of the table, the maximum of each column and the
/// oxidation degree the batch run would report for it.
fn inspect_csv(path: &Path) -> anyhow::Result<()> {
    let table = load_table(path)?;

    println!("=== CSV File: {} ===", path.display());
    println!("Rows:    {}", table.len());
    println!("Fields:  {}", table.width());
    println!();

    println!("=== Column maxima ===");
    let header = table.rows.first();
    for (idx, max) in column_maxima(&table).iter().enumerate() {
        let label = header.and_then(|h| h.get(idx)).map_or("", String::as_str);
        let marker = match idx {
            OXD_COLUMN => " (oxd)",
            CAP_COLUMN => " (cap)",
            _ => "",
        };
        println!("- [{:>2}] {:<24} {}{}", idx, label, max, marker);
    }
    println!();

    let maxima = RunningMaxima::from_table(&table);
    println!("Oxidation degree: {}", maxima.oxidation_degree());
    Ok(())
}
