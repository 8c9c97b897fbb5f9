use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use expense_tracker::{
    CategoryName, Description, NewCategory, NewTransaction, count_categories, count_transactions,
    create_category, create_transaction, get_budget, initialize_db, unit_of_work,
};

/// A utility for creating a test database for the expense tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const CATEGORIES: [(&str, &str); 4] = [
    ("Groceries", "Supermarket and market shopping"),
    ("Transport", "Fuel, fares and parking"),
    ("Rent", "Monthly rent"),
    ("Entertainment", "Movies, concerts and eating out"),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let mut conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test categories and transactions...");

    let now = OffsetDateTime::now_utc();

    unit_of_work(&mut conn, |transaction| {
        for (index, (name, description)) in CATEGORIES.iter().enumerate() {
            let category = create_category(
                NewCategory {
                    name: CategoryName::new(name)?,
                    description: Some(Description::new(description)?),
                },
                transaction,
            )?;

            // Spread a few expenses per category over the last few months.
            for week in 0..12i64 {
                let amount = 5.0 + (index as f64 + 1.0) * 7.25 + week as f64;

                create_transaction(
                    NewTransaction::build(amount, category.id)
                        .date(now - Duration::weeks(week * 2 + index as i64))
                        .description(Description::new(&format!("{name} #{}", week + 1))?),
                    transaction,
                )?;
            }
        }

        Ok(())
    })?;

    println!(
        "Created {} categories and {} transactions, {:.2} spent in total.",
        count_categories(&conn)?,
        count_transactions(&conn)?,
        get_budget(&conn)?.total_spent
    );
    println!("Success!");

    Ok(())
}
