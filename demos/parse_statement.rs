use statement_text_rs::StatementBuilder;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let file_path = if args.len() > 1 {
        &args[1]
    } else {
        println!("Using demo statement text from demos/statement.txt\n");
        "demos/statement.txt"
    };

    let records = StatementBuilder::new().filename(file_path).parse_records()?;

    println!("Found {} transactions\n", records.len());

    for (i, record) in records.iter().enumerate() {
        println!("Transaction {}:", i + 1);
        println!("  Date: {}", record.date);
        println!("  Amount: {}", record.amount);
        if !record.description.is_empty() {
            println!("  Description: {}", record.description);
        }
        println!();
    }

    Ok(())
}
