use achiolib::{
    error::{AchError, Result},
    reader::Reader,
    writer::Writer,
};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};

#[derive(Parser, Debug)]
#[command(name = "achio", version, about = "Просмотр и проверка файлов ACH (NACHA)")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Перезаписать нормализованный файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Печать дерева файла в JSON вместо сводки
    #[arg(long = "json")]
    json: bool,

    /// Пересобрать и записать файл после чтения
    #[arg(long = "reformat")]
    reformat: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // reader
    let input: Box<dyn io::Read> = match cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let ach_file = Reader::new(BufReader::new(input)).read()?;

    if cli.json {
        let json = serde_json::to_string_pretty(&ach_file)
            .map_err(|e| AchError::Structure(e.to_string()))?;
        println!("{json}");
    } else {
        let mut entries = 0usize;
        for batch in &ach_file.batches {
            entries += batch.entries.len();
        }
        println!("Batches: {}", ach_file.control.batch_count);
        println!("Entries: {}", entries);
        println!(
            "Total Amount Debit: {}",
            ach_file.control.total_debit_entry_dollar_amount
        );
        println!(
            "Total Amount Credit: {}",
            ach_file.control.total_credit_entry_dollar_amount
        );
        for batch in &ach_file.batches {
            println!(
                "Batch {}: {} {} ({} entries)",
                batch.header.batch_number,
                batch.header.standard_entry_class_code,
                batch.header.company_entry_description,
                batch.entries.len(),
            );
        }
    }

    if cli.reformat {
        let output: Box<dyn Write> = match cli.output {
            Some(path) => Box::new(File::create(path)?),
            None => Box::new(io::stdout()),
        };
        let mut normalized = ach_file;
        normalized.create()?;
        Writer::new(output).write(&normalized)?;
    }
    Ok(())
}
