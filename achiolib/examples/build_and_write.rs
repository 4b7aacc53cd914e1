use achiolib::{
    batch::Batch,
    file::File,
    records::{batch_header::BatchHeader, entry_detail::EntryDetail},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: собираем PPD-файл с одной зарплатной проводкой (stdout)
    let mut bh = BatchHeader::new();
    bh.service_class_code = 220;
    bh.standard_entry_class_code = "PPD".to_string();
    bh.company_name = "ACME Corporation".to_string();
    bh.company_identification = "121042882".to_string();
    bh.company_entry_description = "PAYROLL".to_string();
    bh.odfi_identification = "12104288".to_string();

    let mut entry = EntryDetail::new();
    entry.transaction_code = 22;
    entry.set_rdfi("231380104")?;
    entry.dfi_account_number = "62292250".to_string();
    entry.amount = 100_000;
    entry.individual_name = "Wade Arnold".to_string();

    let mut batch = Batch::from_header(bh);
    batch.add_entry(entry);

    let mut file = File::new();
    file.header.immediate_destination = "231380104".to_string();
    file.header.immediate_origin = "121042882".to_string();
    file.header.immediate_destination_name = "Federal Reserve Bank".to_string();
    file.header.immediate_origin_name = "My Bank Name".to_string();
    file.add_batch(batch);
    file.create()?;

    achiolib::writer::Writer::new(std::io::stdout()).write(&file)?;
    Ok(())
}
