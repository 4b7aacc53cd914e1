use achiolib::batch::Batch;
use achiolib::error::AchError;
use achiolib::records::addenda::{Addenda, Addenda02, Addenda05, Addenda98, Addenda99};
use achiolib::records::batch_header::BatchHeader;
use achiolib::records::entry_detail::{Category, EntryDetail};
use achiolib::sec::SecCode;

fn batch_field(err: AchError) -> &'static str {
    match err {
        AchError::Batch(e) => e.field_name,
        other => panic!("expected a batch error, got {other}"),
    }
}

fn header(sec: &str, service_class: u16) -> BatchHeader {
    let mut bh = BatchHeader::new();
    bh.service_class_code = service_class;
    bh.standard_entry_class_code = sec.to_string();
    bh.company_name = "ACME Corporation".to_string();
    bh.company_identification = "121042882".to_string();
    bh.company_entry_description = "PAYROLL".to_string();
    bh.odfi_identification = "12104288".to_string();
    bh
}

fn entry(transaction_code: u8, amount: u64) -> EntryDetail {
    let mut e = EntryDetail::new();
    e.transaction_code = transaction_code;
    e.set_rdfi("231380104").expect("rdfi");
    e.dfi_account_number = "123456789".to_string();
    e.amount = amount;
    e.individual_name = "Wade Arnold".to_string();
    e.set_trace_number("12104288", 1).expect("trace");
    e
}

fn terminal_addenda() -> Addenda02 {
    let mut a = Addenda02::new();
    a.terminal_identification_code = "200509".to_string();
    a.transaction_serial_number = "123456".to_string();
    a.transaction_date = "0612".to_string();
    a.terminal_location = "Target Store 0049".to_string();
    a.terminal_city = "PHILADELPHIA".to_string();
    a.terminal_state = "PA".to_string();
    a
}

#[test]
fn web_requires_identification_number() {
    let mut batch = Batch::from_header(header("WEB", 225));
    batch.add_entry(entry(27, 5_000));
    let err = batch.create().expect_err("web without identification");
    assert_eq!(batch_field(err), "IdentificationNumber");
}

#[test]
fn web_accepts_debit_with_identification() {
    let mut batch = Batch::from_header(header("WEB", 225));
    let mut e = entry(27, 5_000);
    e.identification_number = "PAY-GATE-1".to_string();
    batch.add_entry(e);
    batch.create().expect("web debit");
}

#[test]
fn web_rejects_credit_entries() {
    let mut batch = Batch::from_header(header("WEB", 200));
    let mut e = entry(22, 5_000);
    e.identification_number = "PAY-GATE-1".to_string();
    batch.add_entry(e);
    let err = batch.create().expect_err("web credit");
    assert_eq!(batch_field(err), "TransactionCode");
}

#[test]
fn tel_forbids_addenda() {
    let mut batch = Batch::from_header(header("TEL", 225));
    let mut e = entry(27, 5_000);
    e.add_addenda(Addenda::Payment(Addenda05::new()));
    batch.add_entry(e);
    let _ = batch.create();
    let err = batch.validate().expect_err("tel with addenda");
    assert_eq!(batch_field(err), "TypeCode");
}

#[test]
fn credits_only_batch_rejects_debits() {
    let mut batch = Batch::from_header(header("PPD", 220));
    batch.add_entry(entry(27, 5_000));
    let err = batch.create().expect_err("debit in a 220 batch");
    assert_eq!(batch_field(err), "ServiceClassCode");
}

#[test]
fn debits_only_batch_rejects_credits() {
    let mut batch = Batch::from_header(header("PPD", 225));
    batch.add_entry(entry(22, 5_000));
    let err = batch.create().expect_err("credit in a 225 batch");
    assert_eq!(batch_field(err), "ServiceClassCode");
}

#[test]
fn pos_requires_discretionary_data() {
    let mut batch = Batch::from_header(header("POS", 225));
    let mut e = entry(27, 5_000);
    e.add_addenda(Addenda::Terminal(terminal_addenda()));
    batch.add_entry(e);
    let err = batch.create().expect_err("pos without card transaction type");
    assert_eq!(batch_field(err), "DiscretionaryData");
}

#[test]
fn pos_accepts_terminal_addenda() {
    let mut batch = Batch::from_header(header("POS", 225));
    let mut e = entry(27, 5_000);
    e.discretionary_data = "01".to_string();
    e.add_addenda(Addenda::Terminal(terminal_addenda()));
    batch.add_entry(e);
    batch.create().expect("pos debit with terminal addenda");
}

#[test]
fn pos_requires_terminal_addenda() {
    let mut batch = Batch::from_header(header("POS", 225));
    let mut e = entry(27, 5_000);
    e.discretionary_data = "01".to_string();
    batch.add_entry(e);
    let err = batch.create().expect_err("pos without addenda");
    assert_eq!(batch_field(err), "AddendaCount");
}

#[test]
fn cor_batch_carries_one_change_addenda() {
    let mut batch = Batch::from_header(header("COR", 200));
    let mut e = entry(21, 0);
    let mut change = Addenda98::new();
    change.change_code = "C01".to_string();
    change.original_trace = 121_042_880_000_001;
    change.original_dfi = "12104288".to_string();
    change.corrected_data = "1918171614".to_string();
    e.add_addenda(Addenda::Change(change));
    batch.add_entry(e);
    batch.create().expect("notification of change batch");
}

#[test]
fn cor_requires_zero_amounts() {
    let mut batch = Batch::from_header(header("COR", 200));
    let mut e = entry(21, 2_500);
    let mut change = Addenda98::new();
    change.change_code = "C01".to_string();
    change.original_trace = 121_042_880_000_001;
    change.original_dfi = "12104288".to_string();
    change.corrected_data = "1918171614".to_string();
    e.add_addenda(Addenda::Change(change));
    batch.add_entry(e);
    let err = batch.create().expect_err("noc with an amount");
    assert_eq!(batch_field(err), "Amount");
}

#[test]
fn rck_enforces_amount_ceiling() {
    let mut batch = Batch::from_header(header("RCK", 225));
    let mut e = entry(27, 300_000);
    e.identification_number = "1234".to_string();
    batch.add_entry(e);
    let err = batch.create().expect_err("rck over 2500 dollars");
    assert_eq!(batch_field(err), "Amount");

    let mut batch = Batch::from_header(header("RCK", 225));
    let mut e = entry(27, 200_000);
    e.identification_number = "1234".to_string();
    batch.add_entry(e);
    batch.create().expect("rck under the ceiling");
}

#[test]
fn cie_rejects_debit_entries() {
    let mut batch = Batch::from_header(header("CIE", 220));
    batch.add_entry(entry(27, 5_000));
    let err = batch.create().expect_err("cie debit");
    assert_eq!(batch_field(err), "TransactionCode");
}

#[test]
fn iat_batches_are_not_supported() {
    let mut batch = Batch::new(SecCode::Iat);
    batch.header.service_class_code = 200;
    batch.header.company_name = "ACME Corporation".to_string();
    batch.header.company_identification = "121042882".to_string();
    batch.header.company_entry_description = "PAYROLL".to_string();
    batch.header.odfi_identification = "12104288".to_string();
    batch.add_entry(entry(22, 5_000));
    let err = batch.create().expect_err("iat");
    assert_eq!(batch_field(err), "StandardEntryClassCode");
}

fn return_addenda() -> Addenda99 {
    let mut a = Addenda99::new();
    a.return_code = "R07".to_string();
    a.original_trace = 121_042_880_000_001;
    a.original_dfi = "12104288".to_string();
    a.addenda_information = "Authorization revoked".to_string();
    a
}

#[test]
fn returned_entry_rides_in_a_ppd_batch() {
    let mut batch = Batch::from_header(header("PPD", 200));
    let mut e = entry(26, 100_000);
    e.add_addenda(Addenda::Return(return_addenda()));
    batch.add_entry(e);
    batch.create().expect("return batch");

    let e = &batch.entries[0];
    assert_eq!(e.category, Category::Return);
    assert_eq!(e.addenda_record_indicator, 1);
    assert_eq!(batch.control.entry_addenda_count, 2);
    match &e.addenda[0] {
        Addenda::Return(a) => assert_eq!(a.trace_number, e.trace_number),
        other => panic!("expected a return addenda, got {other:?}"),
    }
}

#[test]
fn returned_entry_keeps_a_correction_code() {
    let mut batch = Batch::from_header(header("PPD", 200));
    let mut e = entry(27, 100_000);
    e.add_addenda(Addenda::Return(return_addenda()));
    batch.add_entry(e);
    let err = batch.create().expect_err("live code on a returned entry");
    assert_eq!(batch_field(err), "TransactionCode");
}

#[test]
fn forward_entry_cannot_carry_a_return_addenda() {
    let mut batch = Batch::from_header(header("PPD", 200));
    let mut e = entry(22, 100_000);
    e.add_addenda(Addenda::Return(return_addenda()));
    e.category = Category::Forward;
    batch.add_entry(e);
    let _ = batch.create();
    let err = batch.validate().expect_err("return addenda on a forward entry");
    assert_eq!(batch_field(err), "TypeCode");
}

#[test]
fn pop_requires_the_check_serial_number() {
    let mut batch = Batch::from_header(header("POP", 225));
    batch.add_entry(entry(27, 5_000));
    let err = batch.create().expect_err("pop without check serial");
    assert_eq!(batch_field(err), "IdentificationNumber");

    let mut batch = Batch::from_header(header("POP", 225));
    let mut e = entry(27, 5_000);
    e.identification_number = "123456789".to_string();
    batch.add_entry(e);
    batch.create().expect("pop debit");
}

#[test]
fn ack_entries_are_zero_dollar() {
    let mut batch = Batch::from_header(header("ACK", 220));
    batch.add_entry(entry(24, 0));
    batch.create().expect("acknowledgment batch");

    let mut batch = Batch::from_header(header("ACK", 220));
    batch.add_entry(entry(24, 500));
    let err = batch.create().expect_err("ack with an amount");
    assert_eq!(batch_field(err), "Amount");
}

#[test]
fn ctx_allows_many_payment_addenda() {
    let mut batch = Batch::from_header(header("CTX", 200));
    let mut e = entry(22, 5_000);
    for i in 0..12 {
        let mut a = Addenda05::new();
        a.payment_related_information = format!("ISA*00*INV-{i:04}");
        e.add_addenda(Addenda::Payment(a));
    }
    batch.add_entry(e);
    batch.create().expect("ctx remittance batch");
    assert_eq!(batch.control.entry_addenda_count, 13);
    match &batch.entries[0].addenda[11] {
        Addenda::Payment(a) => assert_eq!(a.addenda_sequence_number, 12),
        other => panic!("expected a payment addenda, got {other:?}"),
    }
}
