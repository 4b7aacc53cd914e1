use achiolib::batch::Batch;
use achiolib::error::{AchError, BatchError};
use achiolib::records::addenda::{Addenda, Addenda05};
use achiolib::records::batch_header::BatchHeader;
use achiolib::records::entry_detail::EntryDetail;

fn batch_field(err: AchError) -> &'static str {
    match err {
        AchError::Batch(e) => e.field_name,
        other => panic!("expected a batch error, got {other}"),
    }
}

fn mock_ppd_header() -> BatchHeader {
    let mut bh = BatchHeader::new();
    bh.service_class_code = 220;
    bh.standard_entry_class_code = "PPD".to_string();
    bh.company_name = "ACME Corporation".to_string();
    bh.company_identification = "121042882".to_string();
    bh.company_entry_description = "PAYROLL".to_string();
    bh.odfi_identification = "12104288".to_string();
    bh
}

fn mock_ppd_entry() -> EntryDetail {
    let mut entry = EntryDetail::new();
    entry.transaction_code = 22;
    entry.set_rdfi("231380104").expect("rdfi");
    entry.dfi_account_number = "123456789".to_string();
    entry.amount = 100_000_000;
    entry.individual_name = "Wade Arnold".to_string();
    entry.set_trace_number("12104288", 1).expect("trace");
    entry
}

fn mock_ppd_batch() -> Batch {
    let mut batch = Batch::from_header(mock_ppd_header());
    batch.add_entry(mock_ppd_entry());
    batch.create().expect("create ppd batch");
    batch
}

#[test]
fn batch_error_display_format() {
    let err = BatchError::new(1, "mock", "test message");
    assert_eq!(err.to_string(), "BatchNumber 1 mock test message");
}

#[test]
fn create_fills_control_totals() {
    let batch = mock_ppd_batch();
    assert_eq!(batch.control.entry_addenda_count, 1);
    assert_eq!(batch.control.entry_hash, 23_138_010);
    assert_eq!(batch.control.total_credit_entry_dollar_amount, 100_000_000);
    assert_eq!(batch.control.total_debit_entry_dollar_amount, 0);
    assert_eq!(batch.control.service_class_code, 220);
    assert_eq!(batch.control.company_identification, "121042882");
    assert_eq!(batch.control.odfi_identification, "12104288");
    assert_eq!(batch.control.batch_number, batch.header.batch_number);
}

#[test]
fn service_class_code_equality() {
    let mut batch = mock_ppd_batch();
    batch.control.service_class_code = 225;
    let err = batch.validate().expect_err("mirrored service class");
    assert_eq!(batch_field(err), "ServiceClassCode");
}

#[test]
fn create_rejects_default_service_class() {
    let mut batch = mock_ppd_batch();
    batch.header.service_class_code = 0;
    let _ = batch.create();
    let err = batch.validate().expect_err("service class 0");
    assert_eq!(batch_field(err), "ServiceClassCode");
}

#[test]
fn addenda_type_code_must_be_known() {
    let mut batch = mock_ppd_batch();
    let mut addenda = Addenda05::new();
    addenda.type_code = "63".to_string();
    batch.entries[0].add_addenda(Addenda::Payment(addenda));
    let _ = batch.create();
    let err = batch.validate().expect_err("type code 63");
    assert_eq!(batch_field(err), "TypeCode");
}

#[test]
fn company_identification_mismatch() {
    let mut batch = mock_ppd_batch();
    batch.control.company_identification = "XYZ Inc".to_string();
    let err = batch.validate().expect_err("mirrored company id");
    assert_eq!(batch_field(err), "CompanyIdentification");
}

#[test]
fn odfi_identification_mismatch() {
    let mut batch = mock_ppd_batch();
    batch.control.odfi_identification = "987654321".to_string();
    let err = batch.validate().expect_err("mirrored odfi");
    assert_eq!(batch_field(err), "ODFIIdentification");
}

#[test]
fn build_batch_with_payment_addenda() {
    let mut bh = mock_ppd_header();
    bh.service_class_code = 200;
    bh.company_name = "MY BEST COMP.".to_string();
    bh.company_discretionary_data = "INCLUDES OVERTIME".to_string();

    let mut entry = mock_ppd_entry();
    entry.dfi_account_number = "62292250".to_string();
    entry.amount = 100_000;
    entry.identification_number = "658-888-2468".to_string();
    let mut addenda = Addenda05::new();
    addenda.payment_related_information = "INV 20080730-001".to_string();
    entry.add_addenda(Addenda::Payment(addenda));

    let mut batch = Batch::from_header(bh);
    batch.add_entry(entry);
    batch.create().expect("create batch with addenda");

    let entry = &batch.entries[0];
    assert_eq!(entry.addenda_record_indicator, 1);
    match &entry.addenda[0] {
        Addenda::Payment(a) => {
            assert_eq!(a.addenda_sequence_number, 1);
            assert_eq!(u64::from(a.entry_detail_sequence_number), entry.trace_sequence());
        }
        other => panic!("expected a payment addenda, got {other:?}"),
    }
    assert_eq!(batch.control.entry_addenda_count, 2);
}

#[test]
fn ppd_allows_at_most_one_payment_addenda() {
    let mut batch = mock_ppd_batch();
    batch.entries[0].add_addenda(Addenda::Payment(Addenda05::new()));
    batch.entries[0].add_addenda(Addenda::Payment(Addenda05::new()));
    let _ = batch.create();
    let err = batch.validate().expect_err("two addenda on a ppd entry");
    assert_eq!(batch_field(err), "AddendaCount");
}

#[test]
fn trace_number_must_carry_batch_odfi() {
    let mut batch = mock_ppd_batch();
    batch.entries[0]
        .set_trace_number("07640125", 1)
        .expect("trace");
    let err = batch.validate().expect_err("foreign odfi prefix");
    assert_eq!(batch_field(err), "TraceNumber");
}

#[test]
fn prenote_requires_zero_amount() {
    let mut batch = mock_ppd_batch();
    batch.entries[0].transaction_code = 23;
    let err = batch.create().expect_err("prenote with an amount");
    assert_eq!(batch_field(err), "Amount");
}
