use achiolib::error::FieldErrorKind;
use achiolib::records::batch_header::BatchHeader;

const LINE: &str = "5225companyname                         origid    PPDCHECKPAYMT000002080730   1076401250000001";

fn mock_batch_header() -> BatchHeader {
    let mut bh = BatchHeader::new();
    bh.service_class_code = 220;
    bh.standard_entry_class_code = "PPD".to_string();
    bh.company_name = "ACME Corporation".to_string();
    bh.company_identification = "121042882".to_string();
    bh.company_entry_description = "PAYROLL".to_string();
    bh.odfi_identification = "12104288".to_string();
    bh
}

#[test]
fn mock_header_validates() {
    mock_batch_header().validate().expect("mock batch header");
}

#[test]
fn parse_known_batch_header() {
    let bh: BatchHeader = LINE.parse().expect("parse batch header");
    assert_eq!(bh.record_type, '5');
    assert_eq!(bh.service_class_code, 225);
    assert_eq!(bh.company_name_field(), "companyname     ");
    assert_eq!(bh.company_discretionary_data_field(), "                    ");
    assert_eq!(bh.company_identification_field(), "origid    ");
    assert_eq!(bh.standard_entry_class_code, "PPD");
    assert_eq!(bh.company_entry_description_field(), "CHECKPAYMT");
    assert_eq!(bh.company_descriptive_date, "000002");
    assert_eq!(bh.effective_entry_date_field(), "080730");
    assert_eq!(bh.settlement_date, "   ");
    assert_eq!(bh.originator_status_code, 1);
    assert_eq!(bh.odfi_identification_field(), "07640125");
    assert_eq!(bh.batch_number_field(), "0000001");
}

#[test]
fn known_batch_header_renders_back() {
    let bh: BatchHeader = LINE.parse().expect("parse batch header");
    assert_eq!(bh.to_string(), LINE);
}

#[test]
fn record_type_must_be_five() {
    let mut bh = mock_batch_header();
    bh.record_type = '2';
    let err = bh.validate().expect_err("record type 2");
    assert_eq!(err.field_name, "RecordType");
}

#[test]
fn invalid_service_class_code() {
    let mut bh = mock_batch_header();
    bh.service_class_code = 123;
    let err = bh.validate().expect_err("service class 123");
    assert_eq!(err.field_name, "ServiceClassCode");
}

#[test]
fn invalid_sec_code() {
    let mut bh = mock_batch_header();
    bh.standard_entry_class_code = "123".to_string();
    let err = bh.validate().expect_err("sec 123");
    assert_eq!(err.field_name, "StandardEntryClassCode");
}

#[test]
fn originator_status_code_range() {
    let mut bh = mock_batch_header();
    bh.originator_status_code = 3;
    bh.validate().expect("status 3 is inside the set");
    bh.originator_status_code = 4;
    let err = bh.validate().expect_err("status 4");
    assert_eq!(err.field_name, "OriginatorStatusCode");
    bh.originator_status_code = 0;
    let err = bh.validate().expect_err("status 0");
    assert_eq!(err.field_name, "OriginatorStatusCode");
    assert_eq!(err.kind, FieldErrorKind::Inclusion);
}

#[test]
fn company_name_rejects_non_ascii() {
    let mut bh = mock_batch_header();
    bh.company_name = "AT&T®".to_string();
    let err = bh.validate().expect_err("registered sign");
    assert_eq!(err.field_name, "CompanyName");
    assert_eq!(err.kind, FieldErrorKind::Alphanumeric);
}

#[test]
fn company_discretionary_data_rejects_non_ascii() {
    let mut bh = mock_batch_header();
    bh.company_discretionary_data = "®".to_string();
    let err = bh.validate().expect_err("registered sign");
    assert_eq!(err.field_name, "CompanyDiscretionaryData");
}

#[test]
fn company_identification_rejects_non_ascii() {
    let mut bh = mock_batch_header();
    bh.company_identification = "®".to_string();
    let err = bh.validate().expect_err("registered sign");
    assert_eq!(err.field_name, "CompanyIdentification");
}

#[test]
fn company_entry_description_rejects_non_ascii() {
    let mut bh = mock_batch_header();
    bh.company_entry_description = "P®YROLL".to_string();
    let err = bh.validate().expect_err("registered sign");
    assert_eq!(err.field_name, "CompanyEntryDescription");
}

#[test]
fn mandatory_fields_must_be_present() {
    let mut bh = mock_batch_header();
    bh.company_name = String::new();
    assert_eq!(bh.validate().expect_err("name").field_name, "CompanyName");

    let mut bh = mock_batch_header();
    bh.company_identification = String::new();
    assert_eq!(
        bh.validate().expect_err("company id").field_name,
        "CompanyIdentification"
    );

    let mut bh = mock_batch_header();
    bh.standard_entry_class_code = String::new();
    assert_eq!(
        bh.validate().expect_err("sec").field_name,
        "StandardEntryClassCode"
    );

    let mut bh = mock_batch_header();
    bh.company_entry_description = String::new();
    assert_eq!(
        bh.validate().expect_err("description").field_name,
        "CompanyEntryDescription"
    );

    let mut bh = mock_batch_header();
    bh.odfi_identification = String::new();
    assert_eq!(
        bh.validate().expect_err("odfi").field_name,
        "ODFIIdentification"
    );

    let mut bh = mock_batch_header();
    bh.batch_number = 0;
    assert_eq!(bh.validate().expect_err("number").field_name, "BatchNumber");
}

#[test]
fn settlement_date_is_digits_or_spaces() {
    let mut bh = mock_batch_header();
    bh.settlement_date = "012".to_string();
    bh.validate().expect("three digits");
    bh.settlement_date = "0 2".to_string();
    let err = bh.validate().expect_err("mixed settlement date");
    assert_eq!(err.field_name, "SettlementDate");
}
