//! Справочники кодов изменений (C01–C13) и причин возврата (R01–R39).

/// Описание кода изменения для адденды 98; None — код вне справочника.
pub fn change_code(code: &str) -> Option<&'static str> {
    match code {
        "C01" => Some("Incorrect DFI account number"),
        "C02" => Some("Incorrect routing number"),
        "C03" => Some("Incorrect routing number and incorrect DFI account number"),
        "C04" => Some("Incorrect individual name"),
        "C05" => Some("Incorrect transaction code"),
        "C06" => Some("Incorrect DFI account number and incorrect transaction code"),
        "C07" => {
            Some("Incorrect routing number, incorrect DFI account number and incorrect transaction code")
        }
        "C08" => Some("Incorrect receiving DFI identification"),
        "C09" => Some("Incorrect individual identification number"),
        "C10" => Some("Incorrect company name"),
        "C11" => Some("Incorrect company identification"),
        "C12" => Some("Incorrect company name and incorrect company identification"),
        "C13" => Some("Addenda format error"),
        _ => None,
    }
}

/// Описание кода причины возврата для адденды 99; None — код вне справочника.
pub fn return_code(code: &str) -> Option<&'static str> {
    match code {
        "R01" => Some("Insufficient funds"),
        "R02" => Some("Account closed"),
        "R03" => Some("No account or unable to locate account"),
        "R04" => Some("Invalid account number"),
        "R05" => Some("Unauthorized debit to consumer account"),
        "R06" => Some("Returned per ODFI's request"),
        "R07" => Some("Authorization revoked by customer"),
        "R08" => Some("Payment stopped"),
        "R09" => Some("Uncollected funds"),
        "R10" => Some("Customer advises not authorized"),
        "R11" => Some("Check truncation entry return"),
        "R12" => Some("Branch sold to another DFI"),
        "R13" => Some("Invalid ACH routing number"),
        "R14" => Some("Representative payee deceased"),
        "R15" => Some("Beneficiary or account holder deceased"),
        "R16" => Some("Account frozen"),
        "R17" => Some("File record edit criteria"),
        "R18" => Some("Improper effective entry date"),
        "R19" => Some("Amount field error"),
        "R20" => Some("Non-transaction account"),
        "R21" => Some("Invalid company identification"),
        "R22" => Some("Invalid individual identification number"),
        "R23" => Some("Credit entry refused by receiver"),
        "R24" => Some("Duplicate entry"),
        "R25" => Some("Addenda error"),
        "R26" => Some("Mandatory field error"),
        "R27" => Some("Trace number error"),
        "R28" => Some("Routing number check digit error"),
        "R29" => Some("Corporate customer advises not authorized"),
        "R30" => Some("RDFI not participant in check truncation program"),
        "R31" => Some("Permissible return entry"),
        "R32" => Some("RDFI non-settlement"),
        "R33" => Some("Return of XCK entry"),
        "R34" => Some("Limited participation DFI"),
        "R35" => Some("Return of improper debit entry"),
        "R36" => Some("Return of improper credit entry"),
        "R37" => Some("Source document presented for payment"),
        "R38" => Some("Stop payment on source document"),
        "R39" => Some("Improper source document"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_codes_form_a_closed_set() {
        assert_eq!(change_code("C01"), Some("Incorrect DFI account number"));
        assert!(change_code("C13").is_some());
        assert!(change_code("C14").is_none());
        assert!(change_code("R01").is_none());
    }

    #[test]
    fn return_codes_form_a_closed_set() {
        assert_eq!(return_code("R01"), Some("Insufficient funds"));
        assert!(return_code("R39").is_some());
        assert!(return_code("R40").is_none());
        assert!(return_code("C01").is_none());
    }
}
