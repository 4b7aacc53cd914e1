//! Реестр SEC-кодов: размеченный вариант с правилами для каждого подтипа пакета.

use std::fmt;

use serde::{Deserialize, Serialize};

const CONSUMER_CODES: &[u8] = &[22, 23, 27, 28, 32, 33, 37, 38];
const CORPORATE_CODES: &[u8] = &[22, 23, 27, 28, 32, 33, 37, 38, 42, 43, 47, 48, 52, 53, 55];
const DEBIT_CODES: &[u8] = &[27, 28, 37, 38];
const SINGLE_DEBIT_CODES: &[u8] = &[27, 37];
const CREDIT_CODES: &[u8] = &[22, 23, 32, 33];
const ZERO_DOLLAR_CREDIT_CODES: &[u8] = &[24, 34];
const CORRECTION_CODES: &[u8] = &[21, 26, 31, 36, 41, 46, 51, 56];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecCode {
    Ppd,
    Ccd,
    Ctx,
    Web,
    Tel,
    Pos,
    Shr,
    Mte,
    Boc,
    Arc,
    Rck,
    Pop,
    Cie,
    Cor,
    Ack,
    Iat,
}

impl SecCode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PPD" => Some(Self::Ppd),
            "CCD" => Some(Self::Ccd),
            "CTX" => Some(Self::Ctx),
            "WEB" => Some(Self::Web),
            "TEL" => Some(Self::Tel),
            "POS" => Some(Self::Pos),
            "SHR" => Some(Self::Shr),
            "MTE" => Some(Self::Mte),
            "BOC" => Some(Self::Boc),
            "ARC" => Some(Self::Arc),
            "RCK" => Some(Self::Rck),
            "POP" => Some(Self::Pop),
            "CIE" => Some(Self::Cie),
            "COR" => Some(Self::Cor),
            "ACK" => Some(Self::Ack),
            "IAT" => Some(Self::Iat),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ppd => "PPD",
            Self::Ccd => "CCD",
            Self::Ctx => "CTX",
            Self::Web => "WEB",
            Self::Tel => "TEL",
            Self::Pos => "POS",
            Self::Shr => "SHR",
            Self::Mte => "MTE",
            Self::Boc => "BOC",
            Self::Arc => "ARC",
            Self::Rck => "RCK",
            Self::Pop => "POP",
            Self::Cie => "CIE",
            Self::Cor => "COR",
            Self::Ack => "ACK",
            Self::Iat => "IAT",
        }
    }

    /// Правила подтипа. IAT входит в закрытое множество кодов, но его
    /// раскладки адденд моделью не представимы, поэтому правил нет.
    pub fn rules(self) -> Option<&'static SecRules> {
        match self {
            Self::Ppd => Some(&PPD),
            Self::Ccd => Some(&CCD),
            Self::Ctx => Some(&CTX),
            Self::Web => Some(&WEB),
            Self::Tel => Some(&TEL),
            Self::Pos => Some(&POS),
            Self::Shr => Some(&SHR),
            Self::Mte => Some(&MTE),
            Self::Boc => Some(&BOC),
            Self::Arc => Some(&ARC),
            Self::Rck => Some(&RCK),
            Self::Pop => Some(&POP_CHECK),
            Self::Cie => Some(&CIE),
            Self::Cor => Some(&COR),
            Self::Ack => Some(&ACK),
            Self::Iat => None,
        }
    }
}

impl fmt::Display for SecCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Правила одного SEC-подтипа поверх общих правил пакета.
#[derive(Debug)]
pub struct SecRules {
    /// Допустимые коды транзакций для прямых проводок.
    pub transaction_codes: &'static [u8],
    /// Разрешённый код адденды прямой проводки: "02", "05" или ничего.
    pub addenda_code: Option<&'static str>,
    /// Потолок адденд на одну проводку.
    pub max_addenda: u16,
    /// Каждая проводка обязана нести адденду указанного кода.
    pub addenda_required: bool,
    pub identification_required: bool,
    pub discretionary_required: bool,
    /// Потолок суммы в центах.
    pub max_amount: Option<u64>,
    /// Только нулевые суммы (уведомления, подтверждения).
    pub zero_amount: bool,
    /// Пакет уведомлений об изменении: нулевые суммы, коды x1/x6,
    /// ровно одна адденда 98 на проводку.
    pub noc: bool,
}

impl SecRules {
    pub fn allows_transaction_code(&self, code: u8) -> bool {
        self.transaction_codes.contains(&code)
    }
}

static PPD: SecRules = SecRules {
    transaction_codes: CONSUMER_CODES,
    addenda_code: Some("05"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static CCD: SecRules = SecRules {
    transaction_codes: CORPORATE_CODES,
    addenda_code: Some("05"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static CTX: SecRules = SecRules {
    transaction_codes: CORPORATE_CODES,
    addenda_code: Some("05"),
    max_addenda: 9999,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static WEB: SecRules = SecRules {
    transaction_codes: DEBIT_CODES,
    addenda_code: Some("05"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: true,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static TEL: SecRules = SecRules {
    transaction_codes: DEBIT_CODES,
    addenda_code: None,
    max_addenda: 0,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static POS: SecRules = SecRules {
    transaction_codes: CONSUMER_CODES,
    addenda_code: Some("02"),
    max_addenda: 1,
    addenda_required: true,
    identification_required: false,
    discretionary_required: true,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static SHR: SecRules = SecRules {
    transaction_codes: CONSUMER_CODES,
    addenda_code: Some("02"),
    max_addenda: 1,
    addenda_required: true,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static MTE: SecRules = SecRules {
    transaction_codes: CONSUMER_CODES,
    addenda_code: Some("02"),
    max_addenda: 1,
    addenda_required: true,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static BOC: SecRules = SecRules {
    transaction_codes: SINGLE_DEBIT_CODES,
    addenda_code: Some("02"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: true,
    discretionary_required: false,
    max_amount: Some(2_500_000),
    zero_amount: false,
    noc: false,
};

static ARC: SecRules = SecRules {
    transaction_codes: SINGLE_DEBIT_CODES,
    addenda_code: None,
    max_addenda: 0,
    addenda_required: false,
    identification_required: true,
    discretionary_required: false,
    max_amount: Some(2_500_000),
    zero_amount: false,
    noc: false,
};

static RCK: SecRules = SecRules {
    transaction_codes: SINGLE_DEBIT_CODES,
    addenda_code: None,
    max_addenda: 0,
    addenda_required: false,
    identification_required: true,
    discretionary_required: false,
    max_amount: Some(250_000),
    zero_amount: false,
    noc: false,
};

static CIE: SecRules = SecRules {
    transaction_codes: CREDIT_CODES,
    addenda_code: Some("05"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: false,
    noc: false,
};

static COR: SecRules = SecRules {
    transaction_codes: CORRECTION_CODES,
    addenda_code: None,
    max_addenda: 1,
    addenda_required: true,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: true,
    noc: true,
};

static POP_CHECK: SecRules = SecRules {
    transaction_codes: SINGLE_DEBIT_CODES,
    addenda_code: None,
    max_addenda: 0,
    addenda_required: false,
    identification_required: true,
    discretionary_required: false,
    max_amount: Some(2_500_000),
    zero_amount: false,
    noc: false,
};

static ACK: SecRules = SecRules {
    transaction_codes: ZERO_DOLLAR_CREDIT_CODES,
    addenda_code: Some("05"),
    max_addenda: 1,
    addenda_required: false,
    identification_required: false,
    discretionary_required: false,
    max_amount: None,
    zero_amount: true,
    noc: false,
};
