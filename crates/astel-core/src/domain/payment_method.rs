use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a beneficiary pays their contribution.
///
/// The service stores this as free text. The three known methods are
/// recognised case-insensitively; anything else is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMethod {
    /// `DEPOSITO MENSAL`
    MonthlyDeposit,
    /// `BOLETO TRIMESTRAL`
    QuarterlyBoleto,
    /// `FOLHA SISTEL MENSAL`
    SistelPayroll,
    /// Any other value sent by the service.
    Other(String),
}

impl PaymentMethod {
    /// The methods offered when filtering or editing.
    pub const KNOWN: [Self; 3] = [Self::MonthlyDeposit, Self::QuarterlyBoleto, Self::SistelPayroll];

    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MonthlyDeposit => "DEPOSITO MENSAL",
            Self::QuarterlyBoleto => "BOLETO TRIMESTRAL",
            Self::SistelPayroll => "FOLHA SISTEL MENSAL",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(raw: String) -> Self {
        let normalized = raw.trim().to_uppercase();
        match normalized.as_str() {
            "DEPOSITO MENSAL" => Self::MonthlyDeposit,
            "BOLETO TRIMESTRAL" => Self::QuarterlyBoleto,
            "FOLHA SISTEL MENSAL" => Self::SistelPayroll,
            _ => Self::Other(raw),
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
