use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    IncomeTax,
    NationalInsurance,
    Pension,
    Parking,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Self::IncomeTax,
        Self::NationalInsurance,
        Self::Pension,
        Self::Parking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncomeTax => "incometax",
            Self::NationalInsurance => "nationalinsurance",
            Self::Pension => "pension",
            Self::Parking => "parking",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "incometax" => Some(Self::IncomeTax),
            "nationalinsurance" => Some(Self::NationalInsurance),
            "pension" => Some(Self::Pension),
            "parking" => Some(Self::Parking),
            _ => None,
        }
    }

    /// Whether a band's rate is a fraction of income rather than a fixed amount.
    pub fn rate_is_fraction(&self) -> bool {
        !matches!(self, Self::Parking)
    }
}

impl fmt::Display for Category {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
