use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFlag {
    NoIncomeDetected,
    HighRisk,
    Stable,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoIncomeDetected => "No Income Detected",
            Self::HighRisk => "High Risk",
            Self::Stable => "Stable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "no income detected" => Some(Self::NoIncomeDetected),
            "high risk" => Some(Self::HighRisk),
            "stable" => Some(Self::Stable),
            _ => None,
        }
    }

    pub fn all() -> &'static [RiskFlag] {
        &[Self::NoIncomeDetected, Self::HighRisk, Self::Stable]
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Income and expense for one calendar month. `expense` is a magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotals {
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthlyTotals {
    /// `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Result of running one upload through detection, normalization and
/// analytics. Carries no storage identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub bank_name: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expense: Decimal,
    pub risk_flag: RiskFlag,
    pub months: Vec<MonthlyTotals>,
    pub transaction_count: usize,
}

/// A stored upload summary. Created once per successful upload and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub id: Option<i64>,
    pub filename: String,
    pub bank_name: String,
    pub uploaded_at: String,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub avg_monthly_income: Decimal,
    pub avg_monthly_expense: Decimal,
    pub risk_flag: RiskFlag,
}

impl SummaryRecord {
    pub fn new(filename: &str, summary: &UploadSummary) -> Self {
        Self {
            id: None,
            filename: filename.to_string(),
            bank_name: summary.bank_name.clone(),
            // Fixed width so the column sorts chronologically as text.
            uploaded_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            avg_monthly_income: summary.avg_monthly_income,
            avg_monthly_expense: summary.avg_monthly_expense,
            risk_flag: summary.risk_flag,
        }
    }

    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}
