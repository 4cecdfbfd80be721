/// Spending categories. Merchants map onto these; anything else is
/// uncategorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Fuel,
    Groceries,
    Health,
    Income,
    Investment,
    Motorbike,
    PublicTransport,
    Rent,
    Restaurant,
    Shopping,
    Sports,
}

impl Category {
    /// Identifier used in the store and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "fuel",
            Self::Groceries => "groceries",
            Self::Health => "health",
            Self::Income => "income",
            Self::Investment => "investment",
            Self::Motorbike => "motorbike",
            Self::PublicTransport => "public transport",
            Self::Rent => "rent",
            Self::Restaurant => "restaurant",
            Self::Shopping => "shopping",
            Self::Sports => "sports",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fuel" => Some(Self::Fuel),
            "groceries" | "grocery" => Some(Self::Groceries),
            "health" => Some(Self::Health),
            "income" => Some(Self::Income),
            "investment" => Some(Self::Investment),
            "motorbike" => Some(Self::Motorbike),
            "public transport" | "public-transport" => Some(Self::PublicTransport),
            "rent" => Some(Self::Rent),
            "restaurant" => Some(Self::Restaurant),
            "shopping" => Some(Self::Shopping),
            "sports" => Some(Self::Sports),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Fuel,
            Self::Groceries,
            Self::Health,
            Self::Income,
            Self::Investment,
            Self::Motorbike,
            Self::PublicTransport,
            Self::Rent,
            Self::Restaurant,
            Self::Shopping,
            Self::Sports,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
