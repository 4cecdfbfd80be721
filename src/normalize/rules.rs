use super::Rule;

/// Statement strings that always mean the same merchant.
const EXACT: &[(&str, &str)] = &[
    ("TRANSPORTFORNSW TAP", "Opal Card"),
    ("TRANSPORTFORNSW OPAL", "Opal Card"),
    ("Salary The University o 1180325", "Usyd Salary"),
    ("ST. PETERS FRUITWORL", "St Peters Fruitworld"),
    ("STAR DISCOUNT CHEMIS", "Star Discount Chemist"),
    ("DUOWAY GROUP PTY LTD", "Duoway Restaurant"),
    ("GOOGLE*YOUTUBE MUSIC", "Youtube Music"),
    ("AMAZON AU MARKETPLACE", "Amazon Marketplace"),
    ("Google YouTube", "Youtube Premium"),
    ("Google YouTubePremium", "Youtube Premium"),
    ("AMAZON AU SYDNEY SOUTH NS AUS", "Amazon Marketplace"),
    ("GOOGLE*YOUTUBE MUSIC G.CO/HELPPAY# AU AUS", "Youtube Music"),
    ("GOOGLE*YOUTUBEPREMIUM G.CO/HELPPAY# AU AUS", "Youtube Premium"),
    ("Transfer to CBA A/c NetBank rent", "Rent"),
    ("Transfer to other Bank NetBank rent", "Rent"),
    ("Sydney Motorcycle", "Sydney Motorcycle Wizard"),
    ("UNI OF SYDNEY UNION UNI OF", "Usyd Union"),
    ("XIANGYAO ASIAN SUPERMA", "Xiangyao Asian Supermarket"),
    ("EG GROUP 5500", "EG Group"),
    ("MCQRE ORL & MXIL S P", "Macquarie Oral and Maxillofacial"),
];

/// Canonical names that statements print verbatim at the start.
const CANONICAL: &[&str] = &[
    "Woolworths",
    "Coles",
    "Amazon Marketplace",
    "Live Group",
    "Bunnings",
    "Kmart",
    "Aldi",
    "Big W",
    "EG Group",
    "JB Hi Fi",
    "Bikebiz",
    "Tonyon",
    "Ikea",
    "Fortune Paradise",
    "Decathlon",
    "Speedway",
    "Apex",
    "Mobil",
    "Ampol",
    "BWS",
    "Caltex",
    "BP",
    "7-Eleven",
    "Cash Deposit",
    "Beem",
    "Pharmacy 4 Less",
    "Discount Chemist",
    "Douglas Hanly Moir",
    "AMX",
    "Metro Petroleum",
    "Ebay",
    "Hmart",
];

const PREFIX: &[(&str, &str)] = &[
    ("pline", "Priceline Pharmacy"),
    ("UNISUPER MEM VOL CON", "Unisuper Voluntary Contribution"),
    ("Refund Purchase Beem", "Beem"),
    ("Fast Transfer From Stamen Engineering", "ISG Salary"),
];

const PATTERN: &[(&str, &str)] = &[
    (r"Direct Debit [0-9]+ Paypal", "Paypal"),
    (r"Direct Credit [0-9]+ Paypal", "Paypal"),
    (r"Direct Credit [0-9]+ Ctrlink Yth All", "Youth Allowance"),
    (r"Direct Credit [0-9]+ Central Accounts Sam", "Usyd Scholarship"),
    (r"Direct Credit [0-9]+ Mcare Benefits", "Medicare Rebate"),
];

pub(super) fn builtin_rules() -> Vec<Rule> {
    EXACT
        .iter()
        .map(|(text, name)| Rule::exact(text, name))
        .chain(CANONICAL.iter().map(|name| Rule::canonical_prefix(name)))
        .chain(PREFIX.iter().map(|(prefix, name)| Rule::prefix(prefix, name)))
        .chain(PATTERN.iter().map(|(pattern, name)| Rule::pattern(pattern, name)))
        .collect()
}
