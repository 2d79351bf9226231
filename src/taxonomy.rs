//! Classification taxonomies: fixed, ordered category rosters.
//!
//! A [`Taxonomy`] is the label universe for one evaluation session. Rosters
//! are either one of the built-in per-industry rosters (resolved from an
//! [`Industry`] at configuration time) or a caller-supplied ordered label
//! list. Roster order is significant: confusion matrices, per-class metric
//! rows, and rendered reports all follow the declared order.
//!
//! Label resolution is strict. An off-roster label yields
//! [`Error::UnknownCategory`]; the only fallback is the explicitly named
//! `Other` bucket via [`Taxonomy::resolve_or_other`].
//!
//! # Example
//!
//! ```rust
//! use scorecard::{Industry, Taxonomy};
//!
//! let taxonomy = Taxonomy::for_industry(Industry::General);
//! assert_eq!(taxonomy.resolve("Finance").unwrap(), "Finance");
//! assert!(taxonomy.resolve("Payroll").is_err());
//! assert_eq!(taxonomy.resolve_or_other("Payroll").unwrap(), "Other");
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The named default bucket present in every built-in roster.
pub const OTHER_CATEGORY: &str = "Other";

// =============================================================================
// Industry
// =============================================================================

/// Industry whose document taxonomy a session classifies against.
///
/// Each industry carries a fixed ordered roster of twelve categories,
/// ending with the `Other` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    /// Cross-industry default roster.
    General,
    /// Oil, gas, utilities, renewables.
    Energy,
    /// Banking, asset management, trading.
    FinancialServices,
    /// Providers, pharma, medical devices.
    Healthcare,
    /// Carriers, brokers, reinsurers.
    Insurance,
    /// Law firms and in-house legal.
    Legal,
    /// Discrete and process manufacturing.
    Manufacturing,
    /// Government and public agencies.
    PublicSector,
    /// Brick-and-mortar and e-commerce retail.
    Retail,
    /// Carriers, freight, logistics networks.
    TransportationLogistics,
}

impl Industry {
    /// All supported industries, in declaration order.
    pub const ALL: [Industry; 10] = [
        Industry::General,
        Industry::Energy,
        Industry::FinancialServices,
        Industry::Healthcare,
        Industry::Insurance,
        Industry::Legal,
        Industry::Manufacturing,
        Industry::PublicSector,
        Industry::Retail,
        Industry::TransportationLogistics,
    ];

    /// Stable identifier used in files and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::General => "general",
            Industry::Energy => "energy",
            Industry::FinancialServices => "financial_services",
            Industry::Healthcare => "healthcare",
            Industry::Insurance => "insurance",
            Industry::Legal => "legal",
            Industry::Manufacturing => "manufacturing",
            Industry::PublicSector => "public_sector",
            Industry::Retail => "retail",
            Industry::TransportationLogistics => "transportation_logistics",
        }
    }

    /// Ordered roster of category labels for this industry.
    #[must_use]
    pub fn categories(&self) -> Vec<&'static str> {
        self.table().iter().map(|(label, _)| *label).collect()
    }

    /// One-line description of a category, if the label is on this roster.
    #[must_use]
    pub fn description(&self, label: &str) -> Option<&'static str> {
        self.table()
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, d)| *d)
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Industry::General => GENERAL,
            Industry::Energy => ENERGY,
            Industry::FinancialServices => FINANCIAL_SERVICES,
            Industry::Healthcare => HEALTHCARE,
            Industry::Insurance => INSURANCE,
            Industry::Legal => LEGAL,
            Industry::Manufacturing => MANUFACTURING,
            Industry::PublicSector => PUBLIC_SECTOR,
            Industry::Retail => RETAIL,
            Industry::TransportationLogistics => TRANSPORTATION_LOGISTICS,
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Industry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Industry::ALL
            .iter()
            .copied()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| {
                Error::invalid_config(format!(
                    "unknown industry '{}' (expected one of: {})",
                    s,
                    Industry::ALL
                        .iter()
                        .map(|i| i.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

// =============================================================================
// Taxonomy
// =============================================================================

/// A fixed, ordered category roster for one evaluation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    industry: Option<Industry>,
    categories: Vec<String>,
}

impl Taxonomy {
    /// Roster for a built-in industry.
    #[must_use]
    pub fn for_industry(industry: Industry) -> Self {
        Self {
            industry: Some(industry),
            categories: industry
                .categories()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// The cross-industry default roster.
    #[must_use]
    pub fn general() -> Self {
        Self::for_industry(Industry::General)
    }

    /// A caller-supplied roster.
    ///
    /// The roster must be non-empty and free of duplicate labels; order is
    /// preserved as declared.
    pub fn custom<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = labels.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(Error::invalid_config("taxonomy roster is empty"));
        }
        for (i, label) in categories.iter().enumerate() {
            if label.is_empty() {
                return Err(Error::invalid_config("taxonomy contains an empty label"));
            }
            if categories[..i].contains(label) {
                return Err(Error::invalid_config(format!(
                    "duplicate category '{}' in taxonomy roster",
                    label
                )));
            }
        }
        Ok(Self {
            industry: None,
            categories,
        })
    }

    /// The industry this roster was derived from, if any.
    #[must_use]
    pub fn industry(&self) -> Option<Industry> {
        self.industry
    }

    /// Ordered category labels.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of categories on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false: rosters are non-empty by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Whether the label is on the roster (exact string match).
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    /// Roster position of a label.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == label)
    }

    /// Resolve a label against the roster.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCategory`] if the label is not on the roster. There
    /// is no silent fallback; see [`Taxonomy::resolve_or_other`].
    pub fn resolve<'a>(&'a self, label: &str) -> Result<&'a str> {
        self.position(label)
            .map(|i| self.categories[i].as_str())
            .ok_or_else(|| Error::unknown_category(label, &self.categories))
    }

    /// Resolve a label, falling back to the named `Other` bucket.
    ///
    /// The fallback is an explicit policy: it applies only when the roster
    /// itself carries an `Other` category.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCategory`] if the label is off-roster and the roster
    /// has no `Other` bucket to absorb it.
    pub fn resolve_or_other<'a>(&'a self, label: &str) -> Result<&'a str> {
        match self.resolve(label) {
            Ok(resolved) => Ok(resolved),
            Err(_) => self.resolve(OTHER_CATEGORY).map_err(|_| {
                Error::unknown_category(label, &self.categories)
            }),
        }
    }

    /// One-line description of a roster category, for built-in rosters.
    #[must_use]
    pub fn description(&self, label: &str) -> Option<&'static str> {
        self.industry.and_then(|i| i.description(label))
    }
}

// =============================================================================
// Built-in rosters
// =============================================================================

const GENERAL: &[(&str, &str)] = &[
    ("Finance", "budgets, forecasts, invoices, audits"),
    ("Legal", "contracts, compliance, IP, regulatory"),
    ("Operations", "process docs, logistics, supply chain, facilities"),
    ("HR", "hiring, payroll, benefits, employee relations"),
    ("Product", "roadmaps, specs, R&D, design"),
    ("Engineering / Tech", "code, architecture, infrastructure, IT"),
    ("Sales", "pitches, deal flow, pipeline, CRM exports"),
    ("Marketing / Communications", "brand, PR, campaigns, content"),
    (
        "Customer Success / Support",
        "onboarding, training, help docs, feedback",
    ),
    (
        "Strategy / Corp Dev",
        "M&A, partnerships, investor updates, OKRs",
    ),
    (
        "Compliance / Risk",
        "audit reports, security, regulatory filings",
    ),
    ("Other", "general documents that don't fit other categories"),
];

const ENERGY: &[(&str, &str)] = &[
    (
        "Exploration & Production",
        "geological surveys, drilling reports, reservoir analysis, production data",
    ),
    (
        "Operations & Maintenance",
        "facility operations, maintenance schedules, equipment specs, outage reports",
    ),
    (
        "Environmental & Safety",
        "environmental impact assessments, safety protocols, incident reports, permits",
    ),
    (
        "Regulatory & Compliance",
        "permit applications, regulatory filings, compliance audits, government relations",
    ),
    (
        "Finance & Trading",
        "commodity trading, hedging strategies, project financing, revenue forecasts",
    ),
    (
        "Engineering & Infrastructure",
        "pipeline specs, facility design, technical drawings, capacity studies",
    ),
    (
        "Supply Chain & Procurement",
        "equipment procurement, vendor contracts, logistics planning, inventory management",
    ),
    (
        "Health & Safety",
        "safety training, emergency procedures, accident reports, HSE compliance",
    ),
    (
        "Asset Management",
        "asset valuations, lifecycle management, investment decisions, portfolio analysis",
    ),
    (
        "Market Analysis",
        "market forecasts, pricing analysis, demand studies, competitive intelligence",
    ),
    (
        "Sustainability & ESG",
        "carbon reporting, sustainability initiatives, ESG metrics, renewable energy plans",
    ),
    ("Other", "documents that don't fit other energy industry categories"),
];

const FINANCIAL_SERVICES: &[(&str, &str)] = &[
    (
        "Credit & Risk",
        "credit reports, risk assessments, loan documentation, default analysis",
    ),
    (
        "Investment Management",
        "portfolio analysis, investment strategies, fund reports, performance metrics",
    ),
    (
        "Regulatory & Compliance",
        "regulatory filings, compliance reports, KYC documentation, AML procedures",
    ),
    (
        "Client Services",
        "client onboarding, account management, service agreements, complaint resolution",
    ),
    (
        "Operations & Technology",
        "system documentation, process flows, technology infrastructure, data management",
    ),
    (
        "Market Research",
        "market analysis, economic reports, sector studies, investment research",
    ),
    (
        "Product Development",
        "product specifications, pricing models, launch plans, feature documentation",
    ),
    (
        "Audit & Controls",
        "internal audits, control frameworks, SOX documentation, risk assessments",
    ),
    (
        "Trading & Markets",
        "trading reports, market data, execution analysis, derivatives documentation",
    ),
    (
        "Wealth Management",
        "financial plans, investment proposals, client portfolios, advisory reports",
    ),
    (
        "Corporate Banking",
        "corporate lending, treasury services, trade finance, cash management",
    ),
    (
        "Other",
        "documents that don't fit other financial services categories",
    ),
];

const HEALTHCARE: &[(&str, &str)] = &[
    (
        "Clinical Operations",
        "clinical protocols, trial reports, patient data, study designs",
    ),
    (
        "Regulatory Affairs",
        "FDA submissions, regulatory approvals, compliance documentation, labeling",
    ),
    (
        "Research & Development",
        "research protocols, lab reports, drug development, preclinical studies",
    ),
    (
        "Quality Assurance",
        "quality control, validation protocols, batch records, deviation reports",
    ),
    (
        "Patient Care",
        "medical records, treatment plans, care protocols, patient outcomes",
    ),
    (
        "Medical Affairs",
        "medical communications, scientific publications, advisory boards, medical education",
    ),
    (
        "Pharmacovigilance",
        "adverse event reports, safety data, risk management, surveillance studies",
    ),
    (
        "Manufacturing",
        "manufacturing processes, facility specs, equipment validation, supply chain",
    ),
    (
        "Commercial Operations",
        "marketing materials, sales training, market access, pricing strategies",
    ),
    (
        "Health Economics",
        "cost-effectiveness studies, health outcomes research, reimbursement data",
    ),
    (
        "Digital Health",
        "digital therapeutics, health apps, telemedicine, data analytics",
    ),
    ("Other", "documents that don't fit other healthcare categories"),
];

const INSURANCE: &[(&str, &str)] = &[
    (
        "Underwriting",
        "underwriting guidelines, risk assessment, policy applications, coverage decisions",
    ),
    (
        "Claims Management",
        "claims processing, damage assessments, settlement documentation, fraud investigation",
    ),
    (
        "Actuarial",
        "actuarial reports, pricing models, reserve analysis, mortality studies",
    ),
    (
        "Product Development",
        "product specifications, rate filings, policy forms, feature development",
    ),
    (
        "Regulatory & Compliance",
        "regulatory filings, compliance reports, solvency requirements, examinations",
    ),
    (
        "Risk Management",
        "risk assessments, catastrophe modeling, portfolio analysis, exposure management",
    ),
    (
        "Customer Service",
        "customer communications, policy servicing, complaint resolution, retention strategies",
    ),
    (
        "Reinsurance",
        "reinsurance treaties, cession reports, catastrophe coverage, risk transfer",
    ),
    (
        "Investment Management",
        "investment portfolios, asset allocation, yield analysis, credit risk",
    ),
    (
        "Technology & Operations",
        "system documentation, process automation, data management, digital transformation",
    ),
    (
        "Sales & Distribution",
        "agent training, distribution strategies, commission structures, sales materials",
    ),
    ("Other", "documents that don't fit other insurance categories"),
];

const LEGAL: &[(&str, &str)] = &[
    (
        "Litigation",
        "case files, court documents, discovery materials, settlement agreements",
    ),
    (
        "Corporate Law",
        "corporate governance, board resolutions, bylaws, entity formation",
    ),
    (
        "Regulatory & Compliance",
        "regulatory guidance, compliance programs, investigations, enforcement actions",
    ),
    (
        "Intellectual Property",
        "patent applications, trademark registrations, licensing agreements, IP litigation",
    ),
    (
        "Employment Law",
        "employment contracts, HR policies, discrimination cases, labor negotiations",
    ),
    (
        "Real Estate",
        "property transactions, lease agreements, zoning issues, development projects",
    ),
    (
        "Tax Law",
        "tax planning, audit defense, tax opinions, compliance documentation",
    ),
    (
        "Contract Management",
        "contract templates, negotiations, amendments, renewals",
    ),
    (
        "Mergers & Acquisitions",
        "due diligence, purchase agreements, regulatory approvals, integration planning",
    ),
    (
        "Securities & Finance",
        "securities offerings, financing agreements, regulatory filings, investor relations",
    ),
    (
        "Client Relations",
        "client agreements, billing, matter management, communication logs",
    ),
    ("Other", "documents that don't fit other legal practice categories"),
];

const MANUFACTURING: &[(&str, &str)] = &[
    (
        "Production Operations",
        "production schedules, work orders, capacity planning, manufacturing processes",
    ),
    (
        "Quality Control",
        "quality standards, inspection reports, testing procedures, defect analysis",
    ),
    (
        "Supply Chain",
        "supplier agreements, logistics planning, demand forecasting, vendor management",
    ),
    (
        "Engineering & Design",
        "product designs, technical specifications, CAD drawings, engineering changes",
    ),
    (
        "Maintenance & Reliability",
        "maintenance schedules, equipment manuals, reliability analysis, downtime reports",
    ),
    (
        "Safety & Environmental",
        "safety protocols, environmental compliance, incident reports, training materials",
    ),
    (
        "Product Development",
        "product roadmaps, R&D projects, prototype testing, market requirements",
    ),
    (
        "Procurement",
        "purchase orders, supplier evaluations, contract negotiations, cost analysis",
    ),
    (
        "Inventory Management",
        "inventory levels, stock optimization, warehouse operations, cycle counting",
    ),
    (
        "Process Improvement",
        "lean initiatives, process mapping, efficiency studies, continuous improvement",
    ),
    (
        "Regulatory Compliance",
        "industry standards, regulatory certifications, compliance audits, documentation",
    ),
    ("Other", "documents that don't fit other manufacturing categories"),
];

const PUBLIC_SECTOR: &[(&str, &str)] = &[
    (
        "Policy & Legislation",
        "policy documents, legislative proposals, regulatory frameworks, public consultations",
    ),
    (
        "Public Services",
        "service delivery, citizen services, program administration, service standards",
    ),
    (
        "Budget & Finance",
        "budget planning, financial reports, expenditure tracking, revenue analysis",
    ),
    (
        "Procurement",
        "tender documents, contract awards, supplier management, procurement policies",
    ),
    (
        "Regulatory & Compliance",
        "regulatory oversight, compliance monitoring, enforcement actions, audits",
    ),
    (
        "Public Safety",
        "emergency planning, security protocols, safety assessments, incident response",
    ),
    (
        "Infrastructure",
        "infrastructure planning, public works, facility management, capital projects",
    ),
    (
        "Human Resources",
        "staffing plans, recruitment, training programs, performance evaluations",
    ),
    (
        "Community Relations",
        "public engagement, stakeholder communications, community feedback, outreach programs",
    ),
    (
        "Legal Affairs",
        "legal opinions, litigation management, contract review, regulatory interpretation",
    ),
    (
        "Performance Management",
        "performance metrics, program evaluation, outcome reporting, quality assurance",
    ),
    ("Other", "documents that don't fit other public sector categories"),
];

const RETAIL: &[(&str, &str)] = &[
    (
        "Merchandising",
        "product selection, buying plans, category management, assortment planning",
    ),
    (
        "Supply Chain & Logistics",
        "distribution, warehousing, transportation, fulfillment operations",
    ),
    (
        "Store Operations",
        "store procedures, staff training, operational standards, performance metrics",
    ),
    (
        "E-commerce",
        "online operations, digital marketing, website management, mobile commerce",
    ),
    (
        "Marketing & Promotions",
        "advertising campaigns, promotional strategies, brand management, customer acquisition",
    ),
    (
        "Customer Experience",
        "customer service, loyalty programs, feedback analysis, satisfaction surveys",
    ),
    (
        "Inventory Management",
        "stock levels, replenishment, demand planning, inventory optimization",
    ),
    (
        "Vendor Relations",
        "supplier agreements, vendor performance, product sourcing, negotiations",
    ),
    (
        "Finance & Analytics",
        "sales analysis, financial planning, pricing strategies, profitability analysis",
    ),
    (
        "Technology & Systems",
        "POS systems, inventory systems, technology infrastructure, digital transformation",
    ),
    (
        "Real Estate & Facilities",
        "store locations, lease agreements, facility management, expansion planning",
    ),
    ("Other", "documents that don't fit other retail categories"),
];

const TRANSPORTATION_LOGISTICS: &[(&str, &str)] = &[
    (
        "Fleet Management",
        "vehicle specifications, fleet planning, asset utilization, replacement schedules",
    ),
    (
        "Operations & Scheduling",
        "route optimization, dispatch operations, capacity planning, service schedules",
    ),
    (
        "Safety & Compliance",
        "safety protocols, DOT compliance, driver training, accident reports",
    ),
    (
        "Supply Chain Optimization",
        "logistics planning, network design, distribution strategies, efficiency studies",
    ),
    (
        "Customer Service",
        "service agreements, delivery confirmations, customer communications, issue resolution",
    ),
    (
        "Technology & Systems",
        "tracking systems, logistics software, automation technologies, digital platforms",
    ),
    (
        "Maintenance & Repair",
        "maintenance schedules, repair procedures, equipment specifications, downtime analysis",
    ),
    (
        "Freight & Cargo",
        "shipping documentation, cargo manifests, freight agreements, handling procedures",
    ),
    (
        "Route Planning",
        "route optimization, traffic analysis, delivery schedules, geographic planning",
    ),
    (
        "Regulatory Affairs",
        "transportation regulations, permit applications, compliance documentation, inspections",
    ),
    (
        "Finance & Costing",
        "cost analysis, pricing models, fuel management, profitability studies",
    ),
    (
        "Other",
        "documents that don't fit other transportation and logistics categories",
    ),
];

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_roster_has_twelve_categories_ending_in_other() {
        for industry in Industry::ALL {
            let categories = industry.categories();
            assert_eq!(categories.len(), 12, "{}", industry);
            assert_eq!(*categories.last().unwrap(), OTHER_CATEGORY, "{}", industry);
        }
    }

    #[test]
    fn industry_ids_round_trip() {
        for industry in Industry::ALL {
            let parsed: Industry = industry.as_str().parse().unwrap();
            assert_eq!(parsed, industry);
        }
        assert!("aerospace".parse::<Industry>().is_err());
    }

    #[test]
    fn roster_order_is_preserved() {
        let taxonomy = Taxonomy::general();
        assert_eq!(taxonomy.categories()[0], "Finance");
        assert_eq!(taxonomy.position("Legal"), Some(1));
        assert_eq!(taxonomy.position("Other"), Some(11));
    }

    #[test]
    fn resolve_is_exact_match_only() {
        let taxonomy = Taxonomy::general();
        assert!(taxonomy.resolve("Finance").is_ok());
        assert!(taxonomy.resolve("finance").is_err());
        assert!(taxonomy.resolve("FINANCE").is_err());
    }

    #[test]
    fn resolve_or_other_requires_an_other_bucket() {
        let with_other = Taxonomy::custom(["Spam", "Ham", "Other"]).unwrap();
        assert_eq!(with_other.resolve_or_other("Eggs").unwrap(), "Other");

        let without_other = Taxonomy::custom(["Spam", "Ham"]).unwrap();
        assert!(without_other.resolve_or_other("Eggs").is_err());
    }

    #[test]
    fn custom_roster_rejects_duplicates_and_empty() {
        assert!(Taxonomy::custom(Vec::<String>::new()).is_err());
        assert!(Taxonomy::custom(["A", "B", "A"]).is_err());
        assert!(Taxonomy::custom(["A", ""]).is_err());
    }

    #[test]
    fn descriptions_only_for_builtin_rosters() {
        let general = Taxonomy::general();
        assert!(general.description("Finance").unwrap().contains("invoices"));

        let custom = Taxonomy::custom(["Finance"]).unwrap();
        assert!(custom.description("Finance").is_none());
    }
}
