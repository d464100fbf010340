pub mod analyzer;
pub mod constants;
pub mod error;
pub mod finance;
pub mod geo;
pub mod proximity;
pub mod records;
pub mod scoring;
pub mod stats;

pub use analyzer::{SiteAnalyzer, SiteAnalyzerBuilder};
pub use error::AnalysisError;
pub use finance::{FinancialProjection, InvestmentParameters, Scenario};
pub use geo::GeoPoint;
pub use records::{RecordStore, RecordStoreBuilder};
pub use scoring::SiteScore;
