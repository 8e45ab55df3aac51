pub mod catalog;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use catalog::CatalogPlan;
pub use scenarios::{get_scenario, list_scenarios, scenario_keys};
pub use tester::{LogicTester, ScenarioResult};
