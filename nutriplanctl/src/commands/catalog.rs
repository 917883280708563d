use clap::{Args, Subcommand};
use nutriplan_core::MealSlot;

#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommands {
    /// Checks the catalog files and lists every structural problem
    Validate,
    /// Lists the foods of the merged catalog
    Show(CatalogShowArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CatalogShowArgs {
    /// Only show one meal slot (breakfast | lunch | dinner | snacks)
    #[arg(long, value_parser = parse_slot)]
    pub slot: Option<MealSlot>,
}

fn parse_slot(value: &str) -> Result<MealSlot, String> {
    value.parse()
}
