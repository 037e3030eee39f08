use crate::domain::model::{OrderId, ProductId};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "label-engine")]
#[command(about = "Generates numbered HORECA and nutritional label batches")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Override output.output_path from the config
    #[arg(long)]
    pub output_path: Option<String>,

    /// Bundle all batch files into a single zip archive
    #[arg(long)]
    pub archive: bool,

    /// Plan the batches and log them without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ingredient labels for the given orders, split by per-label maximum
    Horeca {
        /// JSON snapshot with orders, branches, products and plated dishes
        #[arg(long)]
        input: String,

        #[arg(long, value_delimiter = ',', required = true)]
        order_ids: Vec<OrderId>,

        /// dd/mm/yyyy, defaults to today
        #[arg(long)]
        elaboration_date: Option<String>,
    },

    /// Nutritional labels for the given products, grouped by production area
    Nutritional {
        /// JSON snapshot with the product catalog
        #[arg(long)]
        input: String,

        #[arg(long, value_delimiter = ',', required = true)]
        product_ids: Vec<ProductId>,

        /// Labels per product as `id=quantity`; unlisted products get one label
        #[arg(long, value_delimiter = ',', value_parser = parse_quantity)]
        quantities: Vec<(ProductId, u32)>,

        #[arg(long)]
        production_order_code: Option<String>,

        /// dd/mm/yyyy, defaults to today
        #[arg(long)]
        elaboration_date: Option<String>,
    },
}

fn parse_quantity(value: &str) -> Result<(ProductId, u32), String> {
    let (id, quantity) = value
        .split_once('=')
        .ok_or_else(|| format!("expected id=quantity, got '{}'", value))?;
    let id = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid product id '{}': {}", id, e))?;
    let quantity = quantity
        .trim()
        .parse()
        .map_err(|e| format!("invalid quantity '{}': {}", quantity, e))?;
    Ok((id, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("12=3"), Ok((12, 3)));
        assert_eq!(parse_quantity(" 7 = 20 "), Ok((7, 20)));
        assert!(parse_quantity("12").is_err());
        assert!(parse_quantity("a=1").is_err());
    }

    #[test]
    fn test_parse_nutritional_command() {
        let cli = Cli::parse_from([
            "label-engine",
            "--archive",
            "nutritional",
            "--input",
            "snapshot.json",
            "--product-ids",
            "1,2,3",
            "--quantities",
            "1=5,3=2",
            "--production-order-code",
            "OP-9",
        ]);

        assert!(cli.archive);
        match cli.command {
            Command::Nutritional {
                product_ids,
                quantities,
                production_order_code,
                ..
            } => {
                assert_eq!(product_ids, vec![1, 2, 3]);
                assert_eq!(quantities, vec![(1, 5), (3, 2)]);
                assert_eq!(production_order_code.as_deref(), Some("OP-9"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_horeca_command() {
        let cli = Cli::parse_from([
            "label-engine",
            "horeca",
            "--input",
            "snapshot.json",
            "--order-ids",
            "10,11",
            "--elaboration-date",
            "05/11/2025",
        ]);

        match cli.command {
            Command::Horeca { order_ids, elaboration_date, .. } => {
                assert_eq!(order_ids, vec![10, 11]);
                assert_eq!(elaboration_date.as_deref(), Some("05/11/2025"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
