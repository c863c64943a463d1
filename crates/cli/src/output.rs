//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Render a single item
pub fn render_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            table.add_row(item.row());

            table.to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(item).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(item).unwrap_or_default(),
        OutputFormat::Plain => T::headers()
            .iter()
            .zip(item.row())
            .map(|(header, value)| format!("{}: {}", header, value))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print a single item
pub fn print_item<T: Serialize + TableDisplay>(item: &T, format: OutputFormat) {
    println!("{}", render_item(item, format));
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        name: String,
        subnet_id: String,
    }

    impl TableDisplay for Item {
        fn headers() -> Vec<&'static str> {
            vec!["NAME", "SUBNET"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.name.clone(), self.subnet_id.clone()]
        }
    }

    fn item() -> Item {
        Item {
            name: "web".to_string(),
            subnet_id: "subnet-abbaabba".to_string(),
        }
    }

    #[test]
    fn test_plain_output() {
        assert_eq!(
            render_item(&item(), OutputFormat::Plain),
            "NAME: web\nSUBNET: subnet-abbaabba"
        );
    }

    #[test]
    fn test_json_output() {
        let rendered = render_item(&item(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["subnet_id"], "subnet-abbaabba");
    }

    #[test]
    fn test_table_output_contains_cells() {
        let rendered = render_item(&item(), OutputFormat::Table);
        assert!(rendered.contains("SUBNET"));
        assert!(rendered.contains("subnet-abbaabba"));
    }
}
