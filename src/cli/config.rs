use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "schema-form",
    version,
    about = "Render schema-driven HTML forms and reconcile submissions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: schema-form.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a schema (plus optional values) to a standalone HTML page
    Render {
        /// Path to the schema YAML file
        #[arg(long)]
        schema: String,

        /// Optional YAML file with initial values
        #[arg(long)]
        values: Option<String>,

        /// Optional YAML file mapping field paths to metric entries
        #[arg(long)]
        metrics: Option<String>,

        /// Form namespace
        #[arg(long, default_value = "form")]
        name: String,

        /// Use the compact spacing theme
        #[arg(long, default_value_t = false)]
        compact: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse a flat submission back into a nested value tree
    Parse {
        /// Path to the schema YAML file
        #[arg(long)]
        schema: String,

        /// YAML file mapping wire names to submitted strings
        #[arg(long)]
        submission: String,

        /// Optional YAML file with initial values
        #[arg(long)]
        values: Option<String>,

        /// Form namespace the submission was rendered under
        #[arg(long, default_value = "form")]
        name: String,

        /// Run the validation delegate after reconciliation
        #[arg(long, default_value_t = false)]
        validate: bool,
    },

    /// Render two value sets side by side as a comparison page
    Compare {
        /// Path to the schema YAML file
        #[arg(long)]
        schema: String,

        /// YAML file with left-side values
        #[arg(long)]
        left: Option<String>,

        /// YAML file with right-side values
        #[arg(long)]
        right: Option<String>,

        /// Comparison pair name
        #[arg(long, default_value = "compare")]
        name: String,

        /// Annotate the right column with equality metrics
        #[arg(long, default_value_t = false)]
        diff_metrics: bool,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `schema-form.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub compare: CompareConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_form_html")]
    pub output: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: "form.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    #[serde(default = "default_compare_html")]
    pub output: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            output: "compare.html".to_string(),
        }
    }
}

// Serde default helpers
fn default_form_html() -> String { "form.html".to_string() }
fn default_compare_html() -> String { "compare.html".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("schema-form.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
