use clap::{Args, Parser, Subcommand};
use homepro::estimator::{ContractPackage, FoundationType, PlotSpec, QualityTier, RoofType};
use homepro::render::{AspectRatio, RenderConfig, Resolution, DEFAULT_MODEL};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "homepro", version, about = "NCA Homepro site service")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "homepro.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Estimate construction cost for a plot
    Estimate(EstimateArgs),

    /// Render architectural visualizations from a photo
    Render(RenderArgs),

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Plot width in metres
    #[arg(short, long, default_value = "5")]
    pub width: f64,

    /// Plot length in metres
    #[arg(short, long, default_value = "20")]
    pub length: f64,

    /// Above-ground floors, ground floor included
    #[arg(short, long, default_value = "2")]
    pub floors: u32,

    /// Include a basement
    #[arg(short, long)]
    pub basement: bool,

    /// Foundation: single, pile
    #[arg(long, default_value = "single")]
    pub foundation: FoundationType,

    /// Roof: tole, iron, concrete
    #[arg(long, default_value = "tole")]
    pub roof: RoofType,

    /// Package: construction, full
    #[arg(long, default_value = "full")]
    pub package: ContractPackage,

    /// Quality: average, good, premium
    #[arg(long, default_value = "average")]
    pub quality: QualityTier,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

impl EstimateArgs {
    pub fn to_spec(&self) -> PlotSpec {
        PlotSpec {
            width: self.width,
            length: self.length,
            floors: self.floors,
            has_basement: self.basement,
            foundation_type: self.foundation,
            roof_type: self.roof,
            contract_package: self.package,
            quality_tier: self.quality,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Site photo to render from
    #[arg(short, long)]
    pub original: PathBuf,

    /// Optional style reference photo
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    #[arg(long, default_value = "Modern (Hiện đại)")]
    pub style: String,

    #[arg(long, default_value = "trên một đường phố Việt Nam")]
    pub location: String,

    #[arg(long, default_value = "sáng rực rỡ")]
    pub lighting: String,

    #[arg(long, default_value = "trong xanh")]
    pub weather: String,

    /// Additional instructions
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Number of variations
    #[arg(short = 'n', long, default_value = "3")]
    pub count: u8,

    /// 1:1, 3:4, 4:3, 9:16, 16:9
    #[arg(long, default_value = "16:9")]
    pub aspect_ratio: AspectRatio,

    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// 1K, 2K, 4K (pro model only)
    #[arg(long, default_value = "1K")]
    pub resolution: Resolution,

    /// Directory for the generated images
    #[arg(long, default_value = "renders")]
    pub out_dir: PathBuf,
}

impl RenderArgs {
    pub fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            style: self.style.clone(),
            location: self.location.clone(),
            lighting: self.lighting.clone(),
            weather: self.weather.clone(),
            custom_prompt: self.prompt.clone(),
            image_count: self.count,
            aspect_ratio: self.aspect_ratio,
            model: self.model.clone(),
            resolution: self.resolution,
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display current configuration (with secrets masked)
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_serve() {
        let cli = Cli {
            config: PathBuf::from("homepro.toml"),
            command: None,
        };
        assert!(matches!(cli.get_command(), Commands::Serve));
    }

    #[test]
    fn test_cli_parsing_estimate_defaults() {
        let cli = Cli::try_parse_from(["homepro", "estimate"]).unwrap();

        match cli.get_command() {
            Commands::Estimate(args) => assert_eq!(args.to_spec(), PlotSpec::default()),
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_parsing_estimate_options() {
        let cli = Cli::try_parse_from([
            "homepro", "estimate", "-w", "6", "-l", "18", "--basement", "--roof", "iron",
            "--package", "construction", "--quality", "good",
        ])
        .unwrap();

        match cli.get_command() {
            Commands::Estimate(args) => {
                let spec = args.to_spec();
                assert_eq!(spec.width, 6.0);
                assert!(spec.has_basement);
                assert_eq!(spec.roof_type, RoofType::IronTruss);
                assert_eq!(spec.contract_package, ContractPackage::ConstructionOnly);
                assert_eq!(spec.quality_tier, QualityTier::Good);
            }
            _ => panic!("Expected Estimate command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_package() {
        assert!(Cli::try_parse_from(["homepro", "estimate", "--package", "design"]).is_err());
    }

    #[test]
    fn test_cli_parsing_render() {
        let cli = Cli::try_parse_from([
            "homepro", "render", "-o", "site.jpg", "-n", "2", "--aspect-ratio", "4:3",
        ])
        .unwrap();

        match cli.get_command() {
            Commands::Render(args) => {
                let config = args.to_render_config();
                assert_eq!(config.image_count, 2);
                assert_eq!(config.aspect_ratio, AspectRatio::Landscape4x3);
                assert_eq!(config.model, DEFAULT_MODEL);
                assert_eq!(config.style, RenderConfig::default().style);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_config_show() {
        let cli = Cli::try_parse_from(["homepro", "config", "show"]).unwrap();
        assert!(matches!(
            cli.get_command(),
            Commands::Config {
                action: ConfigCommands::Show
            }
        ));
    }
}
