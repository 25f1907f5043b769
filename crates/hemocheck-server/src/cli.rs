use clap::Parser;
use hemocheck_core::ModelKind;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "hemocheck-server")]
#[command(author, version, about = "Anemia classification service", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "hemocheck.yaml")]
    pub config: String,

    /// Active model (logistic, random_forest, gradient_boosting, svm, knn, decision_tree, naive_bayes)
    #[arg(short, long, value_parser = parse_model)]
    pub model: Option<ModelKind>,

    /// Artifact store directory
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long)]
    pub listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long)]
    pub port: Option<u16>,

    /// Abort startup when the model cannot be loaded
    #[arg(long)]
    pub strict_startup: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_model(s: &str) -> Result<ModelKind, String> {
    s.parse().map_err(|e: hemocheck_core::Error| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::parse_from([
            "hemocheck-server",
            "--model",
            "knn",
            "--model-path",
            "/srv/models",
            "-P",
            "9000",
            "--strict-startup",
        ]);
        assert_eq!(cli.model, Some(ModelKind::Knn));
        assert_eq!(cli.model_path, Some(PathBuf::from("/srv/models")));
        assert_eq!(cli.port, Some(9000));
        assert!(cli.strict_startup);
        assert_eq!(cli.config, "hemocheck.yaml");
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(Cli::try_parse_from(["hemocheck-server", "--model", "xgboost"]).is_err());
    }
}
