use layered_nn::data::make_blobs;
use layered_nn::{FitConfig, LayeredNetwork};
use tracing_subscriber::EnvFilter;

fn main() -> layered_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let path = std::env::temp_dir().join("layered_nn_fit_config.json");
    std::fs::write(
        &path,
        r#"{ "epochs": 500, "learning_rate": 0.2, "eval_interval": 50 }"#,
    )
    .map_err(|e| layered_nn::Error::InvalidConfig(format!("failed to write config: {e}")))?;

    let cfg = FitConfig::load_json(&path)?;
    println!("{}", cfg.to_json_string_pretty()?);

    let (x, y) = make_blobs(80, 2, 0.7, 1)?;
    let mut net = LayeredNetwork::new(&[3]);
    net.fit(&x, &y, cfg)?;
    println!("history: {}", net.history().to_json_string()?);

    Ok(())
}
