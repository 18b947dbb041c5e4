use layered_nn::{FitConfig, Matrix, NetworkBuilder};
use tracing_subscriber::EnvFilter;

fn main() -> layered_nn::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Classic XOR dataset, one sample per column.
    let x = Matrix::from_rows(&[vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 1.0, 0.0, 1.0]])?;
    let y = Matrix::row_vector(&[0.0, 1.0, 1.0, 0.0]);

    // 2 -> 4 -> 1, sigmoid everywhere.
    let mut net = NetworkBuilder::new().hidden_layer(4).seed(0).build();
    let report = net.fit(
        &x,
        &y,
        FitConfig {
            epochs: 20_000,
            learning_rate: 1.0,
            eval_interval: 1_000,
        },
    )?;
    println!(
        "epochs_run={} final_error={:?}",
        report.epochs_run, report.final_error
    );

    let proba = net.predict_proba(&x)?;
    for c in 0..x.width() {
        println!(
            "x=({}, {}) p={:.4}",
            x.get(0, c),
            x.get(1, c),
            proba.get(0, c)
        );
    }

    Ok(())
}
